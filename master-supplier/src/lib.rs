#![no_std]

multiversx_sc::imports!();

pub mod auth;
pub mod emission;
pub mod fees;
pub mod power_token_proxy;
pub mod types;

use types::{PoolInfo, UserInfo};

/// Fixed-point scale of acc_reward_per_share.
pub const REWARD_SCALE: u64 = 1_000_000_000_000;

// ============================================================
// MasterSupplier — emission and accounting engine
//
// Mints the POWER governance token on a halving per-block
// schedule and distributes it across an admin-managed set of
// staking pools in proportion to allocation weights. Per-user
// accounting is O(1) per interaction through the classic
// accumulated-reward-per-share / reward-debt scheme; the
// depositor set is never iterated.
//
// Stake assets are ESDT tokens paid into payable endpoints;
// rewards are minted on the POWER ledger contract, with a
// configurable share of every payout locked there.
// ============================================================

#[multiversx_sc::contract]
pub trait MasterSupplier:
    auth::AuthModule + fees::FeeModule + emission::EmissionModule
{
    #[init]
    #[allow(clippy::too_many_arguments)]
    fn init(
        &self,
        power_token_address: ManagedAddress,
        dev_address: ManagedAddress,
        liquidity_address: ManagedAddress,
        community_address: ManagedAddress,
        founder_address: ManagedAddress,
        rewards_per_block: BigUint,
        rewards_start_block: u64,
        halving_interval: u64,
    ) {
        require!(
            self.blockchain().is_smart_contract(&power_token_address),
            "invalid token address"
        );
        require!(rewards_per_block > 0u64, "invalid rewards per block");
        require!(halving_interval > 0, "invalid halving interval");

        self.power_token_address().set(&power_token_address);
        self.dev_address().set(&dev_address);
        self.liquidity_address().set(&liquidity_address);
        self.community_address().set(&community_address);
        self.founder_address().set(&founder_address);
        self.rewards_per_block().set(&rewards_per_block);
        self.rewards_start_block().set(rewards_start_block);
        self.halving_interval().set(halving_interval);
        self.init_default_fees();
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: addPool
    // Registers a new stake token. Optionally settles every
    // existing pool first so the weight change cannot
    // misallocate reward already accrued under the old total.
    // ========================================================

    #[only_owner]
    #[endpoint(addPool)]
    fn add_pool(&self, alloc_weight: u64, stake_token: TokenIdentifier, with_update: bool) {
        require!(
            !self.pool_existence_flag(&stake_token).get(),
            "duplicated pool"
        );
        if with_update {
            self.mass_update_pools();
        }

        let current_block = self.blockchain().get_block_nonce();
        let last_reward_block =
            core::cmp::max(current_block, self.rewards_start_block().get());
        let pool_id = self.pool_count().get();

        self.pools(pool_id).set(&PoolInfo {
            stake_token: stake_token.clone(),
            alloc_weight,
            last_reward_block,
            acc_reward_per_share: BigUint::zero(),
            total_staked: BigUint::zero(),
        });
        self.pool_count().set(pool_id + 1);
        self.pool_existence_flag(&stake_token).set(true);
        self.total_alloc_weight()
            .update(|w| *w += alloc_weight);

        self.pool_added_event(pool_id, &stake_token, alloc_weight);
    }

    #[only_owner]
    #[endpoint(setPoolWeight)]
    fn set_pool_weight(&self, pool_id: u64, alloc_weight: u64, with_update: bool) {
        self.require_known_pool(pool_id);
        if with_update {
            self.mass_update_pools();
        }

        let mut pool = self.pools(pool_id).get();
        self.total_alloc_weight()
            .update(|w| *w = *w - pool.alloc_weight + alloc_weight);
        pool.alloc_weight = alloc_weight;
        self.pools(pool_id).set(&pool);

        self.pool_weight_set_event(pool_id, alloc_weight);
    }

    // ========================================================
    // ENDPOINT: updatePool / massUpdatePools
    // Lazy settlement, callable by anyone. Idempotent: a
    // second call in the same block is a no-op.
    // ========================================================

    #[endpoint(updatePool)]
    fn update_pool(&self, pool_id: u64) {
        self.require_known_pool(pool_id);
        self.settle_pool(pool_id);
    }

    #[endpoint(massUpdatePools)]
    fn mass_update_pools(&self) {
        let count = self.pool_count().get();
        for pool_id in 0..count {
            self.settle_pool(pool_id);
        }
    }

    /// Applies emission since last_reward_block to the pool.
    /// With nobody staked the accumulator is frozen and only
    /// the height advances: attributing reward to zero stakers
    /// would permanently misprice the next depositor.
    fn settle_pool(&self, pool_id: u64) {
        let mut pool = self.pools(pool_id).get();
        let current_block = self.blockchain().get_block_nonce();
        if current_block <= pool.last_reward_block {
            return;
        }

        let total_weight = self.total_alloc_weight().get();
        if pool.total_staked == 0u64 || total_weight == 0 {
            pool.last_reward_block = current_block;
            self.pools(pool_id).set(&pool);
            return;
        }

        let minted = emission::emission_between(
            &self.rewards_per_block().get(),
            self.rewards_start_block().get(),
            self.halving_interval().get(),
            pool.last_reward_block,
            current_block,
        );
        let pool_reward = minted * pool.alloc_weight / total_weight;
        if pool_reward > 0u64 {
            let (for_dev, for_lp, for_com, for_founders, for_farmers) =
                self.split_pool_reward(&pool_reward);

            self.mint_reward(&self.dev_address().get(), &for_dev);
            self.mint_reward(&self.liquidity_address().get(), &for_lp);
            self.mint_reward(&self.community_address().get(), &for_com);
            self.mint_reward(&self.founder_address().get(), &for_founders);

            let own_address = self.blockchain().get_sc_address();
            self.mint_reward(&own_address, &for_farmers);

            pool.acc_reward_per_share +=
                &for_farmers * REWARD_SCALE / &pool.total_staked;
        }

        pool.last_reward_block = current_block;
        self.pools(pool_id).set(&pool);

        self.pool_settled_event(pool_id, current_block);
    }

    /// Fund shares are carved out of the pool reward; farmers
    /// receive the remainder, so rounding dust stays with the
    /// farmers rather than silently inflating emission.
    fn split_pool_reward(
        &self,
        pool_reward: &BigUint,
    ) -> (BigUint, BigUint, BigUint, BigUint, BigUint) {
        let for_dev = pool_reward * self.percent_for_dev().get() / 100u64;
        let for_lp = pool_reward * self.percent_for_lp().get() / 100u64;
        let for_com = pool_reward * self.percent_for_com().get() / 100u64;
        let for_founders = pool_reward * self.percent_for_founders().get() / 100u64;
        let for_farmers =
            pool_reward - &for_dev - &for_lp - &for_com - &for_founders;
        (for_dev, for_lp, for_com, for_founders, for_farmers)
    }

    // ========================================================
    // ENDPOINT: deposit
    // Settles the pool, pays the caller's pending reward,
    // then credits stake: the depositor receives the deposit
    // minus the user fee, the dev address is credited the dev
    // cut as stake in the same pool (the dev farms its cut).
    // ========================================================

    #[payable("*")]
    #[endpoint(deposit)]
    fn deposit(&self, pool_id: u64, referrer: OptionalValue<ManagedAddress>) {
        self.reentrancy_enter();
        self.require_known_pool(pool_id);
        self.settle_pool(pool_id);

        let caller = self.blockchain().get_caller();
        let mut pool = self.pools(pool_id).get();
        let payment = self.call_value().single_esdt();
        require!(
            payment.token_identifier == pool.stake_token,
            "wrong stake token"
        );
        let amount = payment.amount.clone();
        require!(amount > 0u64, "zero amount");

        let mut user = self.get_user_info(pool_id, &caller);
        let pending = self.pending_of(&user, &pool.acc_reward_per_share);

        // Uniform credit formula: each party receives the deposit
        // minus its own fee rate. With the 75 / 9925 defaults the
        // depositor keeps 99.25% and the dev cut is 0.75%.
        let (user_credit, _) = self.apply_fee(&amount, self.user_deposit_fee().get());
        let (dev_credit, _) = self.apply_fee(&amount, self.dev_deposit_fee().get());

        user.amount += &user_credit;
        pool.total_staked += &user_credit;

        let dev_address = self.dev_address().get();
        let mut dev_pending = BigUint::zero();
        if dev_credit > 0u64 {
            if dev_address == caller {
                user.amount += &dev_credit;
            } else {
                let mut dev_info = self.get_user_info(pool_id, &dev_address);
                dev_pending = self.pending_of(&dev_info, &pool.acc_reward_per_share);
                dev_info.amount += &dev_credit;
                dev_info.reward_debt =
                    &dev_info.amount * &pool.acc_reward_per_share / REWARD_SCALE;
                self.user_info(pool_id, &dev_address).set(&dev_info);
            }
            pool.total_staked += &dev_credit;
        }

        user.reward_debt = &user.amount * &pool.acc_reward_per_share / REWARD_SCALE;
        self.user_info(pool_id, &caller).set(&user);
        self.pools(pool_id).set(&pool);

        if let OptionalValue::Some(referrer_addr) = referrer {
            if referrer_addr != caller && self.referrer(&caller).is_empty() {
                self.referrer(&caller).set(&referrer_addr);
            }
        }

        // Interactions strictly after all bookkeeping.
        if pending > 0u64 {
            self.pay_reward(&caller, &pending);
        }
        if dev_pending > 0u64 {
            self.pay_reward(&dev_address, &dev_pending);
        }

        self.deposit_event(&caller, pool_id, &amount);
        self.reentrancy_exit();
    }

    // ========================================================
    // ENDPOINT: withdraw
    // Settles pending reward, shrinks the stake, then returns
    // the stake tokens minus the withdrawal fee; the dev cut
    // of the returned asset is transferred out directly.
    // ========================================================

    #[endpoint(withdraw)]
    fn withdraw(&self, pool_id: u64, amount: BigUint, _referrer: OptionalValue<ManagedAddress>) {
        self.reentrancy_enter();
        self.require_known_pool(pool_id);
        self.settle_pool(pool_id);

        let caller = self.blockchain().get_caller();
        let mut pool = self.pools(pool_id).get();
        let mut user = self.get_user_info(pool_id, &caller);
        require!(user.amount >= amount, "insufficient staked balance");

        let pending = self.pending_of(&user, &pool.acc_reward_per_share);

        user.amount -= &amount;
        pool.total_staked -= &amount;
        user.reward_debt = &user.amount * &pool.acc_reward_per_share / REWARD_SCALE;
        self.user_info(pool_id, &caller).set(&user);
        self.pools(pool_id).set(&pool);

        if pending > 0u64 {
            self.pay_reward(&caller, &pending);
        }

        if amount > 0u64 {
            let (user_return, _) = self.apply_fee(&amount, self.user_withdraw_fee().get());
            let (dev_cut, _) = self.apply_fee(&amount, self.dev_withdraw_fee().get());

            if user_return > 0u64 {
                self.send()
                    .direct_esdt(&caller, &pool.stake_token, 0, &user_return);
            }
            if dev_cut > 0u64 {
                self.send().direct_esdt(
                    &self.dev_address().get(),
                    &pool.stake_token,
                    0,
                    &dev_cut,
                );
            }
        }

        self.withdraw_event(&caller, pool_id, &amount);
        self.reentrancy_exit();
    }

    // ========================================================
    // ENDPOINT: claimReward
    // Settles pending reward to zero without touching stake.
    // ========================================================

    #[endpoint(claimReward)]
    fn claim_reward(&self, pool_id: u64) {
        self.reentrancy_enter();
        self.require_known_pool(pool_id);
        self.settle_pool(pool_id);

        let caller = self.blockchain().get_caller();
        let pool = self.pools(pool_id).get();
        let mut user = self.get_user_info(pool_id, &caller);

        let pending = self.pending_of(&user, &pool.acc_reward_per_share);
        user.reward_debt = &user.amount * &pool.acc_reward_per_share / REWARD_SCALE;
        self.user_info(pool_id, &caller).set(&user);

        if pending > 0u64 {
            self.pay_reward(&caller, &pending);
        }

        self.claim_event(&caller, pool_id, &pending);
        self.reentrancy_exit();
    }

    // ========================================================
    // ENDPOINT: emergencyWithdraw
    // Returns the full stake without fees and forfeits any
    // pending reward. Escape hatch only.
    // ========================================================

    #[endpoint(emergencyWithdraw)]
    fn emergency_withdraw(&self, pool_id: u64) {
        self.reentrancy_enter();
        self.require_known_pool(pool_id);

        let caller = self.blockchain().get_caller();
        let mut pool = self.pools(pool_id).get();
        let mut user = self.get_user_info(pool_id, &caller);
        let amount = user.amount.clone();
        require!(amount > 0u64, "insufficient staked balance");

        user.amount = BigUint::zero();
        user.reward_debt = BigUint::zero();
        pool.total_staked -= &amount;
        self.user_info(pool_id, &caller).set(&user);
        self.pools(pool_id).set(&pool);

        self.send()
            .direct_esdt(&caller, &pool.stake_token, 0, &amount);

        self.emergency_withdraw_event(&caller, pool_id, &amount);
        self.reentrancy_exit();
    }

    // ========================================================
    // ENDPOINT: reclaimTokenOwnership
    // Hands POWER mint authority from this contract back to a
    // wallet. Owner or authorized callers only.
    // ========================================================

    #[endpoint(reclaimTokenOwnership)]
    fn reclaim_token_ownership(&self, to: ManagedAddress) {
        self.require_authorized();
        self.tx()
            .to(&self.power_token_address().get())
            .typed(power_token_proxy::PowerTokenProxy)
            .transfer_ownership(&to)
            .sync_call();
        self.token_ownership_reclaimed_event(&to);
    }

    // ========================================================
    // ENDPOINTS: named fee address rotation
    // Each address may be updated by the owner, an authorized
    // caller, or its own current holder.
    // ========================================================

    #[endpoint(setDevAddress)]
    fn set_dev_address(&self, addr: ManagedAddress) {
        let current = self.dev_address().get();
        self.require_authorized_or_role_holder(&current);
        self.dev_address().set(&addr);
        self.dev_address_set_event(&addr);
    }

    #[endpoint(setLiquidityAddress)]
    fn set_liquidity_address(&self, addr: ManagedAddress) {
        let current = self.liquidity_address().get();
        self.require_authorized_or_role_holder(&current);
        self.liquidity_address().set(&addr);
        self.liquidity_address_set_event(&addr);
    }

    #[endpoint(setCommunityAddress)]
    fn set_community_address(&self, addr: ManagedAddress) {
        let current = self.community_address().get();
        self.require_authorized_or_role_holder(&current);
        self.community_address().set(&addr);
        self.community_address_set_event(&addr);
    }

    #[endpoint(setFounderAddress)]
    fn set_founder_address(&self, addr: ManagedAddress) {
        let current = self.founder_address().get();
        self.require_authorized_or_role_holder(&current);
        self.founder_address().set(&addr);
        self.founder_address_set_event(&addr);
    }

    // ========================================================
    // INTERNAL: reward payout
    // Clamped to the contract's actual token balance, then the
    // lock percentage is applied on the recipient.
    // ========================================================

    fn pay_reward(&self, to: &ManagedAddress, amount: &BigUint) {
        let own_address = self.blockchain().get_sc_address();
        let token_address = self.power_token_address().get();
        let balance: BigUint = self
            .tx()
            .to(&token_address)
            .typed(power_token_proxy::PowerTokenProxy)
            .balance_of(&own_address)
            .returns(ReturnsResult)
            .sync_call_readonly();

        let payout = core::cmp::min(amount.clone(), balance);
        if payout == 0u64 {
            return;
        }

        self.tx()
            .to(&token_address)
            .typed(power_token_proxy::PowerTokenProxy)
            .transfer(to, &payout)
            .sync_call();

        let lock_amount = &payout * self.percent_lock_reward().get() / 100u64;
        if lock_amount > 0u64 {
            self.tx()
                .to(&token_address)
                .typed(power_token_proxy::PowerTokenProxy)
                .lock(to, &lock_amount)
                .sync_call();
        }

        self.reward_paid_event(to, &payout);
    }

    fn mint_reward(&self, to: &ManagedAddress, amount: &BigUint) {
        if *amount == 0u64 {
            return;
        }
        self.tx()
            .to(&self.power_token_address().get())
            .typed(power_token_proxy::PowerTokenProxy)
            .mint(to, amount)
            .sync_call();
    }

    // ========================================================
    // INTERNAL: accounting helpers
    // ========================================================

    fn pending_of(&self, user: &UserInfo<Self::Api>, acc_reward_per_share: &BigUint) -> BigUint {
        if user.amount == 0u64 {
            return BigUint::zero();
        }
        let entitled = &user.amount * acc_reward_per_share / REWARD_SCALE;
        if entitled > user.reward_debt {
            entitled - &user.reward_debt
        } else {
            BigUint::zero()
        }
    }

    fn get_user_info(&self, pool_id: u64, addr: &ManagedAddress) -> UserInfo<Self::Api> {
        let mapper = self.user_info(pool_id, addr);
        if mapper.is_empty() {
            UserInfo::default()
        } else {
            mapper.get()
        }
    }

    fn require_known_pool(&self, pool_id: u64) {
        require!(pool_id < self.pool_count().get(), "unknown pool");
    }

    fn reentrancy_enter(&self) {
        require!(!self.call_in_progress().get(), "reentrant call");
        self.call_in_progress().set(true);
    }

    fn reentrancy_exit(&self) {
        self.call_in_progress().clear();
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(poolLength)]
    fn pool_length(&self) -> u64 {
        self.pool_count().get()
    }

    #[view(poolExistence)]
    fn pool_existence(&self, stake_token: TokenIdentifier) -> bool {
        self.pool_existence_flag(&stake_token).get()
    }

    #[view(getPoolInfo)]
    fn get_pool_info(&self, pool_id: u64) -> PoolInfo<Self::Api> {
        self.require_known_pool(pool_id);
        self.pools(pool_id).get()
    }

    #[view(getUserInfo)]
    fn get_user_info_view(&self, pool_id: u64, addr: ManagedAddress) -> UserInfo<Self::Api> {
        self.require_known_pool(pool_id);
        self.get_user_info(pool_id, &addr)
    }

    /// Pending reward as if the pool were settled right now.
    #[view(pendingReward)]
    fn pending_reward(&self, pool_id: u64, addr: ManagedAddress) -> BigUint {
        self.require_known_pool(pool_id);
        let pool = self.pools(pool_id).get();
        let user = self.get_user_info(pool_id, &addr);
        if user.amount == 0u64 {
            return BigUint::zero();
        }

        let mut acc_reward_per_share = pool.acc_reward_per_share.clone();
        let current_block = self.blockchain().get_block_nonce();
        let total_weight = self.total_alloc_weight().get();
        if current_block > pool.last_reward_block
            && pool.total_staked > 0u64
            && total_weight > 0
        {
            let minted = emission::emission_between(
                &self.rewards_per_block().get(),
                self.rewards_start_block().get(),
                self.halving_interval().get(),
                pool.last_reward_block,
                current_block,
            );
            let pool_reward = minted * pool.alloc_weight / total_weight;
            let (_, _, _, _, for_farmers) = self.split_pool_reward(&pool_reward);
            acc_reward_per_share += &for_farmers * REWARD_SCALE / &pool.total_staked;
        }

        self.pending_of(&user, &acc_reward_per_share)
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("poolAdded")]
    fn pool_added_event(
        &self,
        #[indexed] pool_id: u64,
        #[indexed] stake_token: &TokenIdentifier,
        alloc_weight: u64,
    );

    #[event("poolWeightSet")]
    fn pool_weight_set_event(&self, #[indexed] pool_id: u64, alloc_weight: u64);

    #[event("poolSettled")]
    fn pool_settled_event(&self, #[indexed] pool_id: u64, #[indexed] block: u64);

    #[event("deposit")]
    fn deposit_event(
        &self,
        #[indexed] caller: &ManagedAddress,
        #[indexed] pool_id: u64,
        amount: &BigUint,
    );

    #[event("withdraw")]
    fn withdraw_event(
        &self,
        #[indexed] caller: &ManagedAddress,
        #[indexed] pool_id: u64,
        amount: &BigUint,
    );

    #[event("claimReward")]
    fn claim_event(
        &self,
        #[indexed] caller: &ManagedAddress,
        #[indexed] pool_id: u64,
        amount: &BigUint,
    );

    #[event("emergencyWithdraw")]
    fn emergency_withdraw_event(
        &self,
        #[indexed] caller: &ManagedAddress,
        #[indexed] pool_id: u64,
        amount: &BigUint,
    );

    #[event("rewardPaid")]
    fn reward_paid_event(&self, #[indexed] to: &ManagedAddress, amount: &BigUint);

    #[event("devAddressSet")]
    fn dev_address_set_event(&self, #[indexed] addr: &ManagedAddress);

    #[event("liquidityAddressSet")]
    fn liquidity_address_set_event(&self, #[indexed] addr: &ManagedAddress);

    #[event("communityAddressSet")]
    fn community_address_set_event(&self, #[indexed] addr: &ManagedAddress);

    #[event("founderAddressSet")]
    fn founder_address_set_event(&self, #[indexed] addr: &ManagedAddress);

    #[event("tokenOwnershipReclaimed")]
    fn token_ownership_reclaimed_event(&self, #[indexed] to: &ManagedAddress);

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getPowerTokenAddress)]
    #[storage_mapper("powerTokenAddress")]
    fn power_token_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getDevAddress)]
    #[storage_mapper("devAddress")]
    fn dev_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getLiquidityAddress)]
    #[storage_mapper("liquidityAddress")]
    fn liquidity_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getCommunityAddress)]
    #[storage_mapper("communityAddress")]
    fn community_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getFounderAddress)]
    #[storage_mapper("founderAddress")]
    fn founder_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("poolCount")]
    fn pool_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("pools")]
    fn pools(&self, pool_id: u64) -> SingleValueMapper<PoolInfo<Self::Api>>;

    #[storage_mapper("poolExistence")]
    fn pool_existence_flag(&self, stake_token: &TokenIdentifier) -> SingleValueMapper<bool>;

    #[view(getTotalAllocWeight)]
    #[storage_mapper("totalAllocWeight")]
    fn total_alloc_weight(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("userInfo")]
    fn user_info(
        &self,
        pool_id: u64,
        addr: &ManagedAddress,
    ) -> SingleValueMapper<UserInfo<Self::Api>>;

    #[view(getReferrer)]
    #[storage_mapper("referrer")]
    fn referrer(&self, addr: &ManagedAddress) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("callInProgress")]
    fn call_in_progress(&self) -> SingleValueMapper<bool>;
}
