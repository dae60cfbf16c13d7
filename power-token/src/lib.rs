#![no_std]

multiversx_sc::imports!();

// ============================================================
// POWER — the governance token
//
// A capped, owner-mintable balance ledger with a locking
// mechanism: reward payouts are partially locked and vest
// linearly between lockFromBlock and lockToBlock. Mint and
// lock authority belongs to the token owner, which is meant
// to be handed to the MasterSupplier after deployment and can
// be reclaimed from it at any time.
// ============================================================

#[multiversx_sc::contract]
pub trait PowerToken {
    #[init]
    fn init(&self, cap: BigUint, lock_from_block: u64, lock_to_block: u64) {
        require!(cap > 0u64, "invalid cap");
        require!(lock_from_block < lock_to_block, "invalid lock window");

        let deployer = self.blockchain().get_caller();
        self.token_owner().set(&deployer);
        self.cap().set(&cap);
        self.lock_from_block().set(lock_from_block);
        self.lock_to_block().set(lock_to_block);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: mint
    // Token-owner only. Total supply can never exceed the cap.
    // ========================================================

    #[endpoint(mint)]
    fn mint(&self, to: ManagedAddress, amount: BigUint) {
        self.require_token_owner();
        require!(amount > 0u64, "zero amount");

        let new_supply = self.total_supply().get() + &amount;
        require!(new_supply <= self.cap().get(), "cap exceeded");

        self.total_supply().set(&new_supply);
        self.balances(&to).update(|b| *b += &amount);

        self.mint_event(&to, &amount);
    }

    // ========================================================
    // ENDPOINT: transfer / approve / transferFrom
    // ========================================================

    #[endpoint(transfer)]
    fn transfer(&self, to: ManagedAddress, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        self.do_transfer(&caller, &to, &amount);
    }

    #[endpoint(approve)]
    fn approve(&self, spender: ManagedAddress, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        self.allowances(&caller, &spender).set(&amount);
        self.approval_event(&caller, &spender, &amount);
    }

    #[endpoint(transferFrom)]
    fn transfer_from(&self, from: ManagedAddress, to: ManagedAddress, amount: BigUint) {
        let caller = self.blockchain().get_caller();
        let allowance = self.allowances(&from, &caller).get();
        require!(allowance >= amount, "insufficient allowance");

        self.allowances(&from, &caller).set(&(allowance - &amount));
        self.do_transfer(&from, &to, &amount);
    }

    fn do_transfer(&self, from: &ManagedAddress, to: &ManagedAddress, amount: &BigUint) {
        let from_balance = self.balances(from).get();
        require!(from_balance >= *amount, "insufficient balance");

        self.balances(from).set(&(from_balance - amount));
        self.balances(to).update(|b| *b += amount);

        self.transfer_event(from, to, amount);
    }

    // ========================================================
    // ENDPOINT: lock
    // Token-owner only. Moves part of an account's liquid
    // balance into its locked bucket. Locked tokens vest
    // linearly and are released through unlock().
    // ========================================================

    #[endpoint(lock)]
    fn lock(&self, addr: ManagedAddress, amount: BigUint) {
        self.require_token_owner();
        require!(amount > 0u64, "zero amount");

        let balance = self.balances(&addr).get();
        require!(balance >= amount, "insufficient balance");

        self.balances(&addr).set(&(balance - &amount));
        self.locked(&addr).update(|l| *l += &amount);
        self.total_lock().update(|t| *t += &amount);

        if self.last_unlock_block(&addr).is_empty() {
            self.last_unlock_block(&addr).set(self.lock_from_block().get());
        }

        self.lock_event(&addr, &amount);
    }

    #[view(canUnlockAmount)]
    fn can_unlock_amount(&self, addr: ManagedAddress) -> BigUint {
        let current_block = self.blockchain().get_block_nonce();
        let lock_from = self.lock_from_block().get();
        let lock_to = self.lock_to_block().get();
        let locked = self.locked(&addr).get();

        if current_block < lock_from || locked == 0u64 {
            return BigUint::zero();
        }
        if current_block >= lock_to {
            return locked;
        }

        let released_from = self.last_unlock_block(&addr).get();
        let elapsed = current_block - released_from;
        let window = lock_to - released_from;
        locked * elapsed / window
    }

    #[endpoint(unlock)]
    fn unlock(&self) {
        let caller = self.blockchain().get_caller();
        let amount = self.can_unlock_amount(caller.clone());
        require!(amount > 0u64, "nothing to unlock");

        self.locked(&caller).update(|l| *l -= &amount);
        self.total_lock().update(|t| *t -= &amount);
        self.balances(&caller).update(|b| *b += &amount);
        self.last_unlock_block(&caller)
            .set(self.blockchain().get_block_nonce());

        self.unlock_event(&caller, &amount);
    }

    // ========================================================
    // ENDPOINT: transferOwnership
    // Hands mint/lock authority to another address, typically
    // the MasterSupplier — or back to a wallet when reclaimed.
    // ========================================================

    #[endpoint(transferOwnership)]
    fn transfer_ownership(&self, new_owner: ManagedAddress) {
        self.require_token_owner();
        let previous = self.token_owner().get();
        self.token_owner().set(&new_owner);
        self.ownership_transferred_event(&previous, &new_owner);
    }

    fn require_token_owner(&self) {
        let caller = self.blockchain().get_caller();
        require!(caller == self.token_owner().get(), "unauthorized");
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(balanceOf)]
    fn balance_of(&self, addr: ManagedAddress) -> BigUint {
        self.balances(&addr).get()
    }

    #[view(lockOf)]
    fn lock_of(&self, addr: ManagedAddress) -> BigUint {
        self.locked(&addr).get()
    }

    #[view(totalBalanceOf)]
    fn total_balance_of(&self, addr: ManagedAddress) -> BigUint {
        self.balances(&addr).get() + self.locked(&addr).get()
    }

    #[view(allowance)]
    fn allowance(&self, owner: ManagedAddress, spender: ManagedAddress) -> BigUint {
        self.allowances(&owner, &spender).get()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("mint")]
    fn mint_event(&self, #[indexed] to: &ManagedAddress, amount: &BigUint);

    #[event("transfer")]
    fn transfer_event(
        &self,
        #[indexed] from: &ManagedAddress,
        #[indexed] to: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("approval")]
    fn approval_event(
        &self,
        #[indexed] owner: &ManagedAddress,
        #[indexed] spender: &ManagedAddress,
        amount: &BigUint,
    );

    #[event("lock")]
    fn lock_event(&self, #[indexed] addr: &ManagedAddress, amount: &BigUint);

    #[event("unlock")]
    fn unlock_event(&self, #[indexed] addr: &ManagedAddress, amount: &BigUint);

    #[event("ownershipTransferred")]
    fn ownership_transferred_event(
        &self,
        #[indexed] previous_owner: &ManagedAddress,
        #[indexed] new_owner: &ManagedAddress,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getTokenOwner)]
    #[storage_mapper("tokenOwner")]
    fn token_owner(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getCap)]
    #[storage_mapper("cap")]
    fn cap(&self) -> SingleValueMapper<BigUint>;

    #[view(getTotalSupply)]
    #[storage_mapper("totalSupply")]
    fn total_supply(&self) -> SingleValueMapper<BigUint>;

    #[view(getTotalLock)]
    #[storage_mapper("totalLock")]
    fn total_lock(&self) -> SingleValueMapper<BigUint>;

    #[view(getLockFromBlock)]
    #[storage_mapper("lockFromBlock")]
    fn lock_from_block(&self) -> SingleValueMapper<u64>;

    #[view(getLockToBlock)]
    #[storage_mapper("lockToBlock")]
    fn lock_to_block(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("balances")]
    fn balances(&self, addr: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("locked")]
    fn locked(&self, addr: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("allowances")]
    fn allowances(
        &self,
        owner: &ManagedAddress,
        spender: &ManagedAddress,
    ) -> SingleValueMapper<BigUint>;

    #[storage_mapper("lastUnlockBlock")]
    fn last_unlock_block(&self, addr: &ManagedAddress) -> SingleValueMapper<u64>;
}
