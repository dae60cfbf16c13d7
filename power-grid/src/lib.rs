#![no_std]

multiversx_sc::imports!();

pub mod power_token_proxy;

// ============================================================
// PowerGrid — share-based vault over the POWER token
//
// Entering mints shares against the grid's current POWER
// balance; leaving burns shares for the proportional slice of
// whatever the grid holds at that moment. Value routed into
// the grid from outside (fee conversion, direct transfers)
// raises the share price for everyone.
// ============================================================

#[multiversx_sc::contract]
pub trait PowerGrid {
    #[init]
    fn init(&self, power_token_address: ManagedAddress) {
        require!(
            self.blockchain().is_smart_contract(&power_token_address),
            "invalid token address"
        );
        self.power_token_address().set(&power_token_address);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: enter
    // sharesToMint = amount * totalShares / balanceBefore,
    // or 1:1 for the first participant. The balance is read
    // before the pull so the deposit itself cannot dilute the
    // quote.
    // ========================================================

    #[endpoint(enter)]
    fn enter(&self, amount: BigUint) {
        require!(amount > 0u64, "zero amount");
        let caller = self.blockchain().get_caller();
        let own_address = self.blockchain().get_sc_address();
        let token_address = self.power_token_address().get();

        let balance_before: BigUint = self
            .tx()
            .to(&token_address)
            .typed(power_token_proxy::PowerTokenProxy)
            .balance_of(&own_address)
            .returns(ReturnsResult)
            .sync_call_readonly();

        let total_shares = self.total_shares().get();
        let shares_to_mint = if total_shares == 0u64 || balance_before == 0u64 {
            amount.clone()
        } else {
            &amount * &total_shares / &balance_before
        };
        require!(shares_to_mint > 0u64, "deposit too small for shares");

        self.shares(&caller).update(|s| *s += &shares_to_mint);
        self.total_shares().update(|t| *t += &shares_to_mint);

        self.tx()
            .to(&token_address)
            .typed(power_token_proxy::PowerTokenProxy)
            .transfer_from(&caller, &own_address, &amount)
            .sync_call();

        self.enter_event(&caller, &amount, &shares_to_mint);
    }

    // ========================================================
    // ENDPOINT: leave
    // payout = shareAmount * currentBalance / totalShares,
    // rounded down.
    // ========================================================

    #[endpoint(leave)]
    fn leave(&self, share_amount: BigUint) {
        let caller = self.blockchain().get_caller();
        let user_shares = self.shares(&caller).get();
        require!(
            share_amount > 0u64 && share_amount <= user_shares,
            "insufficient share balance"
        );

        let own_address = self.blockchain().get_sc_address();
        let token_address = self.power_token_address().get();
        let balance: BigUint = self
            .tx()
            .to(&token_address)
            .typed(power_token_proxy::PowerTokenProxy)
            .balance_of(&own_address)
            .returns(ReturnsResult)
            .sync_call_readonly();

        let total_shares = self.total_shares().get();
        let payout = &share_amount * &balance / &total_shares;

        self.shares(&caller).update(|s| *s -= &share_amount);
        self.total_shares().update(|t| *t -= &share_amount);

        if payout > 0u64 {
            self.tx()
                .to(&token_address)
                .typed(power_token_proxy::PowerTokenProxy)
                .transfer(&caller, &payout)
                .sync_call();
        }

        self.leave_event(&caller, &payout, &share_amount);
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(sharesOf)]
    fn shares_of(&self, addr: ManagedAddress) -> BigUint {
        self.shares(&addr).get()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("enter")]
    fn enter_event(
        &self,
        #[indexed] caller: &ManagedAddress,
        #[indexed] amount: &BigUint,
        shares: &BigUint,
    );

    #[event("leave")]
    fn leave_event(
        &self,
        #[indexed] caller: &ManagedAddress,
        #[indexed] amount: &BigUint,
        shares: &BigUint,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getPowerTokenAddress)]
    #[storage_mapper("powerTokenAddress")]
    fn power_token_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getTotalShares)]
    #[storage_mapper("totalShares")]
    fn total_shares(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("shares")]
    fn shares(&self, addr: &ManagedAddress) -> SingleValueMapper<BigUint>;
}
