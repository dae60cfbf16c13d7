#![no_std]

multiversx_sc::imports!();

pub mod pair_proxy;
pub mod power_token_proxy;
pub mod types;

use types::PairInfo;

// ============================================================
// PowerRouter — converts protocol fee proceeds into POWER
//
// The router accumulates LP tokens skimmed from trading fees.
// `convert` burns a pair's LP balance back into its two legs,
// then walks each leg through the bridge graph until it lands
// on POWER, and forwards everything to the grid. Bridges are
// admin-configured; any token without one routes through the
// wrapped native coin.
// ============================================================

/// Longest bridge chain a single leg may traverse before the
/// conversion is rejected as unroutable.
const MAX_BRIDGE_HOPS: usize = 4;

#[multiversx_sc::contract]
pub trait PowerRouter {
    #[init]
    fn init(
        &self,
        power_token_address: ManagedAddress,
        power_grid_address: ManagedAddress,
        power_token_id: TokenIdentifier,
        wrapped_native_id: TokenIdentifier,
    ) {
        require!(
            self.blockchain().is_smart_contract(&power_token_address),
            "invalid token address"
        );
        require!(
            self.blockchain().is_smart_contract(&power_grid_address),
            "invalid grid address"
        );
        require!(power_token_id != wrapped_native_id, "invalid bridge");

        self.power_token_address().set(&power_token_address);
        self.power_grid_address().set(&power_grid_address);
        self.power_token_id().set(&power_token_id);
        self.wrapped_native_id().set(&wrapped_native_id);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: setBridge
    // The POWER and wrapped-native labels are terminal nodes
    // of the graph and may not be re-routed; a token may not
    // bridge to itself.
    // ========================================================

    #[only_owner]
    #[endpoint(setBridge)]
    fn set_bridge(&self, token: TokenIdentifier, bridge: TokenIdentifier) {
        require!(
            token != self.power_token_id().get()
                && token != self.wrapped_native_id().get()
                && bridge != token,
            "invalid bridge"
        );
        self.bridges(&token).set(&bridge);
        self.bridge_set_event(&token, &bridge);
    }

    // ========================================================
    // ENDPOINT: registerPair
    // ========================================================

    #[only_owner]
    #[endpoint(registerPair)]
    fn register_pair(
        &self,
        token_a: TokenIdentifier,
        token_b: TokenIdentifier,
        pair_address: ManagedAddress,
        lp_token: TokenIdentifier,
    ) {
        require!(token_a != token_b, "invalid pair");
        require!(
            self.blockchain().is_smart_contract(&pair_address),
            "invalid pair"
        );

        let info = PairInfo {
            address: pair_address,
            lp_token,
        };
        self.pairs(&token_a, &token_b).set(&info);
        self.pairs(&token_b, &token_a).set(&info);
        self.pair_registered_event(&token_a, &token_b, &info.address, &info.lp_token);
    }

    // ========================================================
    // ENDPOINT: depositFees
    // Intake for LP tokens skimmed from trading fees; they sit
    // here until someone triggers a conversion.
    // ========================================================

    #[payable("*")]
    #[endpoint(depositFees)]
    fn deposit_fees(&self) {
        let caller = self.blockchain().get_caller();
        let payment = self.call_value().single_esdt();
        self.fees_deposited_event(&caller, &payment.token_identifier, &payment.amount);
    }

    // ========================================================
    // ENDPOINT: convert / convertMultiple
    // Restricted to user accounts so a contract cannot sandwich
    // the swaps inside its own transaction.
    // ========================================================

    #[endpoint(convert)]
    fn convert(&self, token_a: TokenIdentifier, token_b: TokenIdentifier) {
        self.require_eoa();
        self.convert_pair(&token_a, &token_b);
        self.forward_to_grid();
    }

    #[endpoint(convertMultiple)]
    fn convert_multiple(
        &self,
        pairs: MultiValueEncoded<MultiValue2<TokenIdentifier, TokenIdentifier>>,
    ) {
        self.require_eoa();
        for pair in pairs {
            let (token_a, token_b) = pair.into_tuple();
            self.convert_pair(&token_a, &token_b);
        }
        self.forward_to_grid();
    }

    fn convert_pair(&self, token_a: &TokenIdentifier, token_b: &TokenIdentifier) {
        let pair_mapper = self.pairs(token_a, token_b);
        require!(!pair_mapper.is_empty(), "invalid pair");
        let pair = pair_mapper.get();

        let lp_balance = self.blockchain().get_sc_balance(
            &EgldOrEsdtTokenIdentifier::esdt(pair.lp_token.clone()),
            0,
        );
        let mut power_out = BigUint::zero();
        if lp_balance > 0 {
            let (amount_a, amount_b) = self
                .tx()
                .to(&pair.address)
                .typed(pair_proxy::PairProxy)
                .remove_liquidity()
                .single_esdt(&pair.lp_token, 0, &lp_balance)
                .returns(ReturnsResult)
                .sync_call()
                .into_tuple();

            power_out += self.to_power(token_a.clone(), amount_a);
            power_out += self.to_power(token_b.clone(), amount_b);
        }

        self.convert_event(token_a, token_b, &lp_balance, &power_out);
    }

    /// Swaps `amount` of `token` along the bridge graph until the
    /// proceeds are denominated in POWER.
    fn to_power(&self, token: TokenIdentifier, amount: BigUint) -> BigUint {
        let power_token_id = self.power_token_id().get();
        let mut token = token;
        let mut amount = amount;
        let mut hops = 0;
        while token != power_token_id {
            if amount == 0 {
                return amount;
            }
            require!(hops < MAX_BRIDGE_HOPS, "no conversion path");
            let next = self.resolve_bridge(&token);
            amount = self.swap_leg(&token, &next, amount);
            token = next;
            hops += 1;
        }
        amount
    }

    fn swap_leg(
        &self,
        token_in: &TokenIdentifier,
        token_out: &TokenIdentifier,
        amount: BigUint,
    ) -> BigUint {
        let pair_mapper = self.pairs(token_in, token_out);
        require!(!pair_mapper.is_empty(), "no conversion path");
        let pair = pair_mapper.get();

        self.tx()
            .to(&pair.address)
            .typed(pair_proxy::PairProxy)
            .swap_fixed_input(token_out)
            .single_esdt(token_in, 0, &amount)
            .returns(ReturnsResult)
            .sync_call()
    }

    /// Moves the router's whole POWER balance into the grid, where
    /// it raises the share price for every participant.
    fn forward_to_grid(&self) {
        let power_token_address = self.power_token_address().get();
        let own_address = self.blockchain().get_sc_address();
        let balance: BigUint = self
            .tx()
            .to(&power_token_address)
            .typed(power_token_proxy::PowerTokenProxy)
            .balance_of(&own_address)
            .returns(ReturnsResult)
            .sync_call_readonly();
        if balance > 0 {
            self.tx()
                .to(&power_token_address)
                .typed(power_token_proxy::PowerTokenProxy)
                .transfer(self.power_grid_address().get(), &balance)
                .sync_call();
            self.forwarded_event(&balance);
        }
    }

    fn resolve_bridge(&self, token: &TokenIdentifier) -> TokenIdentifier {
        if *token == self.wrapped_native_id().get() {
            return self.power_token_id().get();
        }
        let mapper = self.bridges(token);
        if mapper.is_empty() {
            self.wrapped_native_id().get()
        } else {
            mapper.get()
        }
    }

    fn require_eoa(&self) {
        let caller = self.blockchain().get_caller();
        require!(
            !self.blockchain().is_smart_contract(&caller),
            "must use EOA"
        );
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(bridgeFor)]
    fn bridge_for(&self, token: TokenIdentifier) -> TokenIdentifier {
        self.resolve_bridge(&token)
    }

    #[view(getPair)]
    fn get_pair(&self, token_a: TokenIdentifier, token_b: TokenIdentifier) -> PairInfo<Self::Api> {
        let mapper = self.pairs(&token_a, &token_b);
        require!(!mapper.is_empty(), "invalid pair");
        mapper.get()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("bridgeSet")]
    fn bridge_set_event(
        &self,
        #[indexed] token: &TokenIdentifier,
        #[indexed] bridge: &TokenIdentifier,
    );

    #[event("pairRegistered")]
    fn pair_registered_event(
        &self,
        #[indexed] token_a: &TokenIdentifier,
        #[indexed] token_b: &TokenIdentifier,
        #[indexed] pair_address: &ManagedAddress,
        lp_token: &TokenIdentifier,
    );

    #[event("feesDeposited")]
    fn fees_deposited_event(
        &self,
        #[indexed] caller: &ManagedAddress,
        #[indexed] token: &TokenIdentifier,
        amount: &BigUint,
    );

    #[event("convert")]
    fn convert_event(
        &self,
        #[indexed] token_a: &TokenIdentifier,
        #[indexed] token_b: &TokenIdentifier,
        #[indexed] lp_amount: &BigUint,
        power_out: &BigUint,
    );

    #[event("forwarded")]
    fn forwarded_event(&self, amount: &BigUint);

    // ========================================================
    // STORAGE
    // ========================================================

    #[view(getPowerTokenAddress)]
    #[storage_mapper("powerTokenAddress")]
    fn power_token_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getPowerGridAddress)]
    #[storage_mapper("powerGridAddress")]
    fn power_grid_address(&self) -> SingleValueMapper<ManagedAddress>;

    #[view(getPowerTokenId)]
    #[storage_mapper("powerTokenId")]
    fn power_token_id(&self) -> SingleValueMapper<TokenIdentifier>;

    #[view(getWrappedNativeId)]
    #[storage_mapper("wrappedNativeId")]
    fn wrapped_native_id(&self) -> SingleValueMapper<TokenIdentifier>;

    #[storage_mapper("bridges")]
    fn bridges(&self, token: &TokenIdentifier) -> SingleValueMapper<TokenIdentifier>;

    #[storage_mapper("pairs")]
    fn pairs(
        &self,
        token_a: &TokenIdentifier,
        token_b: &TokenIdentifier,
    ) -> SingleValueMapper<PairInfo<Self::Api>>;
}
