multiversx_sc::imports!();

/// Basis points denominator
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Default deposit fee rates: the depositor is credited 99.25%
/// of the deposit, the dev address is credited the remaining
/// 0.75% as stake in the same pool.
pub const DEFAULT_USER_DEPOSIT_FEE: u64 = 75;
pub const DEFAULT_DEV_DEPOSIT_FEE: u64 = 9_925;

/// Default withdrawal fee rates: 92% of the returned stake
/// goes back to the withdrawer, 8% to the dev address.
pub const DEFAULT_USER_WITHDRAW_FEE: u64 = 800;
pub const DEFAULT_DEV_WITHDRAW_FEE: u64 = 9_200;

/// Default split of each pool's per-settlement reward between
/// the named protocol funds; the remainder goes to farmers.
pub const DEFAULT_PERCENT_FOR_DEV: u64 = 10;
pub const DEFAULT_PERCENT_FOR_LP: u64 = 5;
pub const DEFAULT_PERCENT_FOR_COM: u64 = 5;
pub const DEFAULT_PERCENT_FOR_FOUNDERS: u64 = 5;

/// Portion of every claimed reward locked in the token
/// contract, vesting on the token's own schedule.
pub const DEFAULT_PERCENT_LOCK_REWARD: u64 = 75;

// ============================================================
// Fee Policy
//
// Four independently settable basis-point rates plus the
// emission split percentages. Rates are not required to sum
// to any fixed total; each credit is computed uniformly as
// amount - floor(amount * fee_bps / 10000).
// ============================================================

#[multiversx_sc::module]
pub trait FeeModule: crate::auth::AuthModule {
    /// (net, fee) with fee = floor(amount * fee_bps / 10000).
    fn apply_fee(&self, amount: &BigUint, fee_bps: u64) -> (BigUint, BigUint) {
        let fee = amount * fee_bps / BPS_DENOMINATOR;
        let net = amount - &fee;
        (net, fee)
    }

    #[endpoint(setUserDepositFee)]
    fn set_user_deposit_fee(&self, fee_bps: u64) {
        self.require_authorized();
        self.require_valid_fee(fee_bps);
        self.user_deposit_fee().set(fee_bps);
    }

    #[endpoint(setDevDepositFee)]
    fn set_dev_deposit_fee(&self, fee_bps: u64) {
        self.require_authorized();
        self.require_valid_fee(fee_bps);
        self.dev_deposit_fee().set(fee_bps);
    }

    #[endpoint(setUserWithdrawFee)]
    fn set_user_withdraw_fee(&self, fee_bps: u64) {
        self.require_authorized();
        self.require_valid_fee(fee_bps);
        self.user_withdraw_fee().set(fee_bps);
    }

    #[endpoint(setDevWithdrawFee)]
    fn set_dev_withdraw_fee(&self, fee_bps: u64) {
        self.require_authorized();
        self.require_valid_fee(fee_bps);
        self.dev_withdraw_fee().set(fee_bps);
    }

    /// The four fund percentages are set together so the
    /// sum <= 100 invariant is checked in one place.
    #[endpoint(setEmissionSplit)]
    fn set_emission_split(
        &self,
        percent_for_dev: u64,
        percent_for_lp: u64,
        percent_for_com: u64,
        percent_for_founders: u64,
    ) {
        self.require_authorized();
        require!(
            percent_for_dev + percent_for_lp + percent_for_com + percent_for_founders <= 100,
            "invalid fee rate"
        );
        self.percent_for_dev().set(percent_for_dev);
        self.percent_for_lp().set(percent_for_lp);
        self.percent_for_com().set(percent_for_com);
        self.percent_for_founders().set(percent_for_founders);
    }

    #[endpoint(setPercentLockReward)]
    fn set_percent_lock_reward(&self, percent: u64) {
        self.require_authorized();
        require!(percent <= 100, "invalid fee rate");
        self.percent_lock_reward().set(percent);
    }

    fn require_valid_fee(&self, fee_bps: u64) {
        require!(fee_bps <= BPS_DENOMINATOR, "invalid fee rate");
    }

    fn init_default_fees(&self) {
        self.user_deposit_fee().set(DEFAULT_USER_DEPOSIT_FEE);
        self.dev_deposit_fee().set(DEFAULT_DEV_DEPOSIT_FEE);
        self.user_withdraw_fee().set(DEFAULT_USER_WITHDRAW_FEE);
        self.dev_withdraw_fee().set(DEFAULT_DEV_WITHDRAW_FEE);
        self.percent_for_dev().set(DEFAULT_PERCENT_FOR_DEV);
        self.percent_for_lp().set(DEFAULT_PERCENT_FOR_LP);
        self.percent_for_com().set(DEFAULT_PERCENT_FOR_COM);
        self.percent_for_founders().set(DEFAULT_PERCENT_FOR_FOUNDERS);
        self.percent_lock_reward().set(DEFAULT_PERCENT_LOCK_REWARD);
    }

    #[view(getUserDepositFee)]
    #[storage_mapper("userDepositFee")]
    fn user_deposit_fee(&self) -> SingleValueMapper<u64>;

    #[view(getDevDepositFee)]
    #[storage_mapper("devDepositFee")]
    fn dev_deposit_fee(&self) -> SingleValueMapper<u64>;

    #[view(getUserWithdrawFee)]
    #[storage_mapper("userWithdrawFee")]
    fn user_withdraw_fee(&self) -> SingleValueMapper<u64>;

    #[view(getDevWithdrawFee)]
    #[storage_mapper("devWithdrawFee")]
    fn dev_withdraw_fee(&self) -> SingleValueMapper<u64>;

    #[view(getPercentForDev)]
    #[storage_mapper("percentForDev")]
    fn percent_for_dev(&self) -> SingleValueMapper<u64>;

    #[view(getPercentForLp)]
    #[storage_mapper("percentForLp")]
    fn percent_for_lp(&self) -> SingleValueMapper<u64>;

    #[view(getPercentForCom)]
    #[storage_mapper("percentForCom")]
    fn percent_for_com(&self) -> SingleValueMapper<u64>;

    #[view(getPercentForFounders)]
    #[storage_mapper("percentForFounders")]
    fn percent_for_founders(&self) -> SingleValueMapper<u64>;

    #[view(getPercentLockReward)]
    #[storage_mapper("percentLockReward")]
    fn percent_lock_reward(&self) -> SingleValueMapper<u64>;
}
