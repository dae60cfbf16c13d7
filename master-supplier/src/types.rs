multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Pool Info — one entry per registered stake token
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct PoolInfo<M: ManagedTypeApi> {
    /// The depositable ESDT. Unique per pool.
    pub stake_token: TokenIdentifier<M>,
    /// Share of total emission: weight / sum of all weights.
    pub alloc_weight: u64,
    /// Last block height at which accumulation was applied.
    pub last_reward_block: u64,
    /// Cumulative reward per staked unit since pool creation,
    /// scaled by REWARD_SCALE. Only ever increases; frozen
    /// while total_staked == 0.
    pub acc_reward_per_share: BigUint<M>,
    /// Sum of all user balances in the pool, post-fee.
    pub total_staked: BigUint<M>,
}

// ============================================================
// User Info — per (pool, participant) accounting record
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct UserInfo<M: ManagedTypeApi> {
    /// Staked balance, post-deposit-fee.
    pub amount: BigUint<M>,
    /// amount * acc_reward_per_share at last settlement,
    /// scaled. Subtracted from the same product at the next
    /// settlement to obtain pending reward.
    pub reward_debt: BigUint<M>,
}

impl<M: ManagedTypeApi> Default for UserInfo<M> {
    fn default() -> Self {
        UserInfo {
            amount: BigUint::zero(),
            reward_debt: BigUint::zero(),
        }
    }
}
