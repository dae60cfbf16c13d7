multiversx_sc::imports!();
multiversx_sc::derive_imports!();

/// A registered swap pair: the pair contract plus the LP token it
/// issues. The router burns its LP balance through `removeLiquidity`
/// and swaps leg outputs along the bridge graph.
#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct PairInfo<M: ManagedTypeApi> {
    pub address: ManagedAddress<M>,
    pub lp_token: TokenIdentifier<M>,
}
