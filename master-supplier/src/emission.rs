multiversx_sc::imports!();

/// Epochs past this point contribute nothing: the per-block
/// reward has been halved to zero long before.
const MAX_HALVING_EPOCHS: u64 = 128;

/// Total reward emitted over the half-open block interval
/// [from, to), summed piecewise per halving epoch. The
/// per-block reward at epoch e is floor(rpb / 2^e); a single
/// epoch's rate is never applied across a halving boundary.
///
/// Pure: depends only on its arguments, so the accounting
/// engine can be tested in isolation.
pub fn emission_between<M: ManagedTypeApi>(
    rewards_per_block: &BigUint<M>,
    start_block: u64,
    halving_interval: u64,
    from: u64,
    to: u64,
) -> BigUint<M> {
    let mut total = BigUint::zero();
    let mut cursor = core::cmp::max(from, start_block);
    if to <= cursor {
        return total;
    }

    let mut epoch = (cursor - start_block) / halving_interval;
    if epoch >= MAX_HALVING_EPOCHS {
        return total;
    }

    let mut per_block = rewards_per_block.clone();
    for _ in 0..epoch {
        per_block /= 2u64;
    }

    while cursor < to && per_block > 0u64 {
        // Saturating: wasm builds run without overflow checks, and
        // a wrapped epoch end would underflow the span below.
        let epoch_end =
            start_block.saturating_add((epoch + 1).saturating_mul(halving_interval));
        let upper = core::cmp::min(to, epoch_end);
        total += &per_block * (upper - cursor);
        cursor = upper;
        epoch += 1;
        per_block /= 2u64;
    }

    total
}

// ============================================================
// Emission Schedule — immutable deployment parameters plus a
// view over the pure interval function.
// ============================================================

#[multiversx_sc::module]
pub trait EmissionModule {
    /// Reward emitted between two block heights, ignoring pool
    /// weights. Mostly useful for off-chain inspection.
    #[view(emissionBetween)]
    fn emission_between_view(&self, from: u64, to: u64) -> BigUint {
        emission_between(
            &self.rewards_per_block().get(),
            self.rewards_start_block().get(),
            self.halving_interval().get(),
            from,
            to,
        )
    }

    #[view(getRewardsPerBlock)]
    #[storage_mapper("rewardsPerBlock")]
    fn rewards_per_block(&self) -> SingleValueMapper<BigUint>;

    #[view(getRewardsStartBlock)]
    #[storage_mapper("rewardsStartBlock")]
    fn rewards_start_block(&self) -> SingleValueMapper<u64>;

    #[view(getHalvingInterval)]
    #[storage_mapper("halvingInterval")]
    fn halving_interval(&self) -> SingleValueMapper<u64>;
}
