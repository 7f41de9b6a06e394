use rand::Rng;
use rand::seq::index::sample;

/// Draw `count` distinct indices from `0..pool_size`, none equal to `exclude`.
pub(crate) fn distinct_indices<R: Rng + ?Sized>(
    exclude: usize,
    count: usize,
    pool_size: usize,
    rng: &mut R,
) -> Vec<usize> {
    debug_assert!(count < pool_size);
    // sample from the pool minus one slot, then shift past the excluded index
    sample(rng, pool_size - 1, count)
        .into_iter()
        .map(|k| if k >= exclude { k + 1 } else { k })
        .collect()
}
