//! Initial population builders. Every builder returns an `npop x n` matrix
//! in problem space with fixed variables pinned to their lower bound.

use ndarray::{Array1, Array2};
use rand::Rng;
use rand::seq::SliceRandom;

/// Latin hypercube: one sample per stratum and per dimension, strata shuffled
/// independently for each dimension.
pub(crate) fn init_latin_hypercube<R: Rng + ?Sized>(
    npop: usize,
    lower: &Array1<f64>,
    upper: &Array1<f64>,
    is_free: &[bool],
    rng: &mut R,
) -> Array2<f64> {
    let n = lower.len();
    let mut pop = Array2::<f64>::zeros((npop, n));
    for j in 0..n {
        if !is_free[j] {
            pop.column_mut(j).fill(lower[j]);
            continue;
        }
        let mut strata: Vec<f64> = (0..npop)
            .map(|k| (k as f64 + rng.random::<f64>()) / npop as f64)
            .collect();
        strata.shuffle(rng);
        for (i, u) in strata.into_iter().enumerate() {
            pop[(i, j)] = lower[j] + u * (upper[j] - lower[j]);
        }
    }
    pop
}

pub(crate) fn init_random<R: Rng + ?Sized>(
    npop: usize,
    lower: &Array1<f64>,
    upper: &Array1<f64>,
    is_free: &[bool],
    rng: &mut R,
) -> Array2<f64> {
    let n = lower.len();
    Array2::from_shape_fn((npop, n), |(_, j)| {
        if is_free[j] {
            lower[j] + rng.random::<f64>() * (upper[j] - lower[j])
        } else {
            lower[j]
        }
    })
}

/// Caller supplied population, clipped into the box.
pub(crate) fn init_from_population(
    init: &Array2<f64>,
    lower: &Array1<f64>,
    upper: &Array1<f64>,
    is_free: &[bool],
) -> Array2<f64> {
    let mut pop = init.clone();
    for mut row in pop.rows_mut() {
        for j in 0..row.len() {
            row[j] = if is_free[j] { row[j].clamp(lower[j], upper[j]) } else { lower[j] };
        }
    }
    pop
}
