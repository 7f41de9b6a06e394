//! Donor vector construction for every supported strategy.

use ndarray::{Array1, Array2, Zip};
use rand::Rng;

use crate::Strategy;
use crate::distinct_indices::distinct_indices;

/// Build the donor for individual `i`. Donor indices are distinct and never `i`.
pub(crate) fn mutant<R: Rng + ?Sized>(
    strategy: Strategy,
    i: usize,
    pop: &Array2<f64>,
    best_idx: usize,
    f: f64,
    rng: &mut R,
) -> Array1<f64> {
    match strategy {
        Strategy::Best1Bin | Strategy::Best1Exp => {
            let r = distinct_indices(i, 2, pop.nrows(), rng);
            Zip::from(pop.row(best_idx))
                .and(pop.row(r[0]))
                .and(pop.row(r[1]))
                .map_collect(|&b, &x1, &x2| b + f * (x1 - x2))
        }
        Strategy::Rand1Bin | Strategy::Rand1Exp => {
            let r = distinct_indices(i, 3, pop.nrows(), rng);
            Zip::from(pop.row(r[0]))
                .and(pop.row(r[1]))
                .and(pop.row(r[2]))
                .map_collect(|&x0, &x1, &x2| x0 + f * (x1 - x2))
        }
        Strategy::Best2Bin | Strategy::Best2Exp => {
            let r = distinct_indices(i, 4, pop.nrows(), rng);
            Zip::from(pop.row(best_idx))
                .and(pop.row(r[0]))
                .and(pop.row(r[1]))
                .and(pop.row(r[2]))
                .and(pop.row(r[3]))
                .map_collect(|&b, &x0, &x1, &x2, &x3| b + f * (x0 + x1 - x2 - x3))
        }
        Strategy::Rand2Bin | Strategy::Rand2Exp => {
            let r = distinct_indices(i, 5, pop.nrows(), rng);
            Zip::from(pop.row(r[0]))
                .and(pop.row(r[1]))
                .and(pop.row(r[2]))
                .and(pop.row(r[3]))
                .and(pop.row(r[4]))
                .map_collect(|&x0, &x1, &x2, &x3, &x4| x0 + f * (x1 + x2 - x3 - x4))
        }
        Strategy::CurrentToBest1Bin | Strategy::CurrentToBest1Exp => {
            let r = distinct_indices(i, 2, pop.nrows(), rng);
            Zip::from(pop.row(i))
                .and(pop.row(best_idx))
                .and(pop.row(r[0]))
                .and(pop.row(r[1]))
                .map_collect(|&c, &b, &x1, &x2| c + f * (b - c + x1 - x2))
        }
        Strategy::RandToBest1Bin | Strategy::RandToBest1Exp => {
            let r = distinct_indices(i, 3, pop.nrows(), rng);
            Zip::from(pop.row(r[0]))
                .and(pop.row(best_idx))
                .and(pop.row(r[1]))
                .and(pop.row(r[2]))
                .map_collect(|&x0, &b, &x1, &x2| x0 + f * (b - x0 + x1 - x2))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_zero_factor_returns_base_vector() {
        let pop = Array2::from_shape_fn((6, 3), |(i, j)| (i * 3 + j) as f64);
        let mut rng = StdRng::seed_from_u64(5);
        let donor = mutant(Strategy::Best1Bin, 0, &pop, 4, 0.0, &mut rng);
        assert_eq!(donor, pop.row(4).to_owned());
        let donor = mutant(Strategy::CurrentToBest1Exp, 2, &pop, 4, 0.0, &mut rng);
        assert_eq!(donor, pop.row(2).to_owned());
    }

    #[test]
    fn test_identical_population_has_no_spread() {
        let pop = Array2::from_elem((6, 2), 1.5);
        let mut rng = StdRng::seed_from_u64(6);
        for strategy in [
            Strategy::Rand1Bin,
            Strategy::Rand2Exp,
            Strategy::Best2Bin,
            Strategy::RandToBest1Bin,
        ] {
            let donor = mutant(strategy, 1, &pop, 0, 0.9, &mut rng);
            assert!(donor.iter().all(|&v| (v - 1.5).abs() < 1e-12), "{:?}", strategy);
        }
    }
}
