use ndarray::Array1;
use rand::Rng;

/// Binomial crossover: each gene comes from the donor with probability `cr`,
/// and one random gene always does.
pub(crate) fn binomial_crossover<R: Rng + ?Sized>(
    target: &Array1<f64>,
    donor: &Array1<f64>,
    cr: f64,
    rng: &mut R,
) -> Array1<f64> {
    let n = target.len();
    let jrand = rng.random_range(0..n);
    let mut trial = target.clone();
    for j in 0..n {
        if j == jrand || rng.random::<f64>() < cr {
            trial[j] = donor[j];
        }
    }
    trial
}

/// Exponential crossover: copy a contiguous (cyclic) run of donor genes whose
/// length is geometric in `cr`, at least one gene long.
pub(crate) fn exponential_crossover<R: Rng + ?Sized>(
    target: &Array1<f64>,
    donor: &Array1<f64>,
    cr: f64,
    rng: &mut R,
) -> Array1<f64> {
    let n = target.len();
    let mut trial = target.clone();
    let mut j = rng.random_range(0..n);
    for copied in 1..=n {
        trial[j] = donor[j];
        j = (j + 1) % n;
        if copied == n || rng.random::<f64>() >= cr {
            break;
        }
    }
    trial
}
