use ndarray::{Array1, Array2};
use rayon::prelude::*;

/// Parallel evaluation configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Evaluate individuals and build trials on the rayon pool
    pub enabled: bool,
    /// Size of the global rayon pool (None = rayon default)
    pub num_threads: Option<usize>,
}

impl ParallelConfig {
    /// SciPy style `workers`: 1 is serial, -1 uses every core, n > 1 uses n threads.
    pub fn from_workers(workers: i64) -> Option<Self> {
        match workers {
            1 => Some(Self::default()),
            -1 => Some(Self { enabled: true, num_threads: None }),
            n if n > 1 => Some(Self { enabled: true, num_threads: Some(n as usize) }),
            _ => None,
        }
    }
}

/// Evaluate every row of `population`
pub fn evaluate_population<F>(
    population: &Array2<f64>,
    func: &F,
    config: &ParallelConfig,
) -> Array1<f64>
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    let rows: Vec<Array1<f64>> = population.rows().into_iter().map(|r| r.to_owned()).collect();
    Array1::from_vec(evaluate_trials(&rows, func, config))
}

/// Evaluate a batch of trial vectors, preserving order
pub fn evaluate_trials<F>(trials: &[Array1<f64>], func: &F, config: &ParallelConfig) -> Vec<f64>
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    if !config.enabled || trials.len() < 4 {
        return trials.iter().map(func).collect();
    }
    trials.par_iter().map(func).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_and_parallel_agree() {
        let pop = Array2::from_shape_fn((16, 3), |(i, j)| (i as f64) - (j as f64));
        let f = |x: &Array1<f64>| x.iter().map(|v| v * v).sum::<f64>();
        let serial = evaluate_population(&pop, &f, &ParallelConfig::default());
        let parallel = evaluate_population(
            &pop,
            &f,
            &ParallelConfig { enabled: true, num_threads: None },
        );
        assert_eq!(serial, parallel);
        assert_eq!(serial[1], 1.0 + 0.0 + 1.0);
    }

    #[test]
    fn test_workers_mapping() {
        assert_eq!(ParallelConfig::from_workers(1), Some(ParallelConfig::default()));
        assert_eq!(ParallelConfig::from_workers(-1).map(|p| p.enabled), Some(true));
        assert_eq!(ParallelConfig::from_workers(4).and_then(|p| p.num_threads), Some(4));
        assert_eq!(ParallelConfig::from_workers(0), None);
    }
}
