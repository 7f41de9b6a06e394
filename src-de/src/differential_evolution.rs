use crate::{DEConfig, DEReport, DifferentialEvolution, Result};
use ndarray::Array1;

/// Convenience function mirroring SciPy's API shape:
/// - `func`: objective function mapping x -> f(x)
/// - `bounds`: vector of (lower, upper) pairs, one per dimension
/// - `config`: DE configuration; an explicit starting population goes in
///   `config.init` as `Init::Population`
///
/// # Errors
///
/// Bounds with upper < lower, and every configuration check of
/// [`DifferentialEvolution::solve`].
pub fn differential_evolution<F>(func: &F, bounds: &[(f64, f64)], config: DEConfig) -> Result<DEReport>
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    let lower: Array1<f64> = bounds.iter().map(|&(lo, _)| lo).collect();
    let upper: Array1<f64> = bounds.iter().map(|&(_, hi)| hi).collect();
    let mut de = DifferentialEvolution::new(func, lower, upper)?;
    *de.config_mut() = config;
    de.solve()
}
