//! Differential evolution as an [`Algorithm`].
//!
//! Each call to [`DeAdapter::evolve`] runs the solver once, starting from the
//! population's decision vectors, and writes the best point found over the
//! population's worst individual. Options are forwarded to the solver as
//! given; the objective, the bounds and the starting population always come
//! from the population itself.
//!
//! # Example
//!
//! ```rust
//! use ndarray::{Array1, array};
//! use popde::{Algorithm, DeAdapter, Population, Problem, ProblemHandle, SolverOptions};
//!
//! struct Sphere;
//!
//! impl Problem for Sphere {
//!     fn fitness(&self, x: &Array1<f64>) -> Array1<f64> {
//!         array![x.dot(x)]
//!     }
//!     fn bounds(&self) -> (Array1<f64>, Array1<f64>) {
//!         (array![-5.0, -5.0], array![5.0, 5.0])
//!     }
//! }
//!
//! let pop = Population::new(ProblemHandle::new(Sphere)?, 10, 42)?;
//! let mut algo = DeAdapter::new(SolverOptions::new().with("seed", 1).with("maxiter", 100))?;
//! let pop = algo.evolve(pop)?;
//! let report = algo.result().expect("evolve stored a result");
//! assert_eq!(pop.champion_f().map(|f| f[0]), Some(report.fun));
//! # Ok::<(), popde::PopdeError>(())
//! ```

use std::sync::Arc;

use ndarray::{Array1, array};
use parking_lot::Mutex;
use popde_de::{CallbackAction, DEConfig, DEIntermediate, DEReport, Init, differential_evolution};

use crate::algorithm::Algorithm;
use crate::error::{PopdeError, Result, UnsupportedProperty};
use crate::options::SolverOptions;
use crate::population::Population;

/// Runs the DE solver on a population.
#[derive(Debug, Clone, Default)]
pub struct DeAdapter {
    options: SolverOptions,
    result: Option<DEReport>,
}

impl DeAdapter {
    /// Store `options` for later solver calls.
    ///
    /// # Errors
    ///
    /// [`PopdeError::InvalidArgument`] if `options` holds `func`, `bounds`,
    /// `args`, `popsize` or `init`. Other keys are only checked by the solver
    /// when [`DeAdapter::evolve`] runs.
    pub fn new(options: SolverOptions) -> Result<Self> {
        options.check_reserved()?;
        Ok(Self { options, result: None })
    }

    pub fn options(&self) -> &SolverOptions {
        &self.options
    }

    /// Report of the last successful solver run, if any.
    pub fn result(&self) -> Option<&DEReport> {
        self.result.as_ref()
    }

    fn check_problem(pop: &Population) -> Result<()> {
        let prob = pop.problem();
        let unsupported = |property| {
            Err(PopdeError::UnsupportedProblem { property, problem: prob.name() })
        };
        if prob.nc() != 0 {
            return unsupported(UnsupportedProperty::Constrained);
        }
        if prob.nobj() > 1 {
            return unsupported(UnsupportedProperty::MultiObjective);
        }
        if prob.is_stochastic() {
            return unsupported(UnsupportedProperty::Stochastic);
        }
        Ok(())
    }
}

impl Algorithm for DeAdapter {
    /// Run the solver once and replace the worst individual with its best point.
    ///
    /// An empty population is left untouched without calling the solver. On
    /// error neither the population nor the stored result change.
    fn evolve_in_place(&mut self, pop: &mut Population) -> Result<()> {
        Self::check_problem(pop)?;
        if pop.is_empty() {
            log::debug!("{}: empty population, nothing to evolve", self.name());
            return Ok(());
        }

        let mut config = DEConfig::from_options(self.options.as_map())?;
        config.init = Init::Population(pop.get_x());

        // first fitness failure seen by the objective; the solver is told to
        // stop at the end of the generation in which it happened
        let failure: Arc<Mutex<Option<PopdeError>>> = Arc::new(Mutex::new(None));
        let watch = Arc::clone(&failure);
        config.callback = Some(Box::new(move |_: &DEIntermediate| {
            if watch.lock().is_some() { CallbackAction::Stop } else { CallbackAction::Continue }
        }));

        let prob = pop.problem();
        let (lower, upper) = prob.bounds();
        let bounds: Vec<(f64, f64)> =
            lower.iter().zip(upper.iter()).map(|(&lo, &hi)| (lo, hi)).collect();
        let objective = |x: &Array1<f64>| -> f64 {
            match prob.fitness(x) {
                Ok(f) => f[0],
                Err(err) => {
                    failure.lock().get_or_insert(err);
                    f64::INFINITY
                }
            }
        };

        log::debug!(
            "{}: solving {} ({} dimensions) from {} individuals",
            self.name(),
            prob.name(),
            bounds.len(),
            pop.len()
        );
        let report = differential_evolution(&objective, &bounds, config)?;
        if let Some(err) = failure.lock().take() {
            return Err(err);
        }
        log::debug!(
            "{}: {} after {} generations, {} evaluations, best f={:.6e}",
            self.name(),
            report.message,
            report.nit,
            report.nfev,
            report.fun
        );

        let x = report.x.clone();
        let f = array![report.fun];
        self.result = Some(report);

        let worst = pop.worst_idx()?;
        pop.set_xf(worst, x, f)
    }

    fn name(&self) -> String {
        "DE adapter".to_string()
    }

    fn extra_info(&self) -> String {
        self.options.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Problem, ProblemHandle};

    struct Abs;

    impl Problem for Abs {
        fn fitness(&self, x: &Array1<f64>) -> Array1<f64> {
            array![x.iter().map(|v| v.abs()).sum::<f64>()]
        }
        fn bounds(&self) -> (Array1<f64>, Array1<f64>) {
            (array![-3.0, -3.0, -3.0], array![3.0, 3.0, 3.0])
        }
    }

    /// Returns a fitness vector of the wrong length once `x[0]` is negative.
    struct Faulty;

    impl Problem for Faulty {
        fn fitness(&self, x: &Array1<f64>) -> Array1<f64> {
            if x[0] < 0.0 { array![0.0, 0.0] } else { array![x[0]] }
        }
        fn bounds(&self) -> (Array1<f64>, Array1<f64>) {
            (array![-1.0], array![1.0])
        }
    }

    #[test]
    fn test_result_is_none_until_evolve() {
        let algo = DeAdapter::default();
        assert!(algo.result().is_none());
        assert_eq!(algo.name(), "DE adapter");
        assert_eq!(algo.extra_info(), "\tOptions: none");
    }

    #[test]
    fn test_evolve_replaces_previous_result() {
        let mut algo = DeAdapter::new(SolverOptions::new().with("seed", 2).with("maxiter", 5))
            .unwrap();
        let pop = Population::new(ProblemHandle::new(Abs).unwrap(), 8, 1).unwrap();
        let pop = algo.evolve(pop).unwrap();
        let first = algo.result().map(|r| r.fun).unwrap();
        let fevals = pop.problem().fevals();

        // the first best point is now part of the starting population
        let pop = algo.evolve(pop).unwrap();
        let second = algo.result().unwrap();
        assert!(second.fun <= first);
        assert_eq!(second.population.nrows(), 8);
        assert_eq!(pop.problem().fevals(), fevals + second.nfev as u64);
    }

    #[test]
    fn test_fitness_failure_is_reported_and_population_kept() {
        let mut pop = Population::new(ProblemHandle::new(Faulty).unwrap(), 0, 0).unwrap();
        for v in [0.1, 0.2, 0.3, 0.4, 0.5] {
            pop.push_back(array![v]).unwrap();
        }
        // trials clipped into [-1, 1] will sooner or later land below zero
        let opts = SolverOptions::new().with("seed", 0).with("mutation", 1.9).with("maxiter", 200);
        let mut algo = DeAdapter::new(opts).unwrap();
        let before = pop.get_x();
        let err = algo.evolve_in_place(&mut pop).unwrap_err();
        assert!(matches!(err, PopdeError::DimensionMismatch { what: "fitness vector", .. }));
        assert!(algo.result().is_none());
        assert_eq!(pop.get_x(), before);
    }
}
