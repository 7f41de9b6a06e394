//! Differential Evolution (DE) global optimizer in pure Rust using ndarray
//!
//! The call shape follows SciPy's `scipy.optimize.differential_evolution`:
//! an objective, a list of `(min, max)` bounds and a configuration, returning
//! a report with the best point, its value and the final population.
//!
//! Supported features:
//! - Box constraints (lower/upper bounds)
//! - Strategies: best1, rand1, rand2, best2, currenttobest1, randtobest1,
//!   each with binomial or exponential crossover
//! - Mutation as a fixed factor or dithering in a range [min,max)
//! - Initialization: Latin Hypercube Sampling (LHS), random uniform, or an
//!   explicit population matrix
//! - Optional initial guess `x0` overriding the best member after init
//! - Convergence by std(pop_f) <= atol + tol * |mean(pop_f)|
//! - Optional integrality mask, coordinate polishing, per-generation callback
//! - Configuration from a name/value option map (`DEConfig::from_options`)
//!
//! # Example
//!
//! ```rust
//! use popde_de::{differential_evolution, DEConfigBuilder};
//!
//! let report = differential_evolution(
//!     &|x: &ndarray::Array1<f64>| x.iter().map(|&xi| xi * xi).sum::<f64>(),
//!     &[(-5.0, 5.0), (-5.0, 5.0)],
//!     DEConfigBuilder::new().maxiter(200).seed(42).build(),
//! )
//! .expect("valid configuration");
//! assert!(report.fun < 1e-4);
//! ```

use std::fmt;
use std::str::FromStr;

use log::Level;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub mod error;
pub use error::{DEError, Result};

pub mod apply_integrality;
pub mod crossover;
pub mod distinct_indices;
pub mod init;
pub mod mutant;

pub mod differential_evolution;
pub mod impl_helpers;
pub mod options;
pub mod parallel_eval;


pub use differential_evolution::differential_evolution;
pub use parallel_eval::ParallelConfig;

/// Per-generation callback type
pub type CallbackFn = Box<dyn FnMut(&DEIntermediate) -> CallbackAction>;

pub(crate) fn argmin(v: &Array1<f64>) -> (usize, f64) {
    let mut best_i = 0usize;
    let mut best_v = v[0];
    for (i, &val) in v.iter().enumerate() {
        if val < best_v || (best_v.is_nan() && !val.is_nan()) {
            best_v = val;
            best_i = i;
        }
    }
    (best_i, best_v)
}

/// Differential Evolution strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Best1Bin,
    Best1Exp,
    Rand1Bin,
    Rand1Exp,
    Rand2Bin,
    Rand2Exp,
    CurrentToBest1Bin,
    CurrentToBest1Exp,
    Best2Bin,
    Best2Exp,
    RandToBest1Bin,
    RandToBest1Exp,
}

impl Strategy {
    /// Crossover implied by the strategy suffix
    pub fn crossover(self) -> Crossover {
        match self {
            Strategy::Best1Bin
            | Strategy::Rand1Bin
            | Strategy::Rand2Bin
            | Strategy::CurrentToBest1Bin
            | Strategy::Best2Bin
            | Strategy::RandToBest1Bin => Crossover::Binomial,
            _ => Crossover::Exponential,
        }
    }

    /// Smallest population able to supply the distinct donor vectors
    pub fn min_population(self) -> usize {
        let donors = match self {
            Strategy::Best1Bin | Strategy::Best1Exp => 2,
            Strategy::CurrentToBest1Bin | Strategy::CurrentToBest1Exp => 2,
            Strategy::RandToBest1Bin | Strategy::RandToBest1Exp => 3,
            Strategy::Rand1Bin | Strategy::Rand1Exp => 3,
            Strategy::Best2Bin | Strategy::Best2Exp => 4,
            Strategy::Rand2Bin | Strategy::Rand2Exp => 5,
        };
        // donors are drawn among the other members
        donors + 1
    }
}

impl FromStr for Strategy {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let t = s.to_lowercase();
        match t.as_str() {
            "best1bin" | "best1" => Ok(Strategy::Best1Bin),
            "best1exp" => Ok(Strategy::Best1Exp),
            "rand1bin" | "rand1" => Ok(Strategy::Rand1Bin),
            "rand1exp" => Ok(Strategy::Rand1Exp),
            "rand2bin" | "rand2" => Ok(Strategy::Rand2Bin),
            "rand2exp" => Ok(Strategy::Rand2Exp),
            "currenttobest1bin" | "current-to-best1bin" | "current_to_best1bin" => {
                Ok(Strategy::CurrentToBest1Bin)
            }
            "currenttobest1exp" | "current-to-best1exp" | "current_to_best1exp" => {
                Ok(Strategy::CurrentToBest1Exp)
            }
            "best2bin" | "best2" => Ok(Strategy::Best2Bin),
            "best2exp" => Ok(Strategy::Best2Exp),
            "randtobest1bin" | "rand-to-best1bin" | "rand_to_best1bin" => {
                Ok(Strategy::RandToBest1Bin)
            }
            "randtobest1exp" | "rand-to-best1exp" | "rand_to_best1exp" => {
                Ok(Strategy::RandToBest1Exp)
            }
            _ => Err(format!("unknown strategy: {}", s)),
        }
    }
}

/// Crossover type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Crossover {
    /// Binomial (uniform) crossover
    #[default]
    Binomial,
    /// Exponential crossover
    Exponential,
}

/// Mutation setting: either a fixed factor or a uniform range (dithering)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mutation {
    /// Fixed mutation factor F in [0, 2]
    Factor(f64),
    /// Dithering range [min, max) with 0 <= min < max <= 2, resampled per trial
    Range { min: f64, max: f64 },
}

impl Default for Mutation {
    fn default() -> Self {
        Mutation::Range { min: 0.5, max: 1.0 }
    }
}

impl Mutation {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Mutation::Factor(f) => f,
            Mutation::Range { min, max } => rng.random_range(min..max),
        }
    }

    fn validate(&self) -> Result<()> {
        let in_range = |f: f64| (0.0..=2.0).contains(&f);
        match *self {
            Mutation::Factor(f) if !in_range(f) => Err(DEError::InvalidMutationFactor { factor: f }),
            Mutation::Range { min, .. } if !in_range(min) => {
                Err(DEError::InvalidMutationFactor { factor: min })
            }
            Mutation::Range { min, max } if !in_range(max) || max <= min => {
                Err(DEError::InvalidMutationFactor { factor: max })
            }
            _ => Ok(()),
        }
    }
}

/// Initialization scheme for the population
#[derive(Debug, Clone, Default)]
pub enum Init {
    #[default]
    LatinHypercube,
    Random,
    /// Explicit starting population, one individual per row. Its row count
    /// replaces `popsize`; entries outside the bounds are clipped.
    Population(Array2<f64>),
}

/// Whether best updates during a generation (we use Deferred only)
#[derive(Debug, Clone, Copy, Default)]
pub enum Updating {
    #[default]
    Deferred,
}

/// Local coordinate-search polishing of the final best point
#[derive(Debug, Clone)]
pub struct PolishConfig {
    pub enabled: bool,
    /// Upper limit on evaluations, further capped at 200 * n
    pub maxeval: usize,
}

impl Default for PolishConfig {
    fn default() -> Self {
        Self { enabled: true, maxeval: 1000 }
    }
}

/// Configuration for the Differential Evolution optimizer
pub struct DEConfig {
    pub maxiter: usize,
    pub popsize: usize, // total NP = popsize * n_params_free
    pub tol: f64,
    pub atol: f64,
    pub mutation: Mutation,
    pub recombination: f64, // CR in [0,1]
    pub strategy: Strategy,
    pub init: Init,
    pub updating: Updating,
    pub seed: Option<u64>,
    /// Optional integrality mask; true => variable is integer-constrained
    pub integrality: Option<Vec<bool>>,
    /// Optional initial guess used to replace the best member after init
    pub x0: Option<Array1<f64>>,
    /// Log progress at info level instead of debug
    pub disp: bool,
    /// Optional per-iteration callback (may stop early)
    pub callback: Option<CallbackFn>,
    pub polish: Option<PolishConfig>,
    pub parallel: ParallelConfig,
}

impl Default for DEConfig {
    fn default() -> Self {
        Self {
            maxiter: 1000,
            popsize: 15,
            tol: 1e-2,
            atol: 0.0,
            mutation: Mutation::default(),
            recombination: 0.7,
            strategy: Strategy::Best1Bin,
            init: Init::default(),
            updating: Updating::default(),
            seed: None,
            integrality: None,
            x0: None,
            disp: false,
            callback: None,
            polish: None,
            parallel: ParallelConfig::default(),
        }
    }
}

impl fmt::Debug for DEConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DEConfig")
            .field("maxiter", &self.maxiter)
            .field("popsize", &self.popsize)
            .field("tol", &self.tol)
            .field("atol", &self.atol)
            .field("mutation", &self.mutation)
            .field("recombination", &self.recombination)
            .field("strategy", &self.strategy)
            .field("seed", &self.seed)
            .field("disp", &self.disp)
            .field("callback", &self.callback.is_some())
            .field("polish", &self.polish)
            .field("parallel", &self.parallel)
            .finish_non_exhaustive()
    }
}

/// Fluent builder for `DEConfig` for ergonomic configuration.
#[derive(Default)]
pub struct DEConfigBuilder {
    cfg: DEConfig,
}

impl DEConfigBuilder {
    pub fn new() -> Self {
        Self { cfg: DEConfig::default() }
    }
    pub fn maxiter(mut self, v: usize) -> Self {
        self.cfg.maxiter = v;
        self
    }
    pub fn popsize(mut self, v: usize) -> Self {
        self.cfg.popsize = v;
        self
    }
    pub fn tol(mut self, v: f64) -> Self {
        self.cfg.tol = v;
        self
    }
    pub fn atol(mut self, v: f64) -> Self {
        self.cfg.atol = v;
        self
    }
    pub fn mutation(mut self, v: Mutation) -> Self {
        self.cfg.mutation = v;
        self
    }
    pub fn recombination(mut self, v: f64) -> Self {
        self.cfg.recombination = v;
        self
    }
    pub fn strategy(mut self, v: Strategy) -> Self {
        self.cfg.strategy = v;
        self
    }
    pub fn init(mut self, v: Init) -> Self {
        self.cfg.init = v;
        self
    }
    pub fn seed(mut self, v: u64) -> Self {
        self.cfg.seed = Some(v);
        self
    }
    pub fn integrality(mut self, v: Vec<bool>) -> Self {
        self.cfg.integrality = Some(v);
        self
    }
    pub fn x0(mut self, v: Array1<f64>) -> Self {
        self.cfg.x0 = Some(v);
        self
    }
    pub fn disp(mut self, v: bool) -> Self {
        self.cfg.disp = v;
        self
    }
    pub fn callback(mut self, cb: CallbackFn) -> Self {
        self.cfg.callback = Some(cb);
        self
    }
    pub fn polish(mut self, pol: PolishConfig) -> Self {
        self.cfg.polish = Some(pol);
        self
    }
    pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
        self.cfg.parallel = parallel;
        self
    }
    pub fn build(self) -> DEConfig {
        self.cfg
    }
}

/// Result/Report of a DE optimization run
#[derive(Clone)]
pub struct DEReport {
    pub x: Array1<f64>,
    pub fun: f64,
    pub success: bool,
    pub message: String,
    pub nit: usize,
    pub nfev: usize,
    pub population: Array2<f64>,
    pub population_energies: Array1<f64>,
}

impl fmt::Debug for DEReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DEReport")
            .field("x", &self.x)
            .field("fun", &self.fun)
            .field("success", &self.success)
            .field("message", &self.message)
            .field("nit", &self.nit)
            .field("nfev", &self.nfev)
            .field(
                "population",
                &format!("{}x{}", self.population.nrows(), self.population.ncols()),
            )
            .field("population_energies", &format!("len={}", self.population_energies.len()))
            .finish()
    }
}

/// Information passed to callback after each generation
pub struct DEIntermediate {
    pub x: Array1<f64>,
    pub fun: f64,
    pub convergence: f64, // measured as std(pop_f)
    pub iter: usize,
}

/// Action returned by callback
pub enum CallbackAction {
    Continue,
    Stop,
}

/// Differential Evolution optimizer
pub struct DifferentialEvolution<'a, F>
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    func: &'a F,
    lower: Array1<f64>,
    upper: Array1<f64>,
    config: DEConfig,
}

impl<'a, F> DifferentialEvolution<'a, F>
where
    F: Fn(&Array1<f64>) -> f64 + Sync,
{
    /// Create a new DE optimizer with objective `func` and bounds [lower, upper]
    pub fn new(func: &'a F, lower: Array1<f64>, upper: Array1<f64>) -> Result<Self> {
        if lower.len() != upper.len() {
            return Err(DEError::BoundsMismatch { lower_len: lower.len(), upper_len: upper.len() });
        }
        for (index, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
            if !(lo <= hi) {
                return Err(DEError::InvalidBounds { index, lower: lo, upper: hi });
            }
        }
        Ok(Self { func, lower, upper, config: DEConfig::default() })
    }

    /// Mutable access to configuration
    pub fn config_mut(&mut self) -> &mut DEConfig {
        &mut self.config
    }

    fn validate(&self) -> Result<()> {
        let n = self.lower.len();
        self.config.mutation.validate()?;
        if !(0.0..=1.0).contains(&self.config.recombination) {
            return Err(DEError::InvalidCrossoverRate { rate: self.config.recombination });
        }
        if let Some(x0) = &self.config.x0 {
            if x0.len() != n {
                return Err(DEError::X0DimensionMismatch { expected: n, got: x0.len() });
            }
        }
        if let Some(mask) = &self.config.integrality {
            if mask.len() != n {
                return Err(DEError::IntegralityDimensionMismatch { expected: n, got: mask.len() });
            }
        }
        if let Init::Population(init) = &self.config.init {
            if init.ncols() != n {
                return Err(DEError::InitShapeMismatch { expected: n, got: init.ncols() });
            }
        }
        Ok(())
    }

    /// Run the optimization and return a report
    pub fn solve(&mut self) -> Result<DEReport> {
        use apply_integrality::apply_integrality;
        use crossover::{binomial_crossover, exponential_crossover};
        use init::{init_from_population, init_latin_hypercube, init_random};
        use parallel_eval::{evaluate_population, evaluate_trials};
        use rayon::prelude::*;

        self.validate()?;
        let level = if self.config.disp { Level::Info } else { Level::Debug };
        let n = self.lower.len();

        let is_free: Vec<bool> =
            self.lower.iter().zip(self.upper.iter()).map(|(lo, hi)| hi > lo).collect();
        let n_free = is_free.iter().filter(|&&b| b).count();
        if n_free == 0 {
            // All fixed; just evaluate x = lower
            let mut x = self.lower.clone();
            if let Some(mask) = &self.config.integrality {
                apply_integrality(&mut x, mask, &self.lower, &self.upper);
            }
            let f = (self.func)(&x);
            return Ok(DEReport {
                population: x.clone().insert_axis(ndarray::Axis(0)),
                x,
                fun: f,
                success: true,
                message: "All variables fixed by bounds".into(),
                nit: 0,
                nfev: 1,
                population_energies: Array1::from(vec![f]),
            });
        }

        let base_seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(base_seed);

        let mut pop = match &self.config.init {
            Init::LatinHypercube => init_latin_hypercube(
                self.config.popsize * n_free,
                &self.lower,
                &self.upper,
                &is_free,
                &mut rng,
            ),
            Init::Random => init_random(
                self.config.popsize * n_free,
                &self.lower,
                &self.upper,
                &is_free,
                &mut rng,
            ),
            Init::Population(init) => init_from_population(init, &self.lower, &self.upper, &is_free),
        };
        let npop = pop.nrows();
        let required = self.config.strategy.min_population();
        if npop < required {
            return Err(DEError::PopulationTooSmall { pop_size: npop, required });
        }

        log::log!(
            level,
            "DE init: {} dimensions ({} free), population={}, maxiter={}, strategy={:?}, mutation={:?}, CR={:.3}",
            n,
            n_free,
            npop,
            self.config.maxiter,
            self.config.strategy,
            self.config.mutation,
            self.config.recombination
        );

        if let Some(threads) = self.config.parallel.num_threads {
            // the global pool can only be configured once per process
            let _ = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global();
        }

        if let Some(mask) = &self.config.integrality {
            for mut row in pop.rows_mut() {
                let mut x = row.to_owned();
                apply_integrality(&mut x, mask, &self.lower, &self.upper);
                row.assign(&x);
            }
        }

        let mut energies = evaluate_population(&pop, self.func, &self.config.parallel);
        let mut nfev = npop;

        if let Some(x0) = &self.config.x0 {
            let mut x0c = x0.clone();
            for i in 0..n {
                x0c[i] = x0c[i].clamp(self.lower[i], self.upper[i]);
            }
            if let Some(mask) = &self.config.integrality {
                apply_integrality(&mut x0c, mask, &self.lower, &self.upper);
            }
            let f0 = (self.func)(&x0c);
            nfev += 1;
            let (best_idx, _) = argmin(&energies);
            pop.row_mut(best_idx).assign(&x0c);
            energies[best_idx] = f0;
        }

        let (mut best_idx, mut best_f) = argmin(&energies);
        log::log!(level, "DE iter {:4}  best_f={:.6e}", 0, best_f);

        let strategy = self.config.strategy;
        let mutation = self.config.mutation;
        let cr = self.config.recombination;
        let lower = &self.lower;
        let upper = &self.upper;
        let integrality = self.config.integrality.as_deref();

        let mut success = false;
        let mut message = String::new();
        let mut nit = 0;

        for iter in 1..=self.config.maxiter {
            nit = iter;

            let make_trial = |i: usize| -> Array1<f64> {
                // one stream per (generation, individual) keeps seeded runs
                // identical whether or not trials are built in parallel
                let mut local_rng = StdRng::seed_from_u64(
                    base_seed.wrapping_add((iter as u64) << 32).wrapping_add(i as u64),
                );
                let f = mutation.sample(&mut local_rng);
                let donor = mutant::mutant(strategy, i, &pop, best_idx, f, &mut local_rng);
                let target = pop.row(i).to_owned();
                let mut trial = match strategy.crossover() {
                    Crossover::Binomial => binomial_crossover(&target, &donor, cr, &mut local_rng),
                    Crossover::Exponential => {
                        exponential_crossover(&target, &donor, cr, &mut local_rng)
                    }
                };
                for j in 0..trial.len() {
                    trial[j] = if is_free[j] { trial[j].clamp(lower[j], upper[j]) } else { lower[j] };
                }
                if let Some(mask) = integrality {
                    apply_integrality(&mut trial, mask, lower, upper);
                }
                trial
            };

            let trials: Vec<Array1<f64>> = if self.config.parallel.enabled {
                (0..npop).into_par_iter().map(&make_trial).collect()
            } else {
                (0..npop).map(&make_trial).collect()
            };
            let trial_energies = evaluate_trials(&trials, self.func, &self.config.parallel);
            nfev += npop;

            let mut accepted = 0usize;
            for (i, (trial, trial_energy)) in trials.into_iter().zip(trial_energies).enumerate() {
                if trial_energy <= energies[i] {
                    pop.row_mut(i).assign(&trial);
                    energies[i] = trial_energy;
                    accepted += 1;
                }
            }

            (best_idx, best_f) = argmin(&energies);

            let pop_mean = energies.mean().unwrap_or(0.0);
            let pop_std = energies.std(0.0);
            let threshold = self.config.atol + self.config.tol * pop_mean.abs();
            log::log!(
                level,
                "DE iter {:4}  best_f={:.6e}  std={:.3e}  accepted={}/{}",
                iter,
                best_f,
                pop_std,
                accepted,
                npop
            );

            if let Some(cb) = self.config.callback.as_mut() {
                let intermediate = DEIntermediate {
                    x: pop.row(best_idx).to_owned(),
                    fun: best_f,
                    convergence: pop_std,
                    iter,
                };
                if let CallbackAction::Stop = cb(&intermediate) {
                    success = true;
                    message = "Optimization stopped by callback".to_string();
                    break;
                }
            }

            if pop_std <= threshold {
                success = true;
                message =
                    format!("Converged: std(pop_f)={:.3e} <= threshold={:.3e}", pop_std, threshold);
                break;
            }
        }

        if !success {
            message = format!("Maximum iterations reached: {}", self.config.maxiter);
        }
        log::log!(level, "DE finished: {}", message);

        let best_x = pop.row(best_idx).to_owned();
        let (x, fun, polish_nfev) = match &self.config.polish {
            Some(polish) if polish.enabled => self.polish(&best_x, best_f, polish),
            _ => (best_x, best_f, 0),
        };

        Ok(DEReport {
            x,
            fun,
            success,
            message,
            nit,
            nfev: nfev + polish_nfev,
            population: pop,
            population_energies: energies,
        })
    }
}
