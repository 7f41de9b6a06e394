//! Differential evolution as a pluggable algorithm for population based optimisation
//!
//! The crate provides a small framework surface:
//! - [`Problem`]: what users implement (bounds, fitness, capability queries)
//! - [`ProblemHandle`]: validated, shareable view of a problem that counts evaluations
//! - [`Population`]: decision vectors with their fitness, ids and champion
//! - [`Algorithm`]: anything that evolves a population
//!
//! and one algorithm, [`DeAdapter`], which hands a population to the
//! `popde-de` solver and writes the solver's best point over the worst
//! individual. Solver settings are passed as [`SolverOptions`], a JSON object
//! using SciPy's keyword names.

pub mod algorithm;
pub mod cli;
pub mod de_adapter;
pub mod error;
pub mod options;
pub mod population;
pub mod problem;
pub mod problems;

pub use algorithm::Algorithm;
pub use de_adapter::DeAdapter;
pub use error::{PopdeError, Result, UnsupportedProperty};
pub use options::{RESERVED_KEYS, SolverOptions};
pub use population::{Population, compare_fitness};
pub use problem::{Problem, ProblemHandle};
pub use problems::{Benchmark, Translate};

pub use popde_de::DEReport;
