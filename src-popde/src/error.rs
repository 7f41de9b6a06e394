//! Error types for problems, populations and the DE adapter.

use std::fmt;
use std::path::PathBuf;

use popde_de::DEError;
use thiserror::Error;

/// Problem property the DE adapter cannot handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedProperty {
    /// The problem has equality or inequality constraints
    Constrained,
    /// The problem has more than one objective
    MultiObjective,
    /// The problem's fitness is noisy
    Stochastic,
}

impl fmt::Display for UnsupportedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedProperty::Constrained => f.write_str(
                "supports only unconstrained optimisation, thus it cannot solve a constrained",
            ),
            UnsupportedProperty::MultiObjective => f.write_str(
                "supports only single-objective optimisation, thus it cannot solve a multi-objective",
            ),
            UnsupportedProperty::Stochastic => f.write_str(
                "does not support stochastic problems, thus it cannot solve a stochastic",
            ),
        }
    }
}

/// Errors raised by popde.
#[derive(Debug, Error)]
pub enum PopdeError {
    /// An option owned by the adapter was passed at construction.
    #[error(
        "the \"{key}\" parameter must not be passed to the constructor of the DE adapter, as {reason}"
    )]
    InvalidArgument {
        /// The reserved option name
        key: String,
        /// Who provides that value instead
        reason: &'static str,
    },

    /// The problem has a shape the adapter cannot optimise.
    #[error("the DE adapter {property} optimisation problem of type \"{problem}\"")]
    UnsupportedProblem {
        /// What is unsupported
        property: UnsupportedProperty,
        /// Display name of the problem
        problem: String,
    },

    /// Failure reported by the solver, passed through untouched.
    #[error(transparent)]
    Solver(#[from] DEError),

    /// Lower and upper bounds have different lengths.
    #[error("bounds mismatch: lower has {lower_len} elements, upper has {upper_len}")]
    BoundsMismatch {
        /// Length of the lower bounds
        lower_len: usize,
        /// Length of the upper bounds
        upper_len: usize,
    },

    /// A lower bound exceeds its upper bound, or one of them is not finite.
    #[error("invalid bounds at index {index}: [{lower}, {upper}] is not a finite range")]
    InvalidBounds {
        /// Index of the invalid pair
        index: usize,
        /// Lower bound
        lower: f64,
        /// Upper bound
        upper: f64,
    },

    /// The problem has no decision variables.
    #[error("the problem \"{0}\" has empty bounds")]
    EmptyBounds(String),

    /// The problem declares zero objectives.
    #[error("the problem \"{0}\" must have at least one objective")]
    NoObjectives(String),

    /// A decision or fitness vector has the wrong length.
    #[error("{what} has length {got}, expected {expected}")]
    DimensionMismatch {
        /// Which vector
        what: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// Individual index past the end of the population.
    #[error("index {index} is out of bounds for a population of size {len}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Population size
        len: usize,
    },

    /// Ranking was requested on an empty population.
    #[error("cannot rank the individuals of an empty population")]
    EmptyPopulation,

    /// Best/worst ranking was requested on a multi-objective problem.
    #[error("best and worst individuals are only defined for single-objective problems")]
    MultiObjectiveRanking,

    /// Translation vector length differs from the problem dimension.
    #[error("length of the translation vector is {got} while the problem dimension is {expected}")]
    TranslationMismatch {
        /// Problem dimension
        expected: usize,
        /// Translation length
        got: usize,
    },

    /// No benchmark function with that name.
    #[error("unknown test function \"{0}\"")]
    UnknownFunction(String),

    /// Benchmark function used with a dimension it does not support.
    #[error("test function \"{name}\" is only defined in {supported} dimensions, not {requested}")]
    UnsupportedDimension {
        /// Function name
        name: String,
        /// The only supported dimension
        supported: usize,
        /// Requested dimension
        requested: usize,
    },

    /// Options file could not be read.
    #[error("cannot read options file {path}: {source}")]
    OptionsFile {
        /// The file
        path: PathBuf,
        /// Underlying io error
        source: std::io::Error,
    },

    /// Options are not a JSON object.
    #[error("options must be a JSON object: {0}")]
    OptionsJson(#[from] serde_json::Error),
}

/// A specialized `Result` type for popde operations.
pub type Result<T> = std::result::Result<T, PopdeError>;

impl PopdeError {
    /// Returns `true` for a reserved option passed at construction.
    pub fn is_argument_error(&self) -> bool {
        matches!(self, PopdeError::InvalidArgument { .. })
    }

    /// Returns `true` when the problem is constrained, multi-objective or stochastic.
    pub fn is_problem_shape_error(&self) -> bool {
        matches!(self, PopdeError::UnsupportedProblem { .. })
    }

    /// Returns `true` for errors coming from the solver.
    pub fn is_solver_error(&self) -> bool {
        matches!(self, PopdeError::Solver(_))
    }

    /// Returns `true` for a malformed problem definition.
    pub fn is_problem_definition_error(&self) -> bool {
        matches!(
            self,
            PopdeError::BoundsMismatch { .. }
                | PopdeError::InvalidBounds { .. }
                | PopdeError::EmptyBounds(_)
                | PopdeError::NoObjectives(_)
                | PopdeError::TranslationMismatch { .. }
                | PopdeError::UnsupportedDimension { .. }
        )
    }
}
