//! Error types for the Differential Evolution optimizer.
//!
//! Every check happens before the first objective evaluation, so an error
//! always means the objective was never called.

use thiserror::Error;

/// Errors that can occur during Differential Evolution optimization.
#[derive(Debug, Error)]
pub enum DEError {
    /// Lower and upper bounds have different lengths.
    #[error("bounds mismatch: lower has {lower_len} elements, upper has {upper_len}")]
    BoundsMismatch {
        /// Length of the lower bounds array
        lower_len: usize,
        /// Length of the upper bounds array
        upper_len: usize,
    },

    /// A lower bound exceeds its corresponding upper bound.
    #[error("invalid bounds at index {index}: lower ({lower}) > upper ({upper})")]
    InvalidBounds {
        /// Index of the invalid bound pair
        index: usize,
        /// The lower bound value
        lower: f64,
        /// The upper bound value
        upper: f64,
    },

    /// The population cannot feed the chosen strategy with distinct vectors.
    #[error("population size ({pop_size}) is too small for the strategy, need at least {required}")]
    PopulationTooSmall {
        /// The effective population size
        pop_size: usize,
        /// Minimum size required by the strategy
        required: usize,
    },

    /// Mutation factor is out of valid range [0, 2].
    #[error("invalid mutation factor: {factor} (must be in [0, 2])")]
    InvalidMutationFactor {
        /// The invalid mutation factor
        factor: f64,
    },

    /// Crossover rate is out of valid range [0, 1].
    #[error("invalid crossover rate: {rate} (must be in [0, 1])")]
    InvalidCrossoverRate {
        /// The invalid crossover rate
        rate: f64,
    },

    /// Initial guess (x0) has wrong dimension.
    #[error("x0 dimension mismatch: expected {expected}, got {got}")]
    X0DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension provided
        got: usize,
    },

    /// Integrality mask has wrong dimension.
    #[error("integrality mask dimension mismatch: expected {expected}, got {got}")]
    IntegralityDimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension provided
        got: usize,
    },

    /// Explicit initial population has the wrong number of columns.
    #[error("initial population has {got} columns, expected {expected} (one per dimension)")]
    InitShapeMismatch {
        /// Expected number of columns
        expected: usize,
        /// Columns provided
        got: usize,
    },

    /// Option name not understood by the solver.
    #[error("differential_evolution() got an unexpected option \"{key}\"")]
    UnknownOption {
        /// The rejected option name
        key: String,
    },

    /// Option value has the wrong type or an invalid value.
    #[error("invalid value for option \"{key}\": expected {expected}")]
    InvalidOption {
        /// The option name
        key: String,
        /// What the option accepts
        expected: &'static str,
    },
}

/// A specialized `Result` type for DE operations.
pub type Result<T> = std::result::Result<T, DEError>;

impl DEError {
    /// Returns `true` if this is a bounds-related error.
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, DEError::BoundsMismatch { .. } | DEError::InvalidBounds { .. })
    }

    /// Returns `true` if this is a configuration-related error.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            DEError::PopulationTooSmall { .. }
                | DEError::InvalidMutationFactor { .. }
                | DEError::InvalidCrossoverRate { .. }
        )
    }

    /// Returns `true` if this is a dimension mismatch error.
    pub fn is_dimension_error(&self) -> bool {
        matches!(
            self,
            DEError::X0DimensionMismatch { .. }
                | DEError::IntegralityDimensionMismatch { .. }
                | DEError::InitShapeMismatch { .. }
        )
    }

    /// Returns `true` if an option map could not be turned into a configuration.
    pub fn is_option_error(&self) -> bool {
        matches!(self, DEError::UnknownOption { .. } | DEError::InvalidOption { .. })
    }
}
