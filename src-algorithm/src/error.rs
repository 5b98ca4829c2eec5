//! Errors raised by the optimisation engine and the strategies

use onopt_monitor::MonitorError;
use onopt_problem::ProblemError;

/// Error type for optimisation runs and strategy configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptimisationError {
    #[error("Unknown parameter '{parameter}' for {algorithm}.")]
    UnknownParameter { algorithm: String, parameter: String },

    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidParameterValue { parameter: String, reason: String },

    #[error("The search space must be bounded, but dimension {dimension} spans [{lower}, {upper}].")]
    UnboundedSearchSpace { dimension: usize, lower: f64, upper: f64 },

    #[error("{0} proposed no parameters to evaluate.")]
    EmptyCandidateBatch(String),

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error(transparent)]
    Problem(#[from] ProblemError),

    #[error(transparent)]
    Monitor(#[from] MonitorError),
}

/// Result type for optimisation operations
pub type Result<T> = std::result::Result<T, OptimisationError>;
