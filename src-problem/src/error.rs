//! Errors raised while configuring or evaluating an optimisation problem

/// Error type for problem configuration and evaluation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProblemError {
    #[error("The dimension ({actual}) of the {what} must match the dimension of the problem ({expected}).")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid rotation matrix: {0}")]
    InvalidRotation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("unknown benchmark function: {0}")]
    UnknownFunction(String),
}

impl ProblemError {
    pub(crate) fn dimension_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        ProblemError::DimensionMismatch { what, expected, actual }
    }
}
