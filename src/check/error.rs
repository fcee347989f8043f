//! Error types for the gradient checker.

use thiserror::Error;

/// Gradient check errors.
///
/// Numeric disagreement between the analytic and estimated gradient is not an
/// error; it is reported through `GradCheckReport::is_valid`.
#[derive(Debug, Error)]
pub enum GradCheckError {
    #[error("Check index {index} out of range for parameter vector of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Gradient function returned {actual} entries, expected {expected}")]
    GradientLengthMismatch { expected: usize, actual: usize },

    #[error("Invalid check configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to write diagnostics: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for gradient check operations
pub type Result<T> = std::result::Result<T, GradCheckError>;
