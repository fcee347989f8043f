//! Error types for label encoding.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("Label {label} at position {position} is out of range for {n_labels} classes")]
    LabelOutOfRange { position: usize, label: usize, n_labels: usize },

    #[error("One-hot width must be at least 1")]
    ZeroWidth,

    #[error("Row {position} has no columns to decode")]
    EmptyRow { position: usize },
}

/// Result type for encoding operations
pub type Result<T> = std::result::Result<T, EncodeError>;
