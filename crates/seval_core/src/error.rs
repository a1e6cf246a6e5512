//! Error types for seval_core.

use thiserror::Error;

/// Result type alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core errors that can occur in seval_core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Dimension error.
    #[error("Dimension error: expected {expected} dimensions, got {got}")]
    DimensionError {
        /// Expected number of dimensions.
        expected: usize,
        /// Actual number of dimensions.
        got: usize,
    },

    /// A parameter is outside its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
