//! Error types for seval_explain.

use thiserror::Error;

/// Result type alias using [`ExplainError`].
pub type Result<T> = std::result::Result<T, ExplainError>;

/// Errors raised at the explanation/model/similarity boundary.
#[derive(Error, Debug)]
pub enum ExplainError {
    /// Two arrays that must align do not.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// The explanation function failed.
    #[error("Explanation failed: {0}")]
    Explanation(String),

    /// The model failed to produce predictions.
    #[error("Model error: {0}")]
    Model(String),
}
