//! Error types for seval_mosaic.

use thiserror::Error;

use seval_core::CoreError;
use seval_data::DataError;

/// Result type alias using [`MosaicError`].
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Errors that can occur while building mosaics.
#[derive(Error, Debug)]
pub enum MosaicError {
    /// A configuration value is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A target or outer class has no images to sample from.
    #[error("Class '{class}' has no images")]
    EmptyClass {
        /// The offending label, rendered with `Display`.
        class: String,
    },

    /// Fewer than two classes, so no outer images exist.
    #[error("At least two classes are required to build mosaics, found {found}")]
    TooFewClasses {
        /// Number of classes available.
        found: usize,
    },

    /// The mosaic builder was given the wrong number of images.
    #[error("Expected exactly 4 images for a mosaic, got {got}")]
    WrongImageCount {
        /// Number of images supplied.
        got: usize,
    },

    /// Images that should share a shape do not.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Dataset error.
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}
