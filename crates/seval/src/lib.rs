//! # seval
//!
//! Saliency evaluation building blocks in Rust.
//!
//! seval turns a labelled image set into a batch of 2×2 mosaics whose
//! provenance is fully known, the input to mosaic-based faithfulness metrics
//! for explanation methods:
//!
//! - **Core**: seeds, image layouts and shapes, class-label trait
//! - **Data**: labelled image datasets, class grouping, `.npy`/JSON readers
//! - **Mosaic**: quadrant assembly and stratified mosaic composition
//! - **Explain**: explanation, model and similarity interfaces
//!
//! ## Quick Start
//!
//! ```rust
//! use seval::prelude::*;
//! use ndarray::ArrayD;
//!
//! let images = ArrayD::<f32>::zeros(vec![6, 8, 8, 3]);
//! let labels = vec![0_i64, 0, 1, 1, 2, 2];
//! let dataset = ImageDataset::new(images, labels, ImageLayout::Hwc).unwrap();
//!
//! let composer = MosaicComposer::new(MosaicConfig::new(3).with_seed(7)).unwrap();
//! let batch = composer.compose(&dataset).unwrap();
//!
//! assert_eq!(batch.len(), 9);
//! assert_eq!(batch.mosaic_shape(), &[16, 16, 3]);
//! for record in batch.records() {
//!     assert_eq!(record.membership_flags.iter().sum::<u8>(), 2);
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

// Re-export all crates
pub use seval_core as core;
pub use seval_data as data;
pub use seval_explain as explain;
pub use seval_mosaic as mosaic;

/// Prelude module for convenient imports.
///
/// ```rust
/// use seval::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use seval_core::{ClassLabel, ImageLayout, ImageShape, Seed};

    // Data
    pub use seval_data::{read_images_npy, read_labels, ImageDataset, LabelValue};

    // Mosaics
    pub use seval_mosaic::{
        build_single_mosaic, compose, MosaicBatch, MosaicComposer, MosaicConfig, MosaicRecord,
    };

    // Explain
    pub use seval_explain::{
        correlation_pearson, correlation_spearman, ExplainFn, ModelInterface, Pearson,
        SimilarityFunc, Spearman,
    };
}
