//! # seval_mosaic
//!
//! Stratified 2×2 mosaic construction for localisation-style saliency metrics.
//!
//! This crate provides:
//! - [`build_single_mosaic`] to tile four same-shaped images into one mosaic
//! - [`MosaicComposer`] to generate, for every class, mosaics holding two
//!   images of that class and two images of other classes, with full
//!   index/label provenance in [`MosaicRecord`]
//! - [`ClassMosaicIter`] for incremental, class-by-class generation
//! - [`compose`], a one-call entry point returning the five parallel outputs
//!
//! ## Randomness
//!
//! Every run owns a [`RngPair`]: a numeric stream for class-balanced sampling
//! and a shuffle stream for placement. With a seed, output is fully
//! reproducible; without one, both streams are drawn from entropy.
//!
//! ## Example
//!
//! ```rust,ignore
//! use seval_core::ImageLayout;
//! use seval_data::ImageDataset;
//! use seval_mosaic::{MosaicComposer, MosaicConfig};
//!
//! let dataset = ImageDataset::new(x_test, y_test, ImageLayout::Chw)?;
//! let composer = MosaicComposer::new(MosaicConfig::new(50).with_seed(42))?;
//! let batch = composer.compose(&dataset)?;
//!
//! for (i, record) in batch.records().iter().enumerate() {
//!     let mosaic = batch.mosaic(i).unwrap();
//!     // feed `mosaic` to the explanation under test, score `record.target_quadrants()`
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod builder;
mod composer;
mod config;
mod error;
mod record;
mod rng;

pub use builder::build_single_mosaic;
pub use composer::{compose, ClassMosaicIter, MosaicComposer};
pub use config::MosaicConfig;
pub use error::{MosaicError, Result};
pub use record::{ClassMosaics, MosaicBatch, MosaicParts, MosaicRecord};
pub use rng::{RngPair, NUMERIC_STREAM, SHUFFLE_STREAM};
