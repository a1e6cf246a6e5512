//! # seval_data
//!
//! Labelled image datasets for seval.
//!
//! This crate provides:
//! - [`ImageDataset`] pairing an `(N, ...)` image array with one label per image
//! - [`ClassGroup`] index sets of the samples sharing a label
//! - I/O utilities for NumPy `.npy` arrays and JSON label lists
//!
//! ## Example
//!
//! ```rust,ignore
//! use seval_core::ImageLayout;
//! use seval_data::{read_images_npy, read_labels, ImageDataset};
//!
//! let images = read_images_npy("data/x_test.npy")?;
//! let labels = read_labels("data/y_test.npy")?;
//! let dataset = ImageDataset::new(images, labels, ImageLayout::Hwc)?;
//!
//! for group in dataset.class_groups() {
//!     println!("{}: {} images", group.label(), group.len());
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod dataset;
mod error;
mod io;

pub use dataset::{ClassGroup, ImageDataset};
pub use error::{DataError, Result};
pub use io::{read_images_npy, read_labels, read_labels_json, read_labels_npy, LabelValue};
