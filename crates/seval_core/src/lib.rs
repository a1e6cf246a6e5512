//! # seval_core
//!
//! Core types for seval, an evaluation toolkit for saliency/explanation methods.
//!
//! This crate provides:
//! - [`Seed`] for deterministic random number generation
//! - [`ImageLayout`] and [`ImageShape`] for per-image shape metadata
//! - [`ClassLabel`], the bound every label type satisfies
//! - Error types and common utilities
//!
//! ## Shape Convention
//!
//! Image collections carry a leading sample axis `N` followed by one image in
//! the chosen [`ImageLayout`]:
//! - `Hw`: `(N, H, W)`
//! - `Hwc`: `(N, H, W, C)` (default)
//! - `Chw`: `(N, C, H, W)`
//!
//! ## Example
//!
//! ```rust
//! use seval_core::{ImageLayout, ImageShape, Seed};
//!
//! let seed = Seed::new(42);
//! let shape = ImageShape::from_dims(&[28, 28, 1], ImageLayout::Hwc).unwrap();
//! assert_eq!(shape.mosaic().dims(), &[56, 56, 1]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod label;
mod seed;
mod shape;

pub use error::{CoreError, Result};
pub use label::{unique_sorted, ClassLabel};
pub use seed::Seed;
pub use shape::{ImageLayout, ImageShape};
