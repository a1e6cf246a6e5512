//! # seval_explain
//!
//! The interfaces seval consumes from the outside world.
//!
//! This crate provides:
//! - [`ExplainFn`] for attribution methods
//! - [`ModelInterface`] for classifier wrappers
//! - [`SimilarityFunc`] with the built-in [`Pearson`] and [`Spearman`] scores

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod interface;
mod similarity;

pub use error::{ExplainError, Result};
pub use interface::{explain_checked, ExplainFn, ModelInterface};
pub use similarity::{correlation_pearson, correlation_spearman, Pearson, SimilarityFunc, Spearman};
