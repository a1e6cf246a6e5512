//! Class label bound.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A value usable as a class label.
///
/// Labels are compared for equality, sorted to fix the order in which classes
/// are processed, and printed in logs and error messages. Integer labels and
/// `String` both qualify through the blanket implementation.
pub trait ClassLabel: Clone + Ord + Hash + Debug + Display + Send + Sync + 'static {}

impl<T> ClassLabel for T where T: Clone + Ord + Hash + Debug + Display + Send + Sync + 'static {}

/// Sorted, deduplicated label values.
///
/// ```rust
/// use seval_core::unique_sorted;
///
/// assert_eq!(unique_sorted(&[3, 1, 3, 2, 1]), vec![1, 2, 3]);
/// ```
#[must_use]
pub fn unique_sorted<L: ClassLabel>(labels: &[L]) -> Vec<L> {
    let mut classes = labels.to_vec();
    classes.sort();
    classes.dedup();
    classes
}
