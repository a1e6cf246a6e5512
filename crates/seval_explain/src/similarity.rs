//! Similarity functions between two attribution arrays.
//!
//! Randomisation metrics compare the explanation of an intact model with the
//! explanation of a perturbed one; these functions score that agreement.

use ndarray::ArrayViewD;

use crate::error::{ExplainError, Result};

/// A similarity score between two equally sized arrays.
pub trait SimilarityFunc: Send + Sync {
    /// Compare `a` and `b` element-wise (both are flattened).
    fn compute(&self, a: ArrayViewD<'_, f32>, b: ArrayViewD<'_, f32>) -> Result<f64>;

    /// Name of the function for logging/reporting.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Whether larger scores mean more similar.
    fn higher_is_better(&self) -> bool {
        true
    }
}

impl<F> SimilarityFunc for F
where
    F: Fn(ArrayViewD<'_, f32>, ArrayViewD<'_, f32>) -> Result<f64> + Send + Sync,
{
    fn compute(&self, a: ArrayViewD<'_, f32>, b: ArrayViewD<'_, f32>) -> Result<f64> {
        self(a, b)
    }
}

/// Pearson linear correlation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pearson;

impl SimilarityFunc for Pearson {
    fn compute(&self, a: ArrayViewD<'_, f32>, b: ArrayViewD<'_, f32>) -> Result<f64> {
        correlation_pearson(a, b)
    }

    fn name(&self) -> &str {
        "pearson"
    }
}

/// Spearman rank correlation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spearman;

impl SimilarityFunc for Spearman {
    fn compute(&self, a: ArrayViewD<'_, f32>, b: ArrayViewD<'_, f32>) -> Result<f64> {
        correlation_spearman(a, b)
    }

    fn name(&self) -> &str {
        "spearman"
    }
}

/// Pearson correlation of the flattened inputs.
///
/// Returns `0.0` when either input is constant or empty.
///
/// ```rust
/// use ndarray::array;
/// use seval_explain::correlation_pearson;
///
/// let a = array![1.0_f32, 2.0, 3.0].into_dyn();
/// let b = array![2.0_f32, 4.0, 6.0].into_dyn();
/// let r = correlation_pearson(a.view(), b.view()).unwrap();
/// assert!((r - 1.0).abs() < 1e-9);
/// ```
pub fn correlation_pearson(a: ArrayViewD<'_, f32>, b: ArrayViewD<'_, f32>) -> Result<f64> {
    check_sizes(&a, &b)?;
    let a: Vec<f64> = a.iter().map(|&v| f64::from(v)).collect();
    let b: Vec<f64> = b.iter().map(|&v| f64::from(v)).collect();
    Ok(pearson(&a, &b))
}

/// Spearman rank correlation of the flattened inputs.
///
/// Ties receive their average rank. Returns `0.0` when either input is
/// constant or empty.
pub fn correlation_spearman(a: ArrayViewD<'_, f32>, b: ArrayViewD<'_, f32>) -> Result<f64> {
    check_sizes(&a, &b)?;
    let a: Vec<f32> = a.iter().copied().collect();
    let b: Vec<f32> = b.iter().copied().collect();
    Ok(pearson(&ranks(&a), &ranks(&b)))
}

fn check_sizes(a: &ArrayViewD<'_, f32>, b: &ArrayViewD<'_, f32>) -> Result<()> {
    if a.len() != b.len() {
        return Err(ExplainError::ShapeMismatch(format!(
            "cannot correlate arrays of {} and {} elements",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len();
    if n == 0 {
        return 0.0;
    }

    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let denom = (var_a * var_b).sqrt();
    if denom < 1e-12 {
        0.0
    } else {
        cov / denom
    }
}

/// 1-based ranks, averaging over ties.
fn ranks(values: &[f32]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&i, &j| values[i].total_cmp(&values[j]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // Positions start..end share the mean of ranks start+1..=end
        let rank = (start + end + 1) as f64 / 2.0;
        for &i in &order[start..end] {
            ranks[i] = rank;
        }
        start = end;
    }
    ranks
}
