//! Explanation function and model wrapper interfaces.

use ndarray::{Array2, ArrayD, ArrayViewD, Axis};

use crate::error::{ExplainError, Result};

/// An explanation (attribution) method.
///
/// Given a batch of inputs `(N, ...)` and one target class per input, returns
/// an attribution array whose leading axis also has length `N`.
///
/// Any `Fn(ArrayViewD<f32>, &[usize]) -> Result<ArrayD<f32>>` closure is an
/// `ExplainFn`.
pub trait ExplainFn: Send + Sync {
    /// Compute attributions for `inputs` with respect to `targets`.
    fn explain(&self, inputs: ArrayViewD<'_, f32>, targets: &[usize]) -> Result<ArrayD<f32>>;

    /// Name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<F> ExplainFn for F
where
    F: Fn(ArrayViewD<'_, f32>, &[usize]) -> Result<ArrayD<f32>> + Send + Sync,
{
    fn explain(&self, inputs: ArrayViewD<'_, f32>, targets: &[usize]) -> Result<ArrayD<f32>> {
        self(inputs, targets)
    }
}

/// A classifier exposing batched forward passes.
pub trait ModelInterface: Send + Sync {
    /// Class scores of shape `(N, n_classes)`.
    fn predict(&self, inputs: ArrayViewD<'_, f32>) -> Result<Array2<f32>>;

    /// Number of output classes.
    fn n_classes(&self) -> usize;

    /// Highest-scoring class per input.
    fn predict_classes(&self, inputs: ArrayViewD<'_, f32>) -> Result<Vec<usize>> {
        let scores = self.predict(inputs)?;
        Ok(scores
            .axis_iter(Axis(0))
            .map(|row| {
                row.iter()
                    .enumerate()
                    .fold((0, f32::NEG_INFINITY), |best, (i, &v)| {
                        if v > best.1 {
                            (i, v)
                        } else {
                            best
                        }
                    })
                    .0
            })
            .collect())
    }
}

/// Run `explainer` and check that its output lines up with `inputs`.
///
/// # Errors
///
/// Returns [`ExplainError::ShapeMismatch`] if `targets` does not have one entry
/// per input, or if the attribution batch size differs from the input batch.
pub fn explain_checked<E: ExplainFn + ?Sized>(
    explainer: &E,
    inputs: ArrayViewD<'_, f32>,
    targets: &[usize],
) -> Result<ArrayD<f32>> {
    let n_inputs = inputs.shape().first().copied().unwrap_or(0);
    if targets.len() != n_inputs {
        return Err(ExplainError::ShapeMismatch(format!(
            "{} inputs but {} targets",
            n_inputs,
            targets.len()
        )));
    }

    let attributions = explainer.explain(inputs, targets)?;
    let n_attr = attributions.shape().first().copied().unwrap_or(0);
    if n_attr != n_inputs {
        return Err(ExplainError::ShapeMismatch(format!(
            "{} returned {} attributions for {} inputs",
            explainer.name(),
            n_attr,
            n_inputs
        )));
    }

    tracing::trace!(explainer = explainer.name(), n_inputs, "Computed attributions");
    Ok(attributions)
}
