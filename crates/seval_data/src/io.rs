//! I/O utilities for reading image arrays and labels.
//!
//! Only raw array containers are supported (NumPy `.npy` and JSON label
//! lists); there is no image decoding.

use std::path::Path;

use ndarray::{Array1, ArrayD};
use ndarray_npy::ReadNpyExt;
use serde::{Deserialize, Serialize};

use crate::error::{DataError, Result};

/// A label read from an external file.
///
/// Integer labels sort numerically and before any text label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelValue {
    /// Integer class id.
    Int(i64),
    /// Named class.
    Text(String),
}

impl std::fmt::Display for LabelValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for LabelValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for LabelValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Read an image collection from a NumPy .npy file.
///
/// The file should contain an array of shape `(N, ...)`. `f64` data is
/// converted to `f32`.
pub fn read_images_npy<P: AsRef<Path>>(path: P) -> Result<ArrayD<f32>> {
    let file = std::fs::File::open(path.as_ref())?;
    let reader = std::io::BufReader::new(file);

    // Try reading as f32 first
    match ArrayD::<f32>::read_npy(reader) {
        Ok(arr) => Ok(arr),
        Err(e) => {
            tracing::debug!(path = %path.as_ref().display(), "Not f32 data, retrying as f64");
            let file = std::fs::File::open(path.as_ref())?;
            let reader = std::io::BufReader::new(file);
            let arr_f64 = ArrayD::<f64>::read_npy(reader)
                .map_err(|_| DataError::FormatError(format!("Failed to read npy file: {e}")))?;
            Ok(arr_f64.mapv(|x| x as f32))
        }
    }
}

/// Read integer labels from a one-dimensional NumPy .npy file.
///
/// Accepts `int64` and `int32` data.
pub fn read_labels_npy<P: AsRef<Path>>(path: P) -> Result<Vec<LabelValue>> {
    let file = std::fs::File::open(path.as_ref())?;
    let reader = std::io::BufReader::new(file);

    let values: Vec<i64> = match Array1::<i64>::read_npy(reader) {
        Ok(arr) => arr.to_vec(),
        Err(e) => {
            let file = std::fs::File::open(path.as_ref())?;
            let reader = std::io::BufReader::new(file);
            Array1::<i32>::read_npy(reader)
                .map_err(|_| DataError::FormatError(format!("Failed to read label npy file: {e}")))?
                .iter()
                .map(|&v| i64::from(v))
                .collect()
        }
    };

    Ok(values.into_iter().map(LabelValue::Int).collect())
}

/// Read labels from a JSON array of integers and/or strings.
pub fn read_labels_json<P: AsRef<Path>>(path: P) -> Result<Vec<LabelValue>> {
    let file = std::fs::File::open(path.as_ref())?;
    let reader = std::io::BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| DataError::FormatError(format!("Failed to read label JSON: {e}")))
}

/// Read labels, choosing the format from the file extension.
pub fn read_labels<P: AsRef<Path>>(path: P) -> Result<Vec<LabelValue>> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "Reading labels");
    match path.extension().and_then(|e| e.to_str()) {
        Some("npy") => read_labels_npy(path),
        Some("json") => read_labels_json(path),
        other => Err(DataError::FormatError(format!(
            "unsupported label file extension: {}",
            other.unwrap_or("<none>")
        ))),
    }
}
