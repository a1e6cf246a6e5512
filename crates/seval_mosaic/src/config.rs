//! Mosaic composition configuration.

use serde::{Deserialize, Serialize};
use seval_core::{ClassLabel, Seed};

use crate::error::{MosaicError, Result};

/// Configuration for [`MosaicComposer`](crate::MosaicComposer).
///
/// # Example
///
/// ```rust
/// use seval_mosaic::MosaicConfig;
///
/// let config: MosaicConfig<i64> = MosaicConfig::new(10).with_seed(42);
/// assert!(config.validate().is_ok());
/// assert!(MosaicConfig::<i64>::new(0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MosaicConfig<L> {
    /// Number of mosaics generated for every target class.
    pub mosaics_per_class: usize,
    /// Seed for both random streams; `None` draws from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Explicit class universe. `None` uses the dataset's distinct labels.
    pub classes: Option<Vec<L>>,
}

impl<L> Default for MosaicConfig<L> {
    fn default() -> Self {
        Self {
            mosaics_per_class: 1,
            seed: None,
            classes: None,
        }
    }
}

impl<L: ClassLabel> MosaicConfig<L> {
    /// Create a configuration producing `mosaics_per_class` mosaics per class.
    #[must_use]
    pub fn new(mosaics_per_class: usize) -> Self {
        Self {
            mosaics_per_class,
            ..Default::default()
        }
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Restrict (or extend) the set of classes.
    ///
    /// Every listed class becomes a target and must have at least one image.
    /// Labels not in the list are never sampled.
    #[must_use]
    pub fn with_classes(mut self, classes: Vec<L>) -> Self {
        self.classes = Some(classes);
        self
    }

    /// The configured seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<Seed> {
        self.seed.map(Seed::new)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::InvalidParameter`] for a zero mosaic count, an
    /// empty class list, or a class list with duplicates.
    pub fn validate(&self) -> Result<()> {
        if self.mosaics_per_class == 0 {
            return Err(MosaicError::InvalidParameter(
                "mosaics_per_class must be a positive integer".to_string(),
            ));
        }

        if let Some(classes) = &self.classes {
            if classes.is_empty() {
                return Err(MosaicError::InvalidParameter(
                    "class list must not be empty".to_string(),
                ));
            }
            let mut sorted = classes.clone();
            sorted.sort();
            if let Some(pair) = sorted.windows(2).find(|w| w[0] == w[1]) {
                return Err(MosaicError::InvalidParameter(format!(
                    "class '{}' listed more than once",
                    pair[0]
                )));
            }
        }

        Ok(())
    }
}
