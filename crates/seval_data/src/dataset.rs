//! Labelled image dataset types.

use ndarray::{ArrayD, ArrayViewD, Axis};
use seval_core::{unique_sorted, ClassLabel, ImageLayout, ImageShape};

use crate::error::{DataError, Result};

/// A dataset of labelled images.
///
/// Images are stored as one array with a leading sample axis `N`, followed by
/// a single image in the dataset's [`ImageLayout`]. Labels are paired with
/// images by position, and positions form the index space used for
/// provenance everywhere else in seval.
///
/// # Example
///
/// ```rust
/// use ndarray::ArrayD;
/// use seval_core::ImageLayout;
/// use seval_data::ImageDataset;
///
/// let images = ArrayD::<f32>::zeros(vec![4, 8, 8, 3]);
/// let dataset = ImageDataset::new(images, vec![0, 0, 1, 1], ImageLayout::Hwc).unwrap();
/// assert_eq!(dataset.len(), 4);
/// assert_eq!(dataset.classes(), vec![0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct ImageDataset<L> {
    /// Images (N, ...) in `shape.layout()` order
    images: ArrayD<f32>,
    /// One label per image
    labels: Vec<L>,
    /// Shape of a single image
    shape: ImageShape,
}

impl<L: ClassLabel> ImageDataset<L> {
    /// Create a new dataset from an image array and parallel labels.
    ///
    /// # Arguments
    ///
    /// * `images` - Array of shape `(N, ...)` where `...` follows `layout`
    /// * `labels` - Exactly `N` labels
    /// * `layout` - Axis convention of a single image
    ///
    /// # Errors
    ///
    /// Returns [`DataError::LengthMismatch`] if the counts differ,
    /// [`DataError::EmptyDataset`] if there are no samples, and a shape error
    /// if the per-image rank does not match `layout`.
    pub fn new(images: ArrayD<f32>, labels: Vec<L>, layout: ImageLayout) -> Result<Self> {
        if images.ndim() == 0 {
            return Err(DataError::InvalidShape(
                "images must have a leading sample axis".to_string(),
            ));
        }

        let n_images = images.len_of(Axis(0));
        if n_images != labels.len() {
            return Err(DataError::LengthMismatch {
                images: n_images,
                labels: labels.len(),
            });
        }

        if n_images == 0 {
            return Err(DataError::EmptyDataset);
        }

        let shape = ImageShape::from_dims(&images.shape()[1..], layout)?;

        Ok(Self {
            images,
            labels,
            shape,
        })
    }

    /// Get the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the dataset is empty.
    ///
    /// Always `false` for a constructed dataset; kept for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Shape of a single image.
    #[must_use]
    pub fn image_shape(&self) -> &ImageShape {
        &self.shape
    }

    /// Axis convention of a single image.
    #[must_use]
    pub fn layout(&self) -> ImageLayout {
        self.shape.layout()
    }

    /// Get a reference to the full image array.
    #[must_use]
    pub fn images(&self) -> &ArrayD<f32> {
        &self.images
    }

    /// Get the labels in sample order.
    #[must_use]
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    /// Get the image at `index`.
    pub fn image(&self, index: usize) -> Result<ArrayViewD<'_, f32>> {
        self.check_index(index)?;
        Ok(self.images.index_axis(Axis(0), index))
    }

    /// Get the label at `index`.
    pub fn label(&self, index: usize) -> Result<&L> {
        self.check_index(index)?;
        Ok(&self.labels[index])
    }

    /// Distinct label values in ascending order.
    #[must_use]
    pub fn classes(&self) -> Vec<L> {
        unique_sorted(&self.labels)
    }

    /// Collect every sample carrying `label`.
    ///
    /// The group is empty when no sample has that label.
    #[must_use]
    pub fn class_group(&self, label: &L) -> ClassGroup<L> {
        let indices = self
            .labels
            .iter()
            .enumerate()
            .filter(|(_, l)| *l == label)
            .map(|(i, _)| i)
            .collect();

        ClassGroup {
            label: label.clone(),
            indices,
        }
    }

    /// One group per distinct label, in ascending label order.
    #[must_use]
    pub fn class_groups(&self) -> Vec<ClassGroup<L>> {
        self.classes()
            .iter()
            .map(|label| self.class_group(label))
            .collect()
    }

    /// Number of samples per distinct label, in ascending label order.
    #[must_use]
    pub fn class_counts(&self) -> Vec<(L, usize)> {
        self.class_groups()
            .into_iter()
            .map(|group| (group.label, group.indices.len()))
            .collect()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len() {
            return Err(DataError::IndexOutOfBounds {
                index,
                length: self.len(),
            });
        }
        Ok(())
    }
}

/// The original dataset indices of one class's samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassGroup<L> {
    label: L,
    indices: Vec<usize>,
}

impl<L: ClassLabel> ClassGroup<L> {
    /// The label shared by every member.
    #[must_use]
    pub fn label(&self) -> &L {
        &self.label
    }

    /// Original dataset indices of the members, ascending.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if the class has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
