//! Mosaic outputs and their provenance.

use ndarray::{ArrayD, ArrayViewD, Axis};
use serde::{Deserialize, Serialize};
use seval_core::ClassLabel;

/// Provenance of one mosaic.
///
/// The four arrays are aligned with quadrant order: top-left, top-right,
/// bottom-left, bottom-right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicRecord<L> {
    /// Original dataset index of each quadrant's image.
    pub source_indices: [usize; 4],
    /// True label of each quadrant's image.
    pub quadrant_labels: [L; 4],
    /// 1 where the quadrant's label equals `target_class`, else 0.
    pub membership_flags: [u8; 4],
    /// The class this mosaic was generated for.
    pub target_class: L,
}

impl<L: ClassLabel> MosaicRecord<L> {
    /// Build a record from placed `(index, label)` quadrants.
    pub(crate) fn from_quadrants(quadrants: &[(usize, L); 4], target_class: &L) -> Self {
        Self {
            source_indices: std::array::from_fn(|q| quadrants[q].0),
            quadrant_labels: std::array::from_fn(|q| quadrants[q].1.clone()),
            membership_flags: std::array::from_fn(|q| u8::from(quadrants[q].1 == *target_class)),
            target_class: target_class.clone(),
        }
    }

    /// Quadrant positions holding target-class images.
    pub fn target_quadrants(&self) -> impl Iterator<Item = usize> + '_ {
        self.membership_flags
            .iter()
            .enumerate()
            .filter(|(_, &flag)| flag == 1)
            .map(|(q, _)| q)
    }
}

/// Mosaics generated for one target class.
///
/// Yielded by [`ClassMosaicIter`](crate::ClassMosaicIter).
#[derive(Debug, Clone)]
pub struct ClassMosaics<L> {
    /// The target class.
    pub target_class: L,
    /// One mosaic per record, in generation order.
    pub mosaics: Vec<ArrayD<f32>>,
    /// Provenance aligned with `mosaics`.
    pub records: Vec<MosaicRecord<L>>,
}

/// The five parallel outputs of a composition run:
/// `(mosaics, source_indices, quadrant_labels, membership_flags, targets)`.
pub type MosaicParts<L> = (
    ArrayD<f32>,
    Vec<[usize; 4]>,
    Vec<[L; 4]>,
    Vec<[u8; 4]>,
    Vec<L>,
);

/// All mosaics of one composition run.
///
/// `mosaics` stacks every mosaic along a leading count axis; `records[i]`
/// describes `mosaics[i]`.
#[derive(Debug, Clone)]
pub struct MosaicBatch<L> {
    mosaics: ArrayD<f32>,
    records: Vec<MosaicRecord<L>>,
}

impl<L: ClassLabel> MosaicBatch<L> {
    pub(crate) fn new(mosaics: ArrayD<f32>, records: Vec<MosaicRecord<L>>) -> Self {
        Self { mosaics, records }
    }

    /// Number of mosaics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the batch holds no mosaics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stacked mosaics `(count, ...)`.
    #[must_use]
    pub fn mosaics(&self) -> &ArrayD<f32> {
        &self.mosaics
    }

    /// Per-mosaic provenance.
    #[must_use]
    pub fn records(&self) -> &[MosaicRecord<L>] {
        &self.records
    }

    /// The mosaic at `index`, if present.
    #[must_use]
    pub fn mosaic(&self, index: usize) -> Option<ArrayViewD<'_, f32>> {
        (index < self.len()).then(|| self.mosaics.index_axis(Axis(0), index))
    }

    /// Shape of a single mosaic.
    #[must_use]
    pub fn mosaic_shape(&self) -> &[usize] {
        &self.mosaics.shape()[1..]
    }

    /// Source indices of every mosaic.
    #[must_use]
    pub fn source_indices(&self) -> Vec<[usize; 4]> {
        self.records.iter().map(|r| r.source_indices).collect()
    }

    /// Quadrant labels of every mosaic.
    #[must_use]
    pub fn quadrant_labels(&self) -> Vec<[L; 4]> {
        self.records.iter().map(|r| r.quadrant_labels.clone()).collect()
    }

    /// Membership flags of every mosaic.
    #[must_use]
    pub fn membership_flags(&self) -> Vec<[u8; 4]> {
        self.records.iter().map(|r| r.membership_flags).collect()
    }

    /// Target class of every mosaic.
    #[must_use]
    pub fn targets(&self) -> Vec<L> {
        self.records.iter().map(|r| r.target_class.clone()).collect()
    }

    /// Split into the five parallel outputs.
    #[must_use]
    pub fn into_parts(self) -> MosaicParts<L> {
        let source_indices = self.source_indices();
        let membership_flags = self.membership_flags();
        let mut quadrant_labels = Vec::with_capacity(self.records.len());
        let mut targets = Vec::with_capacity(self.records.len());
        for record in self.records {
            quadrant_labels.push(record.quadrant_labels);
            targets.push(record.target_class);
        }
        (
            self.mosaics,
            source_indices,
            quadrant_labels,
            membership_flags,
            targets,
        )
    }
}
