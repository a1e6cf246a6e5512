//! Stratified composition of labelled 2×2 mosaics.
//!
//! For every target class the composer draws two target-class images and two
//! images from other ("outer") classes per mosaic, shuffles their placement,
//! and records where every quadrant came from. Target images come from a
//! repeated-then-shuffled pool of the class's own samples; outer images are
//! drawn with replacement, class by class, then shuffled together.

use ndarray::{stack, ArrayD, ArrayViewD, Axis};
use rand::seq::SliceRandom;
use rand::Rng;
use seval_core::{ClassLabel, ImageLayout};
use seval_data::{ClassGroup, ImageDataset};

use crate::builder::build_single_mosaic;
use crate::config::MosaicConfig;
use crate::error::{MosaicError, Result};
use crate::record::{ClassMosaics, MosaicBatch, MosaicParts, MosaicRecord};
use crate::rng::RngPair;

/// Builds stratified mosaic batches from an [`ImageDataset`].
///
/// # Example
///
/// ```rust
/// use ndarray::ArrayD;
/// use seval_core::ImageLayout;
/// use seval_data::ImageDataset;
/// use seval_mosaic::{MosaicComposer, MosaicConfig};
///
/// let images = ArrayD::<f32>::zeros(vec![8, 4, 4, 3]);
/// let labels = vec![0, 0, 0, 0, 1, 1, 1, 1];
/// let dataset = ImageDataset::new(images, labels, ImageLayout::Hwc).unwrap();
///
/// let composer = MosaicComposer::new(MosaicConfig::new(2).with_seed(42)).unwrap();
/// let batch = composer.compose(&dataset).unwrap();
///
/// assert_eq!(batch.len(), 4);
/// assert_eq!(batch.mosaic_shape(), &[8, 8, 3]);
/// assert_eq!(batch.targets(), vec![0, 0, 1, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct MosaicComposer<L> {
    config: MosaicConfig<L>,
}

impl<L: ClassLabel> MosaicComposer<L> {
    /// Create a composer, validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::InvalidParameter`] if the configuration is invalid.
    pub fn new(config: MosaicConfig<L>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The composer's configuration.
    #[must_use]
    pub fn config(&self) -> &MosaicConfig<L> {
        &self.config
    }

    /// Generate mosaics one target class at a time.
    ///
    /// Classes are visited in ascending label order and share one generator
    /// pair, so draining the iterator yields exactly what [`compose`] returns.
    ///
    /// # Errors
    ///
    /// Fails before any sampling if fewer than two classes are available or if
    /// any class has no images.
    ///
    /// [`compose`]: Self::compose
    pub fn iter_classes<'a>(&self, dataset: &'a ImageDataset<L>) -> Result<ClassMosaicIter<'a, L>> {
        let classes = match &self.config.classes {
            Some(classes) => {
                let mut classes = classes.clone();
                classes.sort();
                classes
            }
            None => dataset.classes(),
        };

        if classes.len() < 2 {
            return Err(MosaicError::TooFewClasses {
                found: classes.len(),
            });
        }

        let groups: Vec<ClassGroup<L>> =
            classes.iter().map(|label| dataset.class_group(label)).collect();

        if let Some(empty) = groups.iter().find(|group| group.is_empty()) {
            return Err(MosaicError::EmptyClass {
                class: empty.label().to_string(),
            });
        }

        tracing::debug!(
            n_classes = groups.len(),
            mosaics_per_class = self.config.mosaics_per_class,
            seeded = self.config.seed.is_some(),
            "Starting mosaic composition"
        );

        Ok(ClassMosaicIter {
            dataset,
            groups,
            rngs: RngPair::new(self.config.seed()),
            mosaics_per_class: self.config.mosaics_per_class,
            position: 0,
        })
    }

    /// Generate `mosaics_per_class` mosaics for every class.
    ///
    /// Mosaics are ordered by target class, then by generation order within
    /// the class, and stacked along a new leading axis.
    pub fn compose(&self, dataset: &ImageDataset<L>) -> Result<MosaicBatch<L>> {
        let classes = self.iter_classes(dataset)?;
        let n_classes = classes.n_classes();
        let mut mosaics = Vec::with_capacity(n_classes * self.config.mosaics_per_class);
        let mut records = Vec::with_capacity(mosaics.capacity());

        for class_mosaics in classes {
            let class_mosaics = class_mosaics?;
            mosaics.extend(class_mosaics.mosaics);
            records.extend(class_mosaics.records);
        }

        let views: Vec<ArrayViewD<'_, f32>> = mosaics.iter().map(|m| m.view()).collect();
        let stacked =
            stack(Axis(0), &views).map_err(|e| MosaicError::ShapeMismatch(e.to_string()))?;

        tracing::info!(
            n_mosaics = records.len(),
            n_classes,
            mosaic_shape = ?&stacked.shape()[1..],
            "Composed mosaic batch"
        );

        Ok(MosaicBatch::new(stacked, records))
    }
}

/// Iterator over per-class mosaic groups, created by
/// [`MosaicComposer::iter_classes`].
///
/// Stops after the first error.
#[derive(Debug)]
pub struct ClassMosaicIter<'a, L> {
    dataset: &'a ImageDataset<L>,
    groups: Vec<ClassGroup<L>>,
    rngs: RngPair,
    mosaics_per_class: usize,
    position: usize,
}

impl<'a, L: ClassLabel> ClassMosaicIter<'a, L> {
    /// Number of target classes this iterator visits in total.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.groups.len()
    }

    fn compose_class(&mut self, target_pos: usize) -> Result<ClassMosaics<L>> {
        let n_slots = 2 * self.mosaics_per_class;
        let target = &self.groups[target_pos];
        let target_class = target.label().clone();
        let outer: Vec<&ClassGroup<L>> = self
            .groups
            .iter()
            .enumerate()
            .filter(|(pos, _)| *pos != target_pos)
            .map(|(_, group)| group)
            .collect();

        let (numeric, shuffle) = self.rngs.streams();
        let target_pool = target_pool(target.indices(), n_slots, numeric);
        let outer_pool = outer_pool(&outer, n_slots, numeric, shuffle);

        tracing::debug!(
            target_class = %target_class,
            class_size = target.len(),
            target_pool = target_pool.len(),
            outer_pool = outer_pool.len(),
            "Sampled mosaic pools"
        );

        let layout: ImageLayout = self.dataset.layout();
        let images = self.dataset.images();
        let mut mosaics = Vec::with_capacity(self.mosaics_per_class);
        let mut records = Vec::with_capacity(self.mosaics_per_class);

        // Pools may be longer than n_slots; the tail is never read.
        for (targets, outers) in target_pool
            .chunks_exact(2)
            .zip(outer_pool.chunks_exact(2))
            .take(self.mosaics_per_class)
        {
            let mut quadrants = [
                (targets[0], target_class.clone()),
                (targets[1], target_class.clone()),
                outers[0].clone(),
                outers[1].clone(),
            ];
            quadrants.shuffle(shuffle);

            let tiles: Vec<ArrayViewD<'_, f32>> = quadrants
                .iter()
                .map(|(index, _)| images.index_axis(Axis(0), *index))
                .collect();
            mosaics.push(build_single_mosaic(&tiles, layout)?);
            records.push(MosaicRecord::from_quadrants(&quadrants, &target_class));
        }

        Ok(ClassMosaics {
            target_class,
            mosaics,
            records,
        })
    }
}

impl<L: ClassLabel> Iterator for ClassMosaicIter<'_, L> {
    type Item = Result<ClassMosaics<L>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.groups.len() {
            return None;
        }

        let result = self.compose_class(self.position);
        self.position = if result.is_ok() {
            self.position + 1
        } else {
            self.groups.len()
        };
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.groups.len() - self.position;
        (0, Some(remaining))
    }
}

/// Repeat every member `ceil(n_slots / len)` times, then shuffle.
///
/// Within one repetition block no member appears twice, so small classes are
/// sampled with replacement only as far as needed.
fn target_pool<R: Rng + ?Sized>(members: &[usize], n_slots: usize, numeric: &mut R) -> Vec<usize> {
    let repeats = n_slots.div_ceil(members.len());
    let mut pool: Vec<usize> = members
        .iter()
        .flat_map(|&index| std::iter::repeat(index).take(repeats))
        .collect();
    pool.shuffle(numeric);
    pool
}

/// Draw `ceil(n_slots / n_outer)` members with replacement from each outer
/// class, tag them with their class, and shuffle the concatenation.
fn outer_pool<L, R, S>(
    outer: &[&ClassGroup<L>],
    n_slots: usize,
    numeric: &mut R,
    shuffle: &mut S,
) -> Vec<(usize, L)>
where
    L: ClassLabel,
    R: Rng + ?Sized,
    S: Rng + ?Sized,
{
    let per_class = n_slots.div_ceil(outer.len());
    let mut pool = Vec::with_capacity(per_class * outer.len());

    for group in outer {
        let members = group.indices();
        pool.extend((0..per_class).map(|_| {
            let index = members[numeric.gen_range(0..members.len())];
            (index, group.label().clone())
        }));
    }

    pool.shuffle(shuffle);
    pool
}

/// Compose mosaics straight from an image array and its labels.
///
/// Returns `(mosaics, source_indices, quadrant_labels, membership_flags,
/// targets)`; see [`MosaicBatch::into_parts`].
///
/// # Errors
///
/// Fails immediately on an image/label length mismatch or an empty dataset,
/// and before sampling on a zero `mosaics_per_class`.
///
/// # Example
///
/// ```rust
/// use ndarray::ArrayD;
/// use seval_core::ImageLayout;
/// use seval_mosaic::compose;
///
/// let images = ArrayD::<f32>::zeros(vec![6, 2, 2, 1]);
/// let labels = vec!["a", "b", "c", "a", "b", "c"];
/// let (mosaics, _, _, flags, targets) =
///     compose(images, labels, ImageLayout::Hwc, 1, Some(7)).unwrap();
///
/// assert_eq!(mosaics.shape(), &[3, 4, 4, 1]);
/// assert_eq!(targets, vec!["a", "b", "c"]);
/// assert!(flags.iter().all(|f| f.iter().sum::<u8>() == 2));
/// ```
pub fn compose<L: ClassLabel>(
    images: ArrayD<f32>,
    labels: Vec<L>,
    layout: ImageLayout,
    mosaics_per_class: usize,
    seed: Option<u64>,
) -> Result<MosaicParts<L>> {
    let dataset = ImageDataset::new(images, labels, layout)?;

    let mut config = MosaicConfig::new(mosaics_per_class);
    config.seed = seed;

    let batch = MosaicComposer::new(config)?.compose(&dataset)?;
    Ok(batch.into_parts())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seval_core::Seed;
    use seval_data::DataError;
    use std::collections::HashSet;

    /// Dataset whose image `i` is filled with the value `i`.
    fn indexed_dataset<L: ClassLabel>(labels: Vec<L>) -> ImageDataset<L> {
        let n = labels.len();
        let images = ArrayD::from_shape_fn(vec![n, 2, 3, 1], |ix| ix[0] as f32);
        ImageDataset::new(images, labels, ImageLayout::Hwc).unwrap()
    }

    fn composer<L: ClassLabel>(per_class: usize, seed: Option<u64>) -> MosaicComposer<L> {
        let mut config = MosaicConfig::new(per_class);
        config.seed = seed;
        MosaicComposer::new(config).unwrap()
    }

    #[test]
    fn test_target_pool_repeats_then_shuffles() {
        let mut rng = Seed::new(1).to_rng();
        let pool = target_pool(&[4, 9], 5, &mut rng);

        // ceil(5 / 2) = 3 copies of each member
        assert_eq!(pool.len(), 6);
        assert_eq!(pool.iter().filter(|&&i| i == 4).count(), 3);
        assert_eq!(pool.iter().filter(|&&i| i == 9).count(), 3);
    }

    #[test]
    fn test_target_pool_large_class_no_repeats() {
        let members: Vec<usize> = (0..20).collect();
        let mut rng = Seed::new(1).to_rng();
        let pool = target_pool(&members, 4, &mut rng);

        assert_eq!(pool.len(), 20);
        let unique: HashSet<_> = pool.iter().collect();
        assert_eq!(unique.len(), 20);
    }

    #[test]
    fn test_outer_pool_sizes_and_tags() {
        let dataset = indexed_dataset(vec![0, 1, 1, 2, 2, 2]);
        let groups = dataset.class_groups();
        let outer: Vec<_> = groups[1..].iter().collect();
        let mut numeric = Seed::new(1).to_stream_rng(0);
        let mut shuffle = Seed::new(1).to_stream_rng(1);

        // ceil(6 / 2) = 3 draws per outer class
        let pool = outer_pool(&outer, 6, &mut numeric, &mut shuffle);
        assert_eq!(pool.len(), 6);
        assert_eq!(pool.iter().filter(|(_, l)| *l == 1).count(), 3);
        assert_eq!(pool.iter().filter(|(_, l)| *l == 2).count(), 3);
        for (index, label) in &pool {
            assert_eq!(dataset.labels()[*index], *label);
        }
    }

    #[test]
    fn test_two_class_scenario() {
        let dataset = indexed_dataset(vec![0, 0, 0, 0, 1, 1, 1, 1]);
        let batch = composer(2, Some(42)).compose(&dataset).unwrap();

        assert_eq!(batch.len(), 4);
        assert_eq!(batch.targets(), vec![0, 0, 1, 1]);

        for record in batch.records() {
            let expected: std::ops::Range<usize> = if record.target_class == 0 { 0..4 } else { 4..8 };
            for q in record.target_quadrants() {
                assert!(expected.contains(&record.source_indices[q]));
            }
        }
    }

    #[test]
    fn test_record_invariants() {
        let labels = vec![0, 1, 2, 0, 1, 2, 0, 1, 2, 2, 2];
        let dataset = indexed_dataset(labels.clone());
        let batch = composer(5, Some(3)).compose(&dataset).unwrap();

        assert_eq!(batch.len(), 15);
        for record in batch.records() {
            assert_eq!(record.membership_flags.iter().sum::<u8>(), 2);
            for q in 0..4 {
                let index = record.source_indices[q];
                assert!(index < labels.len());
                assert_eq!(labels[index], record.quadrant_labels[q]);
                let is_target = record.quadrant_labels[q] == record.target_class;
                assert_eq!(record.membership_flags[q] == 1, is_target);
            }
        }
    }

    #[test]
    fn test_quadrant_pixels_match_source() {
        let dataset = indexed_dataset(vec![0, 1, 0, 1, 2]);
        let batch = composer(3, Some(9)).compose(&dataset).unwrap();

        for (i, record) in batch.records().iter().enumerate() {
            let mosaic = batch.mosaic(i).unwrap();
            assert_eq!(mosaic.shape(), &[4, 6, 1]);
            let corners: [[usize; 3]; 4] = [[0, 0, 0], [0, 3, 0], [2, 0, 0], [2, 3, 0]];
            for (q, corner) in corners.iter().enumerate() {
                assert_eq!(mosaic[&corner[..]], record.source_indices[q] as f32);
            }
        }
    }

    #[test]
    fn test_seeded_runs_identical() {
        let dataset = indexed_dataset(vec![0, 1, 2, 0, 1, 2, 1]);
        let a = composer(4, Some(123)).compose(&dataset).unwrap();
        let b = composer(4, Some(123)).compose(&dataset).unwrap();

        assert_eq!(a.records(), b.records());
        assert_eq!(a.mosaics(), b.mosaics());
    }

    #[test]
    fn test_different_seeds_differ() {
        let dataset = indexed_dataset((0..40).map(|i| i % 4).collect::<Vec<i64>>());
        let a = composer(6, Some(1)).compose(&dataset).unwrap();
        let b = composer(6, Some(2)).compose(&dataset).unwrap();
        assert_ne!(a.source_indices(), b.source_indices());
    }

    #[test]
    fn test_unseeded_runs_vary() {
        let dataset = indexed_dataset((0..16).map(|i| i % 2).collect::<Vec<i64>>());
        let first = composer(3, None).compose(&dataset).unwrap().source_indices();
        let varied = (0..20).any(|_| {
            composer::<i64>(3, None)
                .compose(&dataset)
                .unwrap()
                .source_indices()
                != first
        });
        assert!(varied);
    }

    #[test]
    fn test_iter_classes_matches_compose() {
        let dataset = indexed_dataset(vec![3, 1, 2, 1, 3, 2]);
        let composer = composer(2, Some(5));

        let per_class: Vec<ClassMosaics<i64>> = composer
            .iter_classes(&dataset)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        let batch = composer.compose(&dataset).unwrap();

        let targets: Vec<i64> = per_class.iter().map(|c| c.target_class).collect();
        assert_eq!(targets, vec![1, 2, 3]);

        let records: Vec<_> = per_class.into_iter().flat_map(|c| c.records).collect();
        assert_eq!(records, batch.records());
    }

    #[test]
    fn test_singleton_class_uses_repetition() {
        let dataset = indexed_dataset(vec![0, 1, 1, 1]);
        let batch = composer(5, Some(0)).compose(&dataset).unwrap();

        assert_eq!(batch.len(), 10);
        for record in batch.records().iter().filter(|r| r.target_class == 0) {
            let flagged: Vec<usize> = record
                .target_quadrants()
                .map(|q| record.source_indices[q])
                .collect();
            assert_eq!(flagged, vec![0, 0]);
        }
    }

    #[test]
    fn test_single_class_rejected() {
        let dataset = indexed_dataset(vec![7, 7, 7]);
        let err = composer(1, Some(1)).compose(&dataset).unwrap_err();
        assert!(matches!(err, MosaicError::TooFewClasses { found: 1 }));
    }

    #[test]
    fn test_explicit_class_without_images() {
        let dataset = indexed_dataset(vec![0, 1, 0, 1]);
        let config = MosaicConfig::new(1).with_seed(1).with_classes(vec![0, 1, 5]);
        let err = MosaicComposer::new(config)
            .unwrap()
            .compose(&dataset)
            .unwrap_err();
        assert!(matches!(err, MosaicError::EmptyClass { ref class } if class == "5"));
    }

    #[test]
    fn test_explicit_class_subset() {
        let dataset = indexed_dataset(vec![0, 1, 2, 0, 1, 2]);
        let config = MosaicConfig::new(2).with_seed(1).with_classes(vec![2, 0]);
        let batch = MosaicComposer::new(config).unwrap().compose(&dataset).unwrap();

        assert_eq!(batch.targets(), vec![0, 0, 2, 2]);
        for labels in batch.quadrant_labels() {
            assert!(!labels.contains(&1));
        }
    }

    #[test]
    fn test_zero_mosaics_rejected() {
        let images = ArrayD::<f32>::zeros(vec![2, 2, 2, 1]);
        let err = compose(images, vec![0, 1], ImageLayout::Hwc, 0, Some(1)).unwrap_err();
        assert!(matches!(err, MosaicError::InvalidParameter(_)));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let images = ArrayD::<f32>::zeros(vec![3, 2, 2, 1]);
        let err = compose(images, vec![0, 1], ImageLayout::Hwc, 1, Some(1)).unwrap_err();
        assert!(matches!(
            err,
            MosaicError::Data(DataError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_input_rejected() {
        let images = ArrayD::<f32>::zeros(vec![0, 2, 2, 1]);
        let err = compose::<i64>(images, Vec::new(), ImageLayout::Hwc, 1, Some(1)).unwrap_err();
        assert!(matches!(err, MosaicError::Data(DataError::EmptyDataset)));
    }

    #[test]
    fn test_string_labels_sorted() {
        let labels: Vec<String> = ["zebra", "ant", "moth", "ant", "zebra", "moth"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let dataset = indexed_dataset(labels);
        let batch = composer(1, Some(8)).compose(&dataset).unwrap();
        assert_eq!(batch.targets(), vec!["ant", "moth", "zebra"]);
    }
}
