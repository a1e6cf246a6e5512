//! Tiling four images into one 2×2 mosaic.

use ndarray::{concatenate, ArrayD, ArrayViewD, Axis};
use seval_core::{CoreError, ImageLayout};

use crate::error::{MosaicError, Result};

/// Frame exactly four same-shaped images into a 2×2 mosaic.
///
/// Quadrants are filled row-major: `images[0]` top-left, `images[1]`
/// top-right, `images[2]` bottom-left, `images[3]` bottom-right. Each row is
/// joined along the layout's width axis and the two rows are stacked along its
/// height axis, so an `(H, W, C)` input yields a `(2H, 2W, C)` mosaic. Channel
/// axes are left in place.
///
/// # Errors
///
/// Fails if `images.len() != 4`, if the image rank does not match `layout`, or
/// if the four shapes differ.
///
/// # Example
///
/// ```rust
/// use ndarray::ArrayD;
/// use seval_core::ImageLayout;
/// use seval_mosaic::build_single_mosaic;
///
/// let tiles: Vec<ArrayD<f32>> = (0..4)
///     .map(|i| ArrayD::from_elem(vec![2, 3, 1], i as f32))
///     .collect();
/// let views: Vec<_> = tiles.iter().map(|t| t.view()).collect();
///
/// let mosaic = build_single_mosaic(&views, ImageLayout::Hwc).unwrap();
/// assert_eq!(mosaic.shape(), &[4, 6, 1]);
/// assert_eq!(mosaic[[0, 5, 0]], 1.0); // top-right
/// assert_eq!(mosaic[[3, 0, 0]], 2.0); // bottom-left
/// ```
pub fn build_single_mosaic(
    images: &[ArrayViewD<'_, f32>],
    layout: ImageLayout,
) -> Result<ArrayD<f32>> {
    if images.len() != 4 {
        return Err(MosaicError::WrongImageCount { got: images.len() });
    }

    let first = images[0].shape();
    if first.len() != layout.ndim() {
        return Err(CoreError::DimensionError {
            expected: layout.ndim(),
            got: first.len(),
        }
        .into());
    }

    if let Some(other) = images.iter().find(|img| img.shape() != first) {
        return Err(MosaicError::ShapeMismatch(format!(
            "mosaic tiles must share a shape: {:?} vs {:?}",
            first,
            other.shape()
        )));
    }

    let width = Axis(layout.width_axis());
    let height = Axis(layout.height_axis());

    let top = concat_pair(width, images[0].view(), images[1].view())?;
    let bottom = concat_pair(width, images[2].view(), images[3].view())?;
    concat_pair(height, top.view(), bottom.view())
}

fn concat_pair<'v>(axis: Axis, a: ArrayViewD<'v, f32>, b: ArrayViewD<'v, f32>) -> Result<ArrayD<f32>> {
    concatenate(axis, &[a, b]).map_err(|e| MosaicError::ShapeMismatch(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiles(dims: &[usize]) -> Vec<ArrayD<f32>> {
        (0..4)
            .map(|i| ArrayD::from_elem(dims.to_vec(), i as f32))
            .collect()
    }

    fn quadrant_values(mosaic: &ArrayD<f32>, layout: ImageLayout) -> [f32; 4] {
        let h = mosaic.shape()[layout.height_axis()] / 2;
        let w = mosaic.shape()[layout.width_axis()] / 2;
        let at = |row: usize, col: usize| {
            let mut ix = vec![0; mosaic.ndim()];
            ix[layout.height_axis()] = row;
            ix[layout.width_axis()] = col;
            mosaic[ix.as_slice()]
        };
        [at(0, 0), at(0, w), at(h, 0), at(h, w)]
    }

    #[test]
    fn test_hwc_mosaic() {
        let tiles = tiles(&[3, 5, 2]);
        let views: Vec<_> = tiles.iter().map(|t| t.view()).collect();

        let mosaic = build_single_mosaic(&views, ImageLayout::Hwc).unwrap();
        assert_eq!(mosaic.shape(), &[6, 10, 2]);
        assert_eq!(quadrant_values(&mosaic, ImageLayout::Hwc), [0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_chw_mosaic_keeps_channels_first() {
        let tiles = tiles(&[3, 4, 4]);
        let views: Vec<_> = tiles.iter().map(|t| t.view()).collect();

        let mosaic = build_single_mosaic(&views, ImageLayout::Chw).unwrap();
        assert_eq!(mosaic.shape(), &[3, 8, 8]);
        assert_eq!(quadrant_values(&mosaic, ImageLayout::Chw), [0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_hw_mosaic() {
        let tiles = tiles(&[2, 3]);
        let views: Vec<_> = tiles.iter().map(|t| t.view()).collect();

        let mosaic = build_single_mosaic(&views, ImageLayout::Hw).unwrap();
        assert_eq!(mosaic.shape(), &[4, 6]);
        // Every cell of a quadrant comes from the same tile
        assert!(mosaic.slice(ndarray::s![2.., 3..]).iter().all(|&v| v == 3.0));
    }

    #[test]
    fn test_wrong_count() {
        let tiles = tiles(&[2, 2, 1]);
        let views: Vec<_> = tiles.iter().take(3).map(|t| t.view()).collect();

        let err = build_single_mosaic(&views, ImageLayout::Hwc).unwrap_err();
        assert!(matches!(err, MosaicError::WrongImageCount { got: 3 }));
    }

    #[test]
    fn test_shape_mismatch() {
        let mut tiles = tiles(&[2, 2, 1]);
        tiles[3] = ArrayD::zeros(vec![2, 3, 1]);
        let views: Vec<_> = tiles.iter().map(|t| t.view()).collect();

        let err = build_single_mosaic(&views, ImageLayout::Hwc).unwrap_err();
        assert!(matches!(err, MosaicError::ShapeMismatch(_)));
    }

    #[test]
    fn test_rank_mismatch() {
        let tiles = tiles(&[2, 2]);
        let views: Vec<_> = tiles.iter().map(|t| t.view()).collect();

        let err = build_single_mosaic(&views, ImageLayout::Hwc).unwrap_err();
        assert!(matches!(
            err,
            MosaicError::Core(CoreError::DimensionError { expected: 3, got: 2 })
        ));
    }
}
