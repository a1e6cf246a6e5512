//! Image layout and shape metadata.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Axis convention for a single image.
///
/// The layout fixes which axes hold height and width. The channel axis, if
/// any, is carried through untouched by every operation in seval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageLayout {
    /// Single channel `(H, W)`.
    Hw,
    /// Channels last `(H, W, C)`.
    #[default]
    Hwc,
    /// Channels first `(C, H, W)`.
    Chw,
}

impl ImageLayout {
    /// Number of axes of one image in this layout.
    #[must_use]
    pub const fn ndim(&self) -> usize {
        match self {
            Self::Hw => 2,
            Self::Hwc | Self::Chw => 3,
        }
    }

    /// Index of the height axis within one image.
    #[must_use]
    pub const fn height_axis(&self) -> usize {
        match self {
            Self::Hw | Self::Hwc => 0,
            Self::Chw => 1,
        }
    }

    /// Index of the width axis within one image.
    #[must_use]
    pub const fn width_axis(&self) -> usize {
        match self {
            Self::Hw | Self::Hwc => 1,
            Self::Chw => 2,
        }
    }

    /// Index of the channel axis, if the layout has one.
    #[must_use]
    pub const fn channel_axis(&self) -> Option<usize> {
        match self {
            Self::Hw => None,
            Self::Hwc => Some(2),
            Self::Chw => Some(0),
        }
    }
}

impl std::fmt::Display for ImageLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Hw => "hw",
            Self::Hwc => "hwc",
            Self::Chw => "chw",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ImageLayout {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "hw" => Ok(Self::Hw),
            "hwc" => Ok(Self::Hwc),
            "chw" => Ok(Self::Chw),
            other => Err(CoreError::InvalidParameter(format!(
                "unknown image layout '{other}', expected one of hw, hwc, chw"
            ))),
        }
    }
}

/// Shape of a single image under a given [`ImageLayout`].
///
/// # Example
///
/// ```rust
/// use seval_core::{ImageLayout, ImageShape};
///
/// let shape = ImageShape::from_dims(&[28, 28, 3], ImageLayout::Hwc).unwrap();
/// assert_eq!(shape.height(), 28);
/// assert_eq!(shape.channels(), 3);
/// assert_eq!(shape.mosaic().dims(), &[56, 56, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageShape {
    dims: Vec<usize>,
    layout: ImageLayout,
}

impl ImageShape {
    /// Create a shape from per-image dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of dimensions does not match the layout.
    pub fn from_dims(dims: &[usize], layout: ImageLayout) -> Result<Self> {
        if dims.len() != layout.ndim() {
            return Err(CoreError::DimensionError {
                expected: layout.ndim(),
                got: dims.len(),
            });
        }
        Ok(Self {
            dims: dims.to_vec(),
            layout,
        })
    }

    /// Raw dimensions in layout order.
    #[must_use]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// The layout these dimensions follow.
    #[must_use]
    pub const fn layout(&self) -> ImageLayout {
        self.layout
    }

    /// Image height.
    #[must_use]
    pub fn height(&self) -> usize {
        self.dims[self.layout.height_axis()]
    }

    /// Image width.
    #[must_use]
    pub fn width(&self) -> usize {
        self.dims[self.layout.width_axis()]
    }

    /// Number of channels (1 for [`ImageLayout::Hw`]).
    #[must_use]
    pub fn channels(&self) -> usize {
        self.layout.channel_axis().map_or(1, |axis| self.dims[axis])
    }

    /// Total number of elements in one image.
    #[must_use]
    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    /// Shape of a 2×2 mosaic built from four images of this shape.
    #[must_use]
    pub fn mosaic(&self) -> Self {
        let mut dims = self.dims.clone();
        dims[self.layout.height_axis()] *= 2;
        dims[self.layout.width_axis()] *= 2;
        Self {
            dims,
            layout: self.layout,
        }
    }
}

impl std::fmt::Display for ImageShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(H={}, W={}, C={}; {})",
            self.height(),
            self.width(),
            self.channels(),
            self.layout
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_axes() {
        assert_eq!(ImageLayout::Hwc.height_axis(), 0);
        assert_eq!(ImageLayout::Hwc.width_axis(), 1);
        assert_eq!(ImageLayout::Chw.height_axis(), 1);
        assert_eq!(ImageLayout::Chw.width_axis(), 2);
        assert_eq!(ImageLayout::Hw.channel_axis(), None);
    }

    #[test]
    fn test_layout_parse() {
        assert_eq!("CHW".parse::<ImageLayout>().unwrap(), ImageLayout::Chw);
        assert_eq!("hw".parse::<ImageLayout>().unwrap(), ImageLayout::Hw);
        assert!("nhwc".parse::<ImageLayout>().is_err());
    }

    #[test]
    fn test_shape_from_dims() {
        let shape = ImageShape::from_dims(&[3, 32, 16], ImageLayout::Chw).unwrap();
        assert_eq!(shape.height(), 32);
        assert_eq!(shape.width(), 16);
        assert_eq!(shape.channels(), 3);

        assert!(ImageShape::from_dims(&[32, 16], ImageLayout::Hwc).is_err());
        assert!(ImageShape::from_dims(&[32, 16, 3], ImageLayout::Hw).is_err());
    }

    #[test]
    fn test_mosaic_shape() {
        let hwc = ImageShape::from_dims(&[8, 4, 3], ImageLayout::Hwc).unwrap();
        assert_eq!(hwc.mosaic().dims(), &[16, 8, 3]);

        let chw = ImageShape::from_dims(&[1, 8, 4], ImageLayout::Chw).unwrap();
        assert_eq!(chw.mosaic().dims(), &[1, 16, 8]);

        let hw = ImageShape::from_dims(&[5, 7], ImageLayout::Hw).unwrap();
        assert_eq!(hw.mosaic().dims(), &[10, 14]);
        assert_eq!(hw.channels(), 1);
    }

    #[test]
    fn test_shape_serialization() {
        let shape = ImageShape::from_dims(&[28, 28, 1], ImageLayout::Hwc).unwrap();
        let json = serde_json::to_string(&shape).unwrap();
        let restored: ImageShape = serde_json::from_str(&json).unwrap();
        assert_eq!(shape, restored);
    }
}
