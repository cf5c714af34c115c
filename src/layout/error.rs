//! Error types for the layout engine

use thiserror::Error;

use super::types::ImageSize;

/// Errors that can occur while fitting screens onto the source image
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    /// Nothing to lay out
    #[error("no screens specified")]
    NoScreens,

    /// Scale factors below one would map the canvas beyond the region
    #[error("scale must be at least 1.0, got {scale}")]
    ScaleTooSmall { scale: f64 },

    /// Gravity outside of `[0, 1]`
    #[error("{axis} gravity must be between 0 and 1, got {value}")]
    GravityOutOfRange { axis: char, value: f64 },

    /// The crop region does not fit inside the source image
    #[error("crop region {region} at ({x}, {y}) does not fit inside the {image} source image")]
    RegionOutOfBounds {
        region: String,
        x: i64,
        y: i64,
        image: ImageSize,
    },

    /// A screen maps outside of the source image
    #[error(
        "screen {screen} of group {group} maps to {width}x{height} at ({left}, {top}), \
         outside of the {image} source image"
    )]
    CropOutOfBounds {
        group: usize,
        screen: usize,
        left: i64,
        top: i64,
        width: i64,
        height: i64,
        image: ImageSize,
    },
}

impl LayoutError {
    /// Create a region out of bounds error
    pub fn region_out_of_bounds(region: impl ToString, x: i64, y: i64, image: ImageSize) -> Self {
        Self::RegionOutOfBounds {
            region: region.to_string(),
            x,
            y,
            image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_display() {
        let err = LayoutError::ScaleTooSmall { scale: 0.5 };
        assert_eq!(err.to_string(), "scale must be at least 1.0, got 0.5");
    }

    #[test]
    fn test_crop_out_of_bounds_display() {
        let err = LayoutError::CropOutOfBounds {
            group: 1,
            screen: 2,
            left: -3,
            top: 0,
            width: 100,
            height: 50,
            image: ImageSize::new(640, 480),
        };
        let msg = err.to_string();
        assert!(msg.contains("screen 2 of group 1"));
        assert!(msg.contains("100x50 at (-3, 0)"));
        assert!(msg.contains("640x480"));
    }
}
