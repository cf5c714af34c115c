//! Layout engine for slicing a source image across physical screens
//!
//! This module takes parsed screen groups and the source image size, and
//! computes one consistent projection of the image onto every screen,
//! producing a LayoutResult with positioned screens and per-panel crops.

pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod fit;
pub mod types;

pub use config::LayoutConfig;
pub use engine::{layout_group, layout_groups, top_offset};
pub use error::LayoutError;
pub use extract::extract_panels;
pub use fit::{fit_canvas, resolve_region};
pub use types::*;

use crate::parser::ast::{Region, ScreenSpec};

/// Everything computed for one run
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    /// Screens with their physical boxes, grouped as given
    pub groups: Vec<PositionedGroup>,
    /// The single mapping shared by every panel
    pub projection: Projection,
    /// Crop and output size per screen, grouped as given
    pub panels: Vec<Vec<PanelCrop>>,
}

/// Compute the layout of all groups on a source image of the given size
pub fn compute(
    groups: &[Vec<ScreenSpec>],
    image: ImageSize,
    region: Option<&Region>,
    config: &LayoutConfig,
) -> Result<LayoutResult, LayoutError> {
    let positioned = layout_groups(groups)?;
    let projection = fit_canvas(positioned.iter().flatten(), image, region, config)?;
    let panels = extract_panels(&positioned, &projection, image)?;
    Ok(LayoutResult {
        groups: positioned,
        projection,
        panels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(width_px: u32, height_px: u32, density_ppm: f64) -> ScreenSpec {
        ScreenSpec {
            width_px,
            height_px,
            density_ppm,
            top_m: 0.0,
            gap_m: 0.0,
        }
    }

    #[test]
    fn test_compute_exact_fit() {
        // Two 1m x 0.5m screens side by side exactly cover a 2000x500 image
        let groups = vec![vec![screen(1000, 500, 1000.0), screen(1000, 500, 1000.0)]];
        let result = compute(
            &groups,
            ImageSize::new(2000, 500),
            None,
            &LayoutConfig::default(),
        )
        .expect("Should compute");

        assert_eq!(result.projection.ratio, 1000.0);
        assert_eq!(result.panels[0][0].crop, PixelRect::new(0, 0, 1000, 500));
        assert_eq!(result.panels[0][1].crop, PixelRect::new(1000, 0, 1000, 500));
    }

    #[test]
    fn test_compute_rejects_bad_scale_before_layout_errors() {
        let groups = vec![vec![screen(100, 100, 100.0)]];
        let config = LayoutConfig::new().with_scale(0.0);
        assert_eq!(
            compute(&groups, ImageSize::new(10, 10), None, &config),
            Err(LayoutError::ScaleTooSmall { scale: 0.0 })
        );
    }
}
