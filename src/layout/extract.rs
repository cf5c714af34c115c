//! Panel extraction: per-screen pixel crops on the source image

use tracing::debug;

use super::error::LayoutError;
use super::types::{ImageSize, PanelCrop, PixelRect, PositionedGroup, PositionedScreen, Projection};

/// Round to the nearest integer, ties to even
fn round(v: f64) -> i64 {
    v.round_ties_even() as i64
}

/// Build a pixel rectangle, checking it lies within the image
fn checked_rect(left: i64, top: i64, width: i64, height: i64, image: ImageSize) -> Option<PixelRect> {
    let axis_ok = |start: i64, extent: i64, size: u32| {
        let size = i64::from(size);
        (0..size).contains(&start) && (0..=size).contains(&extent) && start + extent <= size
    };
    if !axis_ok(left, width, image.width) || !axis_ok(top, height, image.height) {
        return None;
    }
    // Every component is within [0, size] here
    Some(PixelRect::new(
        left as u32,
        top as u32,
        width as u32,
        height as u32,
    ))
}

/// Map one screen through the projection, without bounds checking
fn project(screen: &PositionedScreen, projection: &Projection) -> (i64, i64, i64, i64) {
    let b = &screen.bounds;
    let x1 = projection.map_x(b.left);
    let x2 = projection.map_x(b.right);
    let y1 = projection.map_y(b.top);
    let y2 = projection.map_y(b.bottom);
    (round(x1), round(y1), round(x2 - x1), round(y2 - y1))
}

/// Compute the crop rectangle and output size for every screen.
///
/// A rectangle reaching outside of the image means the screen descriptions
/// do not agree with the source image, and is reported as
/// [`LayoutError::CropOutOfBounds`] with 1-based group and screen numbers.
pub fn extract_panels(
    groups: &[PositionedGroup],
    projection: &Projection,
    image: ImageSize,
) -> Result<Vec<Vec<PanelCrop>>, LayoutError> {
    groups
        .iter()
        .enumerate()
        .map(|(g, group)| {
            group
                .iter()
                .enumerate()
                .map(|(s, screen)| -> Result<PanelCrop, LayoutError> {
                    let (left, top, width, height) = project(screen, projection);
                    let crop = checked_rect(left, top, width, height, image).ok_or(
                        LayoutError::CropOutOfBounds {
                            group: g + 1,
                            screen: s + 1,
                            left,
                            top,
                            width,
                            height,
                            image,
                        },
                    )?;
                    let target = ImageSize::new(screen.spec.width_px, screen.spec.height_px);
                    debug!(group = g + 1, screen = s + 1, "crop {} -> {}", crop, target);
                    Ok(PanelCrop { crop, target })
                })
                .collect::<Result<Vec<_>, LayoutError>>()
        })
        .collect()
}
