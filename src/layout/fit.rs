//! Canvas fitting: one projection from physical space onto the source image

use tracing::debug;

use crate::parser::ast::{Region, Side};

use super::config::LayoutConfig;
use super::error::LayoutError;
use super::types::{FitAxis, ImageSize, PhysicalBox, PixelRect, PositionedScreen, Projection};

/// Resolve the working rectangle on the source image.
///
/// Without a region this is the whole image. Offsets measured from the right
/// or bottom edge (`-` side) are converted to offsets from the left or top.
pub fn resolve_region(region: Option<&Region>, image: ImageSize) -> Result<PixelRect, LayoutError> {
    let Some(region) = region else {
        return Ok(PixelRect::new(0, 0, image.width, image.height));
    };

    let anchor = |side: Side, offset: u32, extent: u32, size: u32| -> i64 {
        match side {
            Side::Start => i64::from(offset),
            Side::End => i64::from(size) - i64::from(offset) - i64::from(extent),
        }
    };
    let x = anchor(region.x_side, region.x_px, region.width_px, image.width);
    let y = anchor(region.y_side, region.y_px, region.height_px, image.height);

    let fits = |start: i64, extent: u32, size: u32| {
        start >= 0 && start + i64::from(extent) <= i64::from(size)
    };
    if !fits(x, region.width_px, image.width) || !fits(y, region.height_px, image.height) {
        return Err(LayoutError::region_out_of_bounds(region, x, y, image));
    }

    // Both offsets are within [0, size] here
    Ok(PixelRect::new(
        x as u32,
        y as u32,
        region.width_px,
        region.height_px,
    ))
}

/// Compute the projection of all screens onto the source image.
///
/// The canvas (union of every screen box) is scaled uniformly so that it
/// spans the working rectangle along the limiting axis, divided by the
/// configured scale, and positioned by gravity within the leftover space.
pub fn fit_canvas<'a>(
    screens: impl IntoIterator<Item = &'a PositionedScreen>,
    image: ImageSize,
    region: Option<&Region>,
    config: &LayoutConfig,
) -> Result<Projection, LayoutError> {
    config.validate()?;
    let area = resolve_region(region, image)?;
    let canvas = PhysicalBox::bounding(screens.into_iter().map(|s| &s.bounds))
        .ok_or(LayoutError::NoScreens)?;

    let area_width = f64::from(area.width);
    let area_height = f64::from(area.height);

    // A canvas flatter than the region is limited by the region's width
    let axis = if canvas.height() / canvas.width() < area_height / area_width {
        FitAxis::Width
    } else {
        FitAxis::Height
    };
    let ratio = match axis {
        FitAxis::Width => area_width / canvas.width() / config.scale,
        FitAxis::Height => area_height / canvas.height() / config.scale,
    };

    let gravity = config.gravity;
    let x_offset = gravity.x * (area_width - canvas.width() * ratio) + f64::from(area.left);
    let y_offset = gravity.y * (area_height - canvas.height() * ratio) + f64::from(area.top);

    debug!(
        "canvas {:.4}m x {:.4}m fit to {} by {:?}: ratio={:.3}px/m offset=({:.2}, {:.2})",
        canvas.width(),
        canvas.height(),
        area,
        axis,
        ratio,
        x_offset,
        y_offset
    );

    Ok(Projection {
        canvas,
        axis,
        ratio,
        x_offset,
        y_offset,
    })
}
