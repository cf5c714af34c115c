//! Box layout: physical placement of screens
//!
//! Each group is laid out left to right on its own, starting at `left = 0`,
//! while all groups share one vertical reference so that the topmost screen
//! of the whole arrangement sits at `top = 0`.

use tracing::debug;

use crate::parser::ast::ScreenSpec;

use super::error::LayoutError;
use super::types::{PhysicalBox, PositionedGroup, PositionedScreen};

/// Smallest `top_m` across every screen of every group
pub fn top_offset(groups: &[Vec<ScreenSpec>]) -> Option<f64> {
    groups
        .iter()
        .flatten()
        .map(|s| s.top_m)
        .reduce(f64::min)
}

/// Lay out one group of screens against a shared vertical offset
pub fn layout_group(group: &[ScreenSpec], top_offset: f64) -> PositionedGroup {
    let mut right = 0.0;
    group
        .iter()
        .map(|spec| {
            let left = right + spec.gap_m;
            let top = spec.top_m - top_offset;
            let bounds = PhysicalBox::new(
                left,
                left + spec.width_m(),
                top,
                top + spec.height_m(),
            );
            right = bounds.right;
            PositionedScreen {
                spec: *spec,
                bounds,
            }
        })
        .collect()
}

/// Lay out every group
///
/// The vertical offset is computed over all groups before any group is
/// placed, so screens of different machines line up with each other.
pub fn layout_groups(groups: &[Vec<ScreenSpec>]) -> Result<Vec<PositionedGroup>, LayoutError> {
    let offset = top_offset(groups).ok_or(LayoutError::NoScreens)?;

    let positioned: Vec<PositionedGroup> = groups
        .iter()
        .map(|group| layout_group(group, offset))
        .collect();

    for (g, group) in positioned.iter().enumerate() {
        for (s, screen) in group.iter().enumerate() {
            let b = &screen.bounds;
            debug!(
                group = g + 1,
                screen = s + 1,
                "box left={:.4}m right={:.4}m top={:.4}m bottom={:.4}m",
                b.left,
                b.right,
                b.top,
                b.bottom
            );
        }
    }

    Ok(positioned)
}
