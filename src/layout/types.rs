//! Core types for the layout engine

use crate::parser::ast::ScreenSpec;

/// A rectangle in the shared physical coordinate space, in meters
///
/// `top` grows downwards, matching image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalBox {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl PhysicalBox {
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Compute the union of two boxes (smallest box containing both)
    pub fn union(&self, other: &PhysicalBox) -> PhysicalBox {
        PhysicalBox {
            left: self.left.min(other.left),
            right: self.right.max(other.right),
            top: self.top.min(other.top),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Union of all boxes, or `None` for an empty iterator
    pub fn bounding<'a>(boxes: impl IntoIterator<Item = &'a PhysicalBox>) -> Option<PhysicalBox> {
        boxes
            .into_iter()
            .copied()
            .reduce(|acc, b| acc.union(&b))
    }
}

/// A screen together with its derived physical position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionedScreen {
    pub spec: ScreenSpec,
    pub bounds: PhysicalBox,
}

/// Screens laid out for one output wallpaper, in input order
pub type PositionedGroup = Vec<PositionedScreen>;

/// Pixel dimensions of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// An integer rectangle on the source image, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// Rendered in ImageMagick geometry form, `WxH+X+Y`
impl std::fmt::Display for PixelRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.left, self.top)
    }
}

/// Normalized anchor of the canvas within the source region.
///
/// `0.0` aligns the start edges (left/top), `1.0` the end edges, `0.5` centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    pub x: f64,
    pub y: f64,
}

impl Gravity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self { x: 0.5, y: 0.5 }
    }
}

/// Which source dimension limits the fit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitAxis {
    /// The canvas spans the region's width
    Width,
    /// The canvas spans the region's height
    Height,
}

/// Mapping from physical canvas coordinates to source image pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Union of every screen box across all groups
    pub canvas: PhysicalBox,
    pub axis: FitAxis,
    /// Source pixels per meter
    pub ratio: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl Projection {
    /// Map a physical x coordinate to a source pixel column
    pub fn map_x(&self, x: f64) -> f64 {
        (x - self.canvas.left) * self.ratio + self.x_offset
    }

    /// Map a physical y coordinate to a source pixel row
    pub fn map_y(&self, y: f64) -> f64 {
        (y - self.canvas.top) * self.ratio + self.y_offset
    }
}

/// What to cut from the source image for one screen, and what to scale it to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelCrop {
    pub crop: PixelRect,
    pub target: ImageSize,
}
