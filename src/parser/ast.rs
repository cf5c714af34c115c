//! Syntax tree types for screen and crop specifications

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A number with an optional unit suffix, exactly as written
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: Option<Spanned<String>>,
}

impl Quantity {
    pub fn unit_str(&self) -> Option<&str> {
        self.unit.as_ref().map(|u| u.node.as_str())
    }
}

/// `WxH/DENSITY[UNIT][@TOP[UNIT]][+GAP[UNIT]]`
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenDecl {
    pub width: Spanned<u32>,
    pub height: Spanned<u32>,
    pub density: Spanned<Quantity>,
    pub top: Option<Spanned<Quantity>>,
    pub gap: Option<Spanned<Quantity>>,
}

/// Which edge an X11 geometry offset is measured from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// `+`: from the left or top edge
    #[default]
    Start,
    /// `-`: from the right or bottom edge
    End,
}

impl Side {
    pub fn sign(&self) -> char {
        match self {
            Side::Start => '+',
            Side::End => '-',
        }
    }
}

/// `WxH[(+|-)X[(+|-)Y]]`
#[derive(Debug, Clone, PartialEq)]
pub struct RegionDecl {
    pub width: Spanned<u32>,
    pub height: Spanned<u32>,
    pub x: Option<(Side, u32)>,
    pub y: Option<(Side, u32)>,
}

/// A parsed screen with its physical properties in canonical units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSpec {
    pub width_px: u32,
    pub height_px: u32,
    /// Pixels per meter, always positive
    pub density_ppm: f64,
    /// Vertical offset from the shared reference line, in meters
    pub top_m: f64,
    /// Horizontal spacing from the previous screen in the group, in meters
    pub gap_m: f64,
}

impl ScreenSpec {
    pub fn width_m(&self) -> f64 {
        f64::from(self.width_px) / self.density_ppm
    }

    pub fn height_m(&self) -> f64 {
        f64::from(self.height_px) / self.density_ppm
    }
}

/// A crop window within the source image, in X11 geometry convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub width_px: u32,
    pub height_px: u32,
    pub x_px: u32,
    pub x_side: Side,
    pub y_px: u32,
    pub y_side: Side,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{}{}{}{}{}",
            self.width_px,
            self.height_px,
            self.x_side.sign(),
            self.x_px,
            self.y_side.sign(),
            self.y_px
        )
    }
}
