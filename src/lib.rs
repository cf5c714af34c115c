//! Wallsplit - Slice one image across screens of different size and density
//!
//! This library provides a spec parser, layout engine, and renderer that cut
//! a source image into per-screen wallpapers which line up physically when
//! the screens stand side by side.
//!
//! # Example
//!
//! ```rust
//! use std::path::Path;
//! use wallsplit::{parse_groups, plan, ImageSize};
//!
//! let groups = parse_groups(&[vec!["1000x500/1000", "1000x500/1000"]]).unwrap();
//! let plan = plan(
//!     Path::new("photo.png"),
//!     ImageSize::new(2000, 500),
//!     Path::new("wallpaper.png"),
//!     &groups,
//! )
//! .unwrap();
//!
//! assert_eq!(plan.jobs[0].panels[1].crop.to_string(), "1000x500+1000+0");
//! ```

pub mod error;
pub mod layout;
pub mod parser;
pub mod profile;
pub mod renderer;
pub mod units;

pub use error::ParseError;
pub use layout::{ImageSize, LayoutConfig, LayoutError, LayoutResult, PanelCrop, PixelRect};
pub use parser::{parse_region, parse_screen, Region, ScreenSpec};
pub use profile::{Profile, ProfileError};
pub use renderer::{
    EngineError, GroupJob, ImageEngine, MagickConfig, MagickEngine, RenderPlan,
};

use std::path::Path;

use thiserror::Error;
use tracing::info;

/// Errors that can occur during the split pipeline
#[derive(Debug, Error)]
pub enum SplitError {
    /// Error while parsing a screen or crop spec
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Error during layout
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Error reported by the image engine
    #[error("image error: {0}")]
    Engine(#[from] EngineError),

    /// Error loading a profile
    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),
}

impl From<Vec<ParseError>> for SplitError {
    fn from(errors: Vec<ParseError>) -> Self {
        SplitError::Parse(errors)
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration for the complete split pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Fit configuration (gravity and scale)
    pub layout: LayoutConfig,
    /// Part of the source image to use (whole image if unset)
    pub region: Option<Region>,
    /// ImageMagick invocation settings
    pub magick: MagickConfig,
    /// Compute and report the plan without touching any pixels
    pub pretend: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Restrict the source image to a region
    pub fn with_region(mut self, region: Option<Region>) -> Self {
        self.region = region;
        self
    }

    /// Set the ImageMagick configuration
    pub fn with_magick(mut self, config: MagickConfig) -> Self {
        self.magick = config;
        self
    }

    /// Enable or disable pretend mode
    pub fn with_pretend(mut self, pretend: bool) -> Self {
        self.pretend = pretend;
        self
    }
}

/// Parse screen specs, one list per group
///
/// Empty groups are skipped.
///
/// # Example
///
/// ```rust
/// use wallsplit::parse_groups;
///
/// let groups = parse_groups(&[vec!["2560x1440/59.8cm"], vec![], vec!["1920x1080/92dpi"]]).unwrap();
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[1][0].width_px, 1920);
/// ```
pub fn parse_groups<S: AsRef<str>>(groups: &[Vec<S>]) -> Result<Vec<Vec<ScreenSpec>>, SplitError> {
    let mut parsed = Vec::with_capacity(groups.len());
    for group in groups.iter().filter(|g| !g.is_empty()) {
        let screens = group
            .iter()
            .map(|spec| parse_screen(spec.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        parsed.push(screens);
    }
    Ok(parsed)
}

/// Compute the render plan with default configuration
pub fn plan(
    source: &Path,
    image: ImageSize,
    output: &Path,
    groups: &[Vec<ScreenSpec>],
) -> Result<RenderPlan, SplitError> {
    plan_with_config(source, image, output, groups, &RenderConfig::default())
}

/// Compute the render plan for a source image of known size
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use wallsplit::{parse_groups, parse_region, plan_with_config, ImageSize, LayoutConfig, RenderConfig};
///
/// let groups = parse_groups(&[vec!["1000x500/1000"], vec!["1000x500/1000"]]).unwrap();
/// let config = RenderConfig::new()
///     .with_layout(LayoutConfig::new().with_gravity(0.0, 0.0))
///     .with_region(Some(parse_region("1000x500+100+0").unwrap()));
///
/// let plan = plan_with_config(
///     Path::new("photo.png"),
///     ImageSize::new(2000, 1000),
///     Path::new("wall.png"),
///     &groups,
///     &config,
/// )
/// .unwrap();
///
/// assert_eq!(plan.jobs.len(), 2);
/// assert_eq!(plan.jobs[1].output, Path::new("2_wall.png"));
/// ```
pub fn plan_with_config(
    source: &Path,
    image: ImageSize,
    output: &Path,
    groups: &[Vec<ScreenSpec>],
    config: &RenderConfig,
) -> Result<RenderPlan, SplitError> {
    let result = layout::compute(groups, image, config.region.as_ref(), &config.layout)?;
    Ok(RenderPlan::new(source, image, output, result.panels))
}

/// Measure the source, compute the plan and produce the wallpapers
///
/// In pretend mode the source is still measured, since the geometry depends
/// on its size, but no image is cropped or written.
pub fn run<E: ImageEngine>(
    source: &Path,
    output: &Path,
    groups: &[Vec<ScreenSpec>],
    config: &RenderConfig,
    engine: &mut E,
) -> Result<RenderPlan, SplitError> {
    config.layout.validate()?;
    if groups.iter().all(|g| g.is_empty()) {
        return Err(LayoutError::NoScreens.into());
    }

    let image = engine.measure(source)?;
    info!("source {} is {}", source.display(), image);

    let plan = plan_with_config(source, image, output, groups, config)?;
    if config.pretend {
        info!("pretend mode, skipping {} outputs", plan.jobs.len());
    } else {
        renderer::execute(&plan, engine)?;
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_groups_reports_errors() {
        let result = parse_groups(&[vec!["1920x1080/92dpi", "1920x1080/92ft"]]);
        match result {
            Err(SplitError::Parse(errors)) => {
                assert!(matches!(errors[0], ParseError::InvalidUnit { .. }))
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_plan_single_group_writes_output() {
        let groups = parse_groups(&[vec!["1000x500/1000"]]).unwrap();
        let plan = plan(
            Path::new("a.png"),
            ImageSize::new(1000, 500),
            Path::new("out/b.png"),
            &groups,
        )
        .unwrap();
        assert_eq!(plan.jobs.len(), 1);
        assert_eq!(plan.jobs[0].output, Path::new("out/b.png"));
        assert_eq!(plan.jobs[0].panels[0].crop, PixelRect::new(0, 0, 1000, 500));
    }

    #[test]
    fn test_plan_without_screens() {
        let result = plan(
            Path::new("a.png"),
            ImageSize::new(10, 10),
            Path::new("b.png"),
            &[],
        );
        assert!(matches!(
            result,
            Err(SplitError::Layout(LayoutError::NoScreens))
        ));
    }

    #[test]
    fn test_split_error_display() {
        let err = SplitError::from(LayoutError::ScaleTooSmall { scale: 0.5 });
        assert!(err.to_string().starts_with("layout error:"));
    }
}
