//! Configuration for fitting the canvas onto the source image

use super::error::LayoutError;
use super::types::Gravity;

/// Configuration options for canvas fitting
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Where the canvas sits within the region when aspect ratios differ
    pub gravity: Gravity,

    /// Shrink factor of the canvas within the region (at least 1.0)
    pub scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gravity: Gravity::default(),
            scale: 1.0,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the horizontal and vertical gravity
    pub fn with_gravity(mut self, x: f64, y: f64) -> Self {
        self.gravity = Gravity::new(x, y);
        self
    }

    /// Set the scale factor
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Check the configuration before it is used for fitting
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.scale >= 1.0) {
            return Err(LayoutError::ScaleTooSmall { scale: self.scale });
        }
        for (axis, value) in [('x', self.gravity.x), ('y', self.gravity.y)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(LayoutError::GravityOutOfRange { axis, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config.gravity, Gravity::new(0.5, 0.5));
        assert_eq!(config.scale, 1.0);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_builder_pattern() {
        let config = LayoutConfig::new().with_gravity(0.0, 1.0).with_scale(1.5);

        assert_eq!(config.gravity, Gravity::new(0.0, 1.0));
        assert_eq!(config.scale, 1.5);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_scale_too_small() {
        let config = LayoutConfig::new().with_scale(0.99);
        assert_eq!(
            config.validate(),
            Err(LayoutError::ScaleTooSmall { scale: 0.99 })
        );
        assert!(LayoutConfig::new().with_scale(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_gravity_out_of_range() {
        let config = LayoutConfig::new().with_gravity(0.5, 1.5);
        assert_eq!(
            config.validate(),
            Err(LayoutError::GravityOutOfRange {
                axis: 'y',
                value: 1.5
            })
        );
    }
}
