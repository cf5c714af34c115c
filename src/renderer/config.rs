//! Configuration for the ImageMagick engine

use std::path::PathBuf;

/// Configuration options for invoking ImageMagick
#[derive(Debug, Clone, PartialEq)]
pub struct MagickConfig {
    /// Program used to crop, resize, append and convert images
    pub convert: String,

    /// Program used to read image dimensions
    pub identify: String,

    /// Directory to create the scratch directory in (system default if unset)
    pub scratch_parent: Option<PathBuf>,
}

impl Default for MagickConfig {
    fn default() -> Self {
        Self {
            convert: "convert".to_string(),
            identify: "identify".to_string(),
            scratch_parent: None,
        }
    }
}

impl MagickConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the program used for image conversion
    pub fn with_convert(mut self, program: impl Into<String>) -> Self {
        self.convert = program.into();
        self
    }

    /// Set the program used for measuring images
    pub fn with_identify(mut self, program: impl Into<String>) -> Self {
        self.identify = program.into();
        self
    }

    /// Set where scratch files are kept
    pub fn with_scratch_parent(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_parent = Some(dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MagickConfig::default();
        assert_eq!(config.convert, "convert");
        assert_eq!(config.identify, "identify");
        assert_eq!(config.scratch_parent, None);
    }

    #[test]
    fn test_builder_pattern() {
        let config = MagickConfig::new()
            .with_convert("magick")
            .with_identify("magick-identify")
            .with_scratch_parent("/var/tmp");

        assert_eq!(config.convert, "magick");
        assert_eq!(config.identify, "magick-identify");
        assert_eq!(config.scratch_parent, Some(PathBuf::from("/var/tmp")));
    }
}
