//! Profile files describing a screen setup
//!
//! A profile stores the screen groups and fit settings of a desk so they do
//! not have to be repeated on every invocation:
//!
//! ```toml
//! [metadata]
//! name = "office"
//!
//! [fit]
//! xcenter = 0.5
//! scale = 1.0
//! crop = "3840x2160+0+0"
//!
//! [[group]]
//! screens = ["2560x1440/59.8cm", "1680x1050/46.4cm+2cm"]
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::error::ParseError;
use crate::layout::LayoutConfig;
use crate::parser::{parse_region, parse_screen, Region, ScreenSpec};

/// Errors that can occur when loading or parsing profiles
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Failed to read profile file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse profile TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("group {group}: invalid screen '{spec}'")]
    Screen {
        group: usize,
        spec: String,
        errors: Vec<ParseError>,
    },
    #[error("invalid crop '{spec}'")]
    Crop {
        spec: String,
        errors: Vec<ParseError>,
    },
}

impl ProfileError {
    /// The offending spec string and its parse errors, if any
    pub fn spec_errors(&self) -> Option<(&str, &[ParseError])> {
        match self {
            Self::Screen { spec, errors, .. } | Self::Crop { spec, errors } => {
                Some((spec.as_str(), errors.as_slice()))
            }
            _ => None,
        }
    }
}

/// A parsed profile
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    /// Optional name for the profile
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    pub xcenter: Option<f64>,
    pub ycenter: Option<f64>,
    pub scale: Option<f64>,
    /// Source image region to use
    pub crop: Option<Region>,
    /// Screen groups; empty groups are dropped
    pub groups: Vec<Vec<ScreenSpec>>,
}

/// TOML structure for deserializing profiles
#[derive(Deserialize)]
struct TomlProfile {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    fit: TomlFit,
    #[serde(default)]
    group: Vec<TomlGroup>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize, Default)]
struct TomlFit {
    xcenter: Option<f64>,
    ycenter: Option<f64>,
    scale: Option<f64>,
    crop: Option<String>,
}

#[derive(Deserialize)]
struct TomlGroup {
    screens: Vec<String>,
}

impl Profile {
    /// Load profile from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load profile from TOML string
    pub fn from_str(content: &str) -> Result<Self, ProfileError> {
        let parsed: TomlProfile = toml::from_str(content)?;

        let crop = match parsed.fit.crop {
            Some(spec) => match parse_region(&spec) {
                Ok(region) => Some(region),
                Err(errors) => return Err(ProfileError::Crop { spec, errors }),
            },
            None => None,
        };

        let mut groups = Vec::new();
        for (i, group) in parsed.group.into_iter().enumerate() {
            let mut screens = Vec::with_capacity(group.screens.len());
            for spec in group.screens {
                match parse_screen(&spec) {
                    Ok(screen) => screens.push(screen),
                    Err(errors) => {
                        return Err(ProfileError::Screen {
                            group: i + 1,
                            spec,
                            errors,
                        })
                    }
                }
            }
            if !screens.is_empty() {
                groups.push(screens);
            }
        }

        Ok(Profile {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            xcenter: parsed.fit.xcenter,
            ycenter: parsed.fit.ycenter,
            scale: parsed.fit.scale,
            crop,
            groups,
        })
    }

    /// Apply the fit settings this profile sets on top of `config`
    pub fn apply(&self, mut config: LayoutConfig) -> LayoutConfig {
        if let Some(x) = self.xcenter {
            config.gravity.x = x;
        }
        if let Some(y) = self.ycenter {
            config.gravity.y = y;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Side;
    use std::io::Write;

    #[test]
    fn test_parse_full_profile() {
        let toml_str = r#"
[metadata]
name = "office"
description = "Two monitors and a laptop"

[fit]
xcenter = 0.25
ycenter = 1.0
scale = 1.5
crop = "3840x2000-0+80"

[[group]]
screens = ["2560x1440/59.8cm", "1680x1050/46.4cm+2cm"]

[[group]]
screens = ["1920x1080/96dpi"]
"#;
        let profile = Profile::from_str(toml_str).expect("Should parse");
        assert_eq!(profile.name, Some("office".to_string()));
        assert_eq!(profile.description, Some("Two monitors and a laptop".to_string()));
        assert_eq!(profile.xcenter, Some(0.25));
        assert_eq!(profile.ycenter, Some(1.0));
        assert_eq!(profile.scale, Some(1.5));

        let crop = profile.crop.expect("Should have crop");
        assert_eq!((crop.width_px, crop.height_px), (3840, 2000));
        assert_eq!(crop.x_side, Side::End);
        assert_eq!(crop.y_px, 80);

        assert_eq!(profile.groups.len(), 2);
        assert_eq!(profile.groups[0].len(), 2);
        assert!((profile.groups[0][1].gap_m - 0.02).abs() < 1e-12);
        assert_eq!(profile.groups[1][0].width_px, 1920);
    }

    #[test]
    fn test_parse_empty_profile() {
        let profile = Profile::from_str("").expect("Should parse");
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn test_empty_groups_dropped() {
        let toml_str = r#"
[[group]]
screens = []

[[group]]
screens = ["800x600/100"]
"#;
        let profile = Profile::from_str(toml_str).expect("Should parse");
        assert_eq!(profile.groups.len(), 1);
    }

    #[test]
    fn test_invalid_screen_reports_group() {
        let toml_str = r#"
[[group]]
screens = ["800x600/100"]

[[group]]
screens = ["800x600"]
"#;
        match Profile::from_str(toml_str) {
            Err(ProfileError::Screen { group, spec, errors }) => {
                assert_eq!(group, 2);
                assert_eq!(spec, "800x600");
                assert!(!errors.is_empty());
            }
            other => panic!("Expected screen error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_crop() {
        let err = Profile::from_str("[fit]\ncrop = \"big\"\n").unwrap_err();
        let (spec, errors) = err.spec_errors().expect("Should carry spec errors");
        assert_eq!(spec, "big");
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = Profile::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(ProfileError::ParseError(_))));
    }

    #[test]
    fn test_apply_overrides_only_set_values() {
        let profile = Profile {
            ycenter: Some(0.0),
            scale: Some(2.0),
            ..Profile::default()
        };
        let config = profile.apply(LayoutConfig::new().with_gravity(0.3, 0.7));
        assert_eq!(config.gravity.x, 0.3);
        assert_eq!(config.gravity.y, 0.0);
        assert_eq!(config.scale, 2.0);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[group]]\nscreens = [\"1920x1080/92dpi\"]").unwrap();
        let profile = Profile::from_file(file.path()).expect("Should load");
        assert_eq!(profile.groups[0][0].height_px, 1080);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Profile::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ProfileError::IoError(_))));
    }
}
