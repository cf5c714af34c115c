//! Conversion of densities and lengths into canonical units
//!
//! Densities are expressed in pixels per meter, lengths in meters. A density
//! may also be given indirectly as the physical width of the panel, in which
//! case the panel's pixel width is needed to derive it.

use thiserror::Error;

/// Meters per inch
const INCH: f64 = 0.0254;

/// Errors raised while converting units
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("invalid unit '{unit}'")]
    InvalidUnit { unit: String },
}

/// Unit suffixes understood in screen specifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// Pixels per meter
    Ppm,
    /// Dots (pixels) per inch
    Dpi,
    Inch,
    Meter,
    Centimeter,
    Millimeter,
}

impl Unit {
    /// Look up a unit by its suffix
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "ppm" => Some(Unit::Ppm),
            "dpi" => Some(Unit::Dpi),
            "in" => Some(Unit::Inch),
            "m" => Some(Unit::Meter),
            "cm" => Some(Unit::Centimeter),
            "mm" => Some(Unit::Millimeter),
            _ => None,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Unit::Ppm => "ppm",
            Unit::Dpi => "dpi",
            Unit::Inch => "in",
            Unit::Meter => "m",
            Unit::Centimeter => "cm",
            Unit::Millimeter => "mm",
        }
    }

    /// Meters per one of this unit, for units that measure length
    fn meters(&self) -> Option<f64> {
        match self {
            Unit::Inch => Some(INCH),
            Unit::Meter => Some(1.0),
            Unit::Centimeter => Some(0.01),
            Unit::Millimeter => Some(0.001),
            Unit::Ppm | Unit::Dpi => None,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}

fn lookup(unit: &str) -> Result<Unit, UnitError> {
    Unit::from_suffix(unit).ok_or_else(|| UnitError::InvalidUnit {
        unit: unit.to_string(),
    })
}

/// Convert a density to pixels per meter.
///
/// Without a unit (or with `ppm`) the value already is pixels per meter.
/// `dpi` is pixels per inch. A length unit (`in`, `m`, `cm`, `mm`) means the
/// value is the physical width of the panel, and the density is derived from
/// `reference_width_px` spread over that width.
///
/// ```rust
/// use wallsplit::units::parse_density;
///
/// let ppm = parse_density(1920, 92.0, Some("dpi")).unwrap();
/// assert!((ppm - 3622.047244094488).abs() < 1e-9);
/// ```
pub fn parse_density(
    reference_width_px: u32,
    value: f64,
    unit: Option<&str>,
) -> Result<f64, UnitError> {
    let Some(unit) = unit else {
        return Ok(value);
    };

    let unit = lookup(unit)?;
    match unit {
        Unit::Ppm => Ok(value),
        Unit::Dpi => Ok(value / INCH),
        _ => {
            let width_m = parse_length(Some(value), Some(unit.suffix()))?.unwrap_or(value);
            Ok(f64::from(reference_width_px) / width_m)
        }
    }
}

/// Convert a length to meters.
///
/// Returns `Ok(None)` when no value is given. Density units are rejected.
pub fn parse_length(value: Option<f64>, unit: Option<&str>) -> Result<Option<f64>, UnitError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let Some(unit) = unit else {
        return Ok(Some(value));
    };

    match lookup(unit)?.meters() {
        Some(meters) => Ok(Some(value * meters)),
        None => Err(UnitError::InvalidUnit {
            unit: unit.to_string(),
        }),
    }
}
