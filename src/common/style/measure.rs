//! Measures: a magnitude paired with a unit of measure.
//!
//! Style properties keep the unit the document used. No conversion between
//! units happens here; sizing in physical units is left to the renderer.

use crate::common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Units found in office document style properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    /// Millimeter
    Millimeter,
    /// Centimeter
    Centimeter,
    /// Inch
    Inch,
    /// Point (1/72 inch)
    Point,
    /// Pica (1/6 inch)
    Pica,
    /// Pixel
    Pixel,
    /// Relative to the font size
    Em,
    /// Percentage of the containing value
    Percent,
    /// Unitless magnitude (line height factors, rotation, ...)
    None,
}

impl LengthUnit {
    /// Get the unit abbreviation
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Inch => "in",
            Self::Point => "pt",
            Self::Pica => "pc",
            Self::Pixel => "px",
            Self::Em => "em",
            Self::Percent => "%",
            Self::None => "",
        }
    }

    fn from_str_internal(s: &str) -> Option<Self> {
        match s {
            "mm" => Some(Self::Millimeter),
            "cm" => Some(Self::Centimeter),
            "in" | "inch" => Some(Self::Inch),
            "pt" => Some(Self::Point),
            "pc" => Some(Self::Pica),
            "px" => Some(Self::Pixel),
            "em" => Some(Self::Em),
            "%" => Some(Self::Percent),
            "" => Some(Self::None),
            _ => None,
        }
    }
}

impl FromStr for LengthUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_internal(s)
            .ok_or_else(|| Error::InvalidArgument(format!("Unknown length unit '{}'", s)))
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A magnitude with a unit of measure.
///
/// # Examples
///
/// ```
/// use docnav::common::{LengthUnit, Measure};
///
/// let size: Measure = "12pt".parse().unwrap();
/// assert_eq!(size.magnitude(), 12.0);
/// assert_eq!(size.unit(), LengthUnit::Point);
/// assert_eq!(size.to_string(), "12pt");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    magnitude: f64,
    unit: LengthUnit,
}

impl Measure {
    #[inline]
    pub const fn new(magnitude: f64, unit: LengthUnit) -> Self {
        Self { magnitude, unit }
    }

    /// Shorthand for a measure in points.
    #[inline]
    pub const fn pt(magnitude: f64) -> Self {
        Self::new(magnitude, LengthUnit::Point)
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    #[inline]
    pub fn unit(&self) -> LengthUnit {
        self.unit
    }
}

impl FromStr for Measure {
    type Err = Error;

    /// Parse a measure such as `"2.5cm"`, `"-0.1in"`, `"150%"` or `"1.2"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let split = s
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (c == '-' && i == 0) || (c == '+' && i == 0)))
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        let (number, unit) = s.split_at(split);

        if number.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "No numeric value found in '{}'",
                s
            )));
        }

        let magnitude: f64 = number.parse().map_err(|_| {
            Error::InvalidArgument(format!("Failed to parse numeric value from '{}'", s))
        })?;

        Ok(Self::new(magnitude, unit.trim().parse()?))
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit.as_str())
    }
}
