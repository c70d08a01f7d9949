//! Capacity Unit Conversion
//!
//! Converts vessel capacity values between volume units and the engine's
//! normalized internal unit (liters):
//! - Metric: mL, L, hL, m³
//! - Gallons: US & Imperial
//! - Percent: pseudo-unit, passes through unchanged
//!
//! Conversion never rounds or clamps; display precision is applied by the
//! caller at render time.

use crate::error::WidgetError;
use serde::{Deserialize, Serialize};

/// A physical volume unit, or the distinguished percent pseudo-unit.
///
/// Percent never participates in the liters-per-unit table; it is handled
/// as a structural special case in [`convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CapacityUnit {
    /// Percentage of vessel capacity (pseudo-unit)
    #[default]
    #[serde(rename = "%")]
    Percent,
    /// Milliliters
    #[serde(rename = "mL")]
    Milliliters,
    /// Liters
    #[serde(rename = "L")]
    Liters,
    /// Hectoliters
    #[serde(rename = "hL")]
    Hectoliters,
    /// Cubic meters
    #[serde(rename = "m3")]
    CubicMeters,
    /// US gallons
    #[serde(rename = "gal")]
    GallonsUs,
    /// Imperial gallons
    #[serde(rename = "gal (imp)")]
    GallonsImperial,
}

/// Direction of a conversion through the normalized volume unit (liters).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionDirection {
    /// Physical unit into normalized liters
    ToNormalized,
    /// Normalized liters into the physical unit
    FromNormalized,
}

impl CapacityUnit {
    /// Parse a unit identifier as it appears in widget configuration or
    /// fetched attributes.
    ///
    /// An unrecognized identifier is a configuration error and is surfaced
    /// as [`WidgetError::InvalidUnit`] rather than silently defaulted —
    /// guessing a conversion factor would corrupt displayed quantities.
    pub fn parse(ident: &str) -> Result<Self, WidgetError> {
        match ident.trim() {
            "%" | "percent" => Ok(Self::Percent),
            "mL" | "ml" => Ok(Self::Milliliters),
            "L" | "l" | "liters" | "litres" => Ok(Self::Liters),
            "hL" | "hl" => Ok(Self::Hectoliters),
            "m3" | "m\u{00b3}" => Ok(Self::CubicMeters),
            "gal" | "gal (US)" => Ok(Self::GallonsUs),
            "gal (imp)" | "gal (UK)" => Ok(Self::GallonsImperial),
            other => Err(WidgetError::InvalidUnit(other.to_string())),
        }
    }

    /// Display label for readouts and tooltip suffixes.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Percent => "%",
            Self::Milliliters => "mL",
            Self::Liters => "L",
            Self::Hectoliters => "hL",
            Self::CubicMeters => "m\u{00b3}",
            Self::GallonsUs => "gal",
            Self::GallonsImperial => "gal (imp)",
        }
    }
}

/// Convert `value` between a capacity unit and normalized liters.
///
/// Percent is the identity regardless of direction. All other units use a
/// fixed liters-per-unit factor: multiply going to normalized, divide
/// coming back out.
pub fn convert(value: f64, unit: CapacityUnit, direction: ConversionDirection) -> f64 {
    let liters_per_unit = match unit {
        CapacityUnit::Percent => return value,
        CapacityUnit::Milliliters => 0.001,
        CapacityUnit::Liters => 1.0,
        CapacityUnit::Hectoliters => 100.0,
        CapacityUnit::CubicMeters => 1000.0,
        CapacityUnit::GallonsUs => 3.785411784,
        CapacityUnit::GallonsImperial => 4.54609,
    };
    match direction {
        ConversionDirection::ToNormalized => value * liters_per_unit,
        ConversionDirection::FromNormalized => value / liters_per_unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_is_identity_both_directions() {
        assert_eq!(convert(42.5, CapacityUnit::Percent, ConversionDirection::ToNormalized), 42.5);
        assert_eq!(
            convert(42.5, CapacityUnit::Percent, ConversionDirection::FromNormalized),
            42.5
        );
    }

    #[test]
    fn test_gallons_us_to_liters() {
        let liters = convert(1.0, CapacityUnit::GallonsUs, ConversionDirection::ToNormalized);
        assert!((liters - 3.78541).abs() < 0.01);
    }

    #[test]
    fn test_gallons_imperial_to_liters() {
        let liters = convert(1.0, CapacityUnit::GallonsImperial, ConversionDirection::ToNormalized);
        assert!((liters - 4.54609).abs() < 0.01);
    }

    #[test]
    fn test_cubic_meters_round_trip() {
        let original = 2.73;
        let normalized = convert(original, CapacityUnit::CubicMeters, ConversionDirection::ToNormalized);
        assert!((normalized - 2730.0).abs() < 1e-9);
        let back = convert(normalized, CapacityUnit::CubicMeters, ConversionDirection::FromNormalized);
        assert!((back - original).abs() < 1e-9);
    }

    #[test]
    fn test_conversion_does_not_clamp_or_round() {
        let ml = convert(0.123456, CapacityUnit::Milliliters, ConversionDirection::ToNormalized);
        assert!((ml - 0.000123456).abs() < 1e-12);
        let negative = convert(-5.0, CapacityUnit::Liters, ConversionDirection::ToNormalized);
        assert_eq!(negative, -5.0);
    }

    #[test]
    fn test_parse_known_identifiers() {
        assert_eq!(CapacityUnit::parse("%").unwrap(), CapacityUnit::Percent);
        assert_eq!(CapacityUnit::parse("L").unwrap(), CapacityUnit::Liters);
        assert_eq!(CapacityUnit::parse("gal").unwrap(), CapacityUnit::GallonsUs);
        assert_eq!(CapacityUnit::parse(" gal (imp) ").unwrap(), CapacityUnit::GallonsImperial);
    }

    #[test]
    fn test_parse_unknown_identifier_is_an_error() {
        let err = CapacityUnit::parse("furlongs").unwrap_err();
        assert!(matches!(err, WidgetError::InvalidUnit(ref s) if s == "furlongs"));
    }
}
