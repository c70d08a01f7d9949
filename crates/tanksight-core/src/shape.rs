//! Tank Shape Geometry
//!
//! Static mapping from vessel shape to its SVG template reference and the
//! coordinate limits of the liquid surface, plus the percentage-to-coordinate
//! calculator.
//!
//! Limits are expressed in the template's own coordinate space. SVG y
//! coordinates grow downward, so for vertical vessels the "full" coordinate
//! is numerically smaller than the "empty" one; nothing in this module may
//! assume `min < max`.

use crate::error::WidgetError;
use serde::{Deserialize, Serialize};

/// Vessel geometries supported by the level widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TankShape {
    #[serde(rename = "vOval")]
    VerticalOval,
    #[default]
    #[serde(rename = "vCylinder")]
    VerticalCylinder,
    #[serde(rename = "vCapsule")]
    VerticalCapsule,
    #[serde(rename = "rectangle")]
    Rectangle,
    #[serde(rename = "hOval")]
    HorizontalOval,
    #[serde(rename = "hEllipse")]
    HorizontalEllipse,
    #[serde(rename = "hDishedEnds")]
    HorizontalDishedEnds,
    #[serde(rename = "hCylinder")]
    HorizontalCylinder,
    #[serde(rename = "hCapsule")]
    HorizontalCapsule,
}

/// Liquid-surface coordinates at 0% and 100% fill for one shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelLimits {
    /// Coordinate of the surface at 0% fill
    pub min: f64,
    /// Coordinate of the surface at 100% fill
    pub max: f64,
}

impl TankShape {
    /// Parse a shape identifier as it appears in configuration or in a
    /// fetched shape attribute.
    pub fn parse(ident: &str) -> Result<Self, WidgetError> {
        match ident.trim() {
            "vOval" => Ok(Self::VerticalOval),
            "vCylinder" => Ok(Self::VerticalCylinder),
            "vCapsule" => Ok(Self::VerticalCapsule),
            "rectangle" => Ok(Self::Rectangle),
            "hOval" => Ok(Self::HorizontalOval),
            "hEllipse" => Ok(Self::HorizontalEllipse),
            "hDishedEnds" => Ok(Self::HorizontalDishedEnds),
            "hCylinder" => Ok(Self::HorizontalCylinder),
            "hCapsule" => Ok(Self::HorizontalCapsule),
            other => Err(WidgetError::UnknownShape(other.to_string())),
        }
    }

    /// Identifier string used in configuration and attributes.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::VerticalOval => "vOval",
            Self::VerticalCylinder => "vCylinder",
            Self::VerticalCapsule => "vCapsule",
            Self::Rectangle => "rectangle",
            Self::HorizontalOval => "hOval",
            Self::HorizontalEllipse => "hEllipse",
            Self::HorizontalDishedEnds => "hDishedEnds",
            Self::HorizontalCylinder => "hCylinder",
            Self::HorizontalCapsule => "hCapsule",
        }
    }

    /// SVG template reference, relative to the template loader's root.
    pub fn template(&self) -> &'static str {
        match self {
            Self::VerticalOval => "tank/vertical_oval.svg",
            Self::VerticalCylinder => "tank/vertical_cylinder.svg",
            Self::VerticalCapsule => "tank/vertical_capsule.svg",
            Self::Rectangle => "tank/rectangle.svg",
            Self::HorizontalOval => "tank/horizontal_oval.svg",
            Self::HorizontalEllipse => "tank/horizontal_ellipse.svg",
            Self::HorizontalDishedEnds => "tank/horizontal_dished_ends.svg",
            Self::HorizontalCylinder => "tank/horizontal_cylinder.svg",
            Self::HorizontalCapsule => "tank/horizontal_capsule.svg",
        }
    }

    /// Surface coordinates at 0% and 100% fill in template space.
    ///
    /// All shapes place 100% above 0% on screen, so `max < min` throughout.
    pub fn limits(&self) -> LevelLimits {
        match self {
            Self::VerticalOval => LevelLimits { min: 160.0, max: 20.0 },
            Self::VerticalCylinder => LevelLimits { min: 180.0, max: 20.0 },
            Self::VerticalCapsule => LevelLimits { min: 190.0, max: 30.0 },
            Self::Rectangle => LevelLimits { min: 170.0, max: 10.0 },
            Self::HorizontalOval => LevelLimits { min: 130.0, max: 40.0 },
            Self::HorizontalEllipse => LevelLimits { min: 125.0, max: 45.0 },
            Self::HorizontalDishedEnds => LevelLimits { min: 128.0, max: 42.0 },
            Self::HorizontalCylinder => LevelLimits { min: 135.0, max: 35.0 },
            Self::HorizontalCapsule => LevelLimits { min: 140.0, max: 30.0 },
        }
    }
}

/// Map a fill percentage to a surface coordinate.
///
/// Clamps to the exact limit coordinates outside [0, 100]; in between the
/// interpolation is linear in coordinate value, which keeps the formula
/// valid when `max < min` (downward-growing axes).
pub fn level_position(percentage: f64, limits: LevelLimits) -> f64 {
    if percentage >= 100.0 {
        limits.max
    } else if percentage <= 0.0 {
        limits.min
    } else {
        limits.min + (percentage / 100.0) * (limits.max - limits.min)
    }
}
