//! Widget Settings
//!
//! Immutable configuration snapshot for one level widget instance. Settings
//! are constructed once at widget start and never mutated; a settings change
//! on the dashboard side creates a new widget instance.

use crate::color::ColorSettings;
use crate::shape::TankShape;
use crate::units::CapacityUnit;
use serde::{Deserialize, Serialize};

/// Where a resolved value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    /// Use the statically configured constant
    #[default]
    Static,
    /// Fetch from a server-side entity attribute
    Attribute,
}

/// Which numeric overlays render on top of the tank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// No numeric overlay at all
    None,
    /// Formatted percentage value only
    #[default]
    Percentage,
    /// Converted value together with the vessel volume
    Absolute,
}

/// Tooltip configuration block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipSettings {
    /// Whether the tooltip renders at all
    pub enabled: bool,
    /// Show the level row
    pub show_level: bool,
    /// Unit the level row is converted into
    pub units: CapacityUnit,
    /// Decimal precision of the level row
    pub decimals: u32,
    /// Show the last-update row
    pub show_date: bool,
    /// chrono format string for the last-update row
    pub date_format: String,
}

impl Default for TooltipSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            show_level: true,
            units: CapacityUnit::Percent,
            decimals: 0,
            show_date: true,
            date_format: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

/// The five color channel configurations consumed by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ColorChannels {
    /// Tank shell stroke/fill
    pub tank: ColorSettings,
    /// Liquid surface and fill body
    pub liquid: ColorSettings,
    /// Numeric readout text
    pub value: ColorSettings,
    /// Background overlay behind the numeric readout
    pub overlay: ColorSettings,
    /// Tooltip level row text
    pub tooltip_level: ColorSettings,
}

/// Complete configuration snapshot for one widget instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    /// Statically configured shape, also the fallback for attribute-driven
    /// shape selection
    pub shape: TankShape,
    /// Whether the shape comes from configuration or an attribute
    pub shape_source: ValueSource,
    /// Attribute name queried when `shape_source` is attribute-driven
    pub shape_attribute: String,

    /// Vessel capacity, expressed in `volume_units`
    pub volume: f64,
    /// Whether the capacity comes from configuration or an attribute
    pub volume_source: ValueSource,
    /// Attribute name queried when `volume_source` is attribute-driven
    pub volume_attribute: String,
    /// Unit the vessel capacity is expressed in
    pub volume_units: CapacityUnit,

    /// Unit of the incoming measurement stream
    pub datasource_units: CapacityUnit,

    /// Display unit of the numeric readout
    pub units: CapacityUnit,
    /// Whether the display unit comes from configuration or an attribute
    pub units_source: ValueSource,
    /// Attribute name queried when `units_source` is attribute-driven
    pub units_attribute: String,

    /// Decimal precision of the numeric readout
    pub decimals: u32,
    /// Which numeric overlays render
    pub layout: LayoutMode,
    /// Tooltip configuration
    pub tooltip: TooltipSettings,
    /// Color channel configurations
    pub colors: ColorChannels,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            shape: TankShape::VerticalCylinder,
            shape_source: ValueSource::Static,
            shape_attribute: "tankShape".to_string(),
            volume: 500.0,
            volume_source: ValueSource::Static,
            volume_attribute: "tankVolume".to_string(),
            volume_units: CapacityUnit::Liters,
            datasource_units: CapacityUnit::Percent,
            units: CapacityUnit::Percent,
            units_source: ValueSource::Static,
            units_attribute: "tankUnits".to_string(),
            decimals: 0,
            layout: LayoutMode::Percentage,
            tooltip: TooltipSettings::default(),
            colors: ColorChannels::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_settings_json_round_trip() {
        let settings = WidgetSettings {
            shape: TankShape::HorizontalCylinder,
            volume: 200.0,
            datasource_units: CapacityUnit::Liters,
            layout: LayoutMode::Absolute,
            ..Default::default()
        };

        let json = serde_json::to_string(&settings).unwrap();
        let back: WidgetSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: WidgetSettings =
            serde_json::from_str(r#"{"shape": "rectangle", "volume": 42.0}"#).unwrap();
        assert_eq!(settings.shape, TankShape::Rectangle);
        assert_eq!(settings.volume, 42.0);
        assert_eq!(settings.layout, LayoutMode::Percentage);
        assert_eq!(settings.units, CapacityUnit::Percent);
        assert!(settings.tooltip.enabled);
    }
}
