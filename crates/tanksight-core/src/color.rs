//! Color channels
//!
//! The widget drives five independent color channels (tank shell, liquid,
//! value text, background overlay, tooltip level text). Each channel is a
//! [`ColorProcessor`]: it is fed the current measurement-domain value and
//! exposes the color computed from it.

use serde::{Deserialize, Serialize};

/// RGBA color used across all visual channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    /// Fully opaque color from RGB components.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue, alpha: 255 }
    }

    /// Parse a CSS hex color (`#rrggbb` or `#rrggbbaa`).
    pub fn from_css_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Self { red: r, green: g, blue: b, alpha: a })
            }
            _ => None,
        }
    }

    /// Convert to CSS hex, omitting the alpha byte when fully opaque.
    pub fn to_css_hex(&self) -> String {
        if self.alpha == 255 {
            format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
        } else {
            format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                self.red, self.green, self.blue, self.alpha
            )
        }
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self { alpha, ..self }
    }
}

/// A value range mapped to a color. Open bounds match everything on that side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRange {
    /// Inclusive lower bound; `None` is unbounded
    pub from: Option<f64>,
    /// Exclusive upper bound; `None` is unbounded
    pub to: Option<f64>,
    /// Color applied while the value is inside the range
    pub color: Color,
}

impl ColorRange {
    fn contains(&self, value: f64) -> bool {
        self.from.map_or(true, |from| value >= from) && self.to.map_or(true, |to| value < to)
    }
}

/// Configuration for one color channel: a base color plus optional
/// value-driven range overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    /// Color used when no range matches or the value is not available
    pub color: Color,
    /// Range overrides, checked in order
    pub ranges: Vec<ColorRange>,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            color: Color::rgb(0x40, 0x9c, 0xff),
            ranges: Vec::new(),
        }
    }
}

/// One color channel: recomputes its color from each new value.
///
/// `update` takes `None` when the current reading is "not available".
pub trait ColorProcessor {
    /// Recompute the channel color from the latest value.
    fn update(&mut self, value: Option<f64>);
    /// Currently computed color.
    fn color(&self) -> Color;
}

/// Default [`ColorProcessor`]: constant base color with value-range
/// overrides. With no ranges configured it behaves as a constant channel.
#[derive(Debug, Clone)]
pub struct RangeColorProcessor {
    settings: ColorSettings,
    current: Color,
}

impl RangeColorProcessor {
    /// Build a processor from channel settings; starts at the base color.
    pub fn new(settings: ColorSettings) -> Self {
        let current = settings.color;
        Self { settings, current }
    }
}

impl ColorProcessor for RangeColorProcessor {
    fn update(&mut self, value: Option<f64>) {
        self.current = match value {
            Some(v) => self
                .settings
                .ranges
                .iter()
                .find(|range| range.contains(v))
                .map(|range| range.color)
                .unwrap_or(self.settings.color),
            None => self.settings.color,
        };
    }

    fn color(&self) -> Color {
        self.current
    }
}
