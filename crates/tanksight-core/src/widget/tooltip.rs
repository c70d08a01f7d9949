//! Tooltip Content Generator
//!
//! Builds the tooltip's label/value rows from the current sample and
//! settings. Layout is left to the popup: rows render as a label/value
//! markup block, and the popup collaborator only ever receives the content
//! string, never positioning.

use crate::color::Color;
use crate::format::{format_value, DateFormatter};
use crate::i18n::{Translator, KEY_LAST_UPDATE, KEY_LEVEL, KEY_NOT_AVAILABLE};
use crate::measurement::{LevelSample, SampleValue};
use crate::settings::TooltipSettings;
use crate::units::{convert, CapacityUnit, ConversionDirection};

/// One label/value row of the tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipRow {
    /// Left-hand label
    pub label: String,
    /// Right-hand value
    pub value: String,
    /// Optional value text color
    pub color: Option<Color>,
}

/// The structured tooltip block; either, both, or neither row may be
/// present depending on configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TooltipContent {
    /// Rows in display order
    pub rows: Vec<TooltipRow>,
}

impl TooltipContent {
    /// Render rows to the markup string handed to the popup collaborator.
    pub fn render(&self) -> String {
        let mut markup = String::from(r#"<div class="tank-tooltip">"#);
        for row in &self.rows {
            let value_span = match row.color {
                Some(color) => format!(
                    r#"<span class="value" style="color: {}">{}</span>"#,
                    color.to_css_hex(),
                    row.value
                ),
                None => format!(r#"<span class="value">{}</span>"#, row.value),
            };
            markup.push_str(&format!(
                r#"<div class="row"><span class="label">{}</span>{}</div>"#,
                row.label, value_span
            ));
        }
        markup.push_str("</div>");
        markup
    }
}

/// Popup collaborator capability: content in, lifecycle out.
pub trait TooltipHandle {
    /// Replace the popup's content markup.
    fn set_content(&mut self, markup: &str);
    /// Tear the popup down.
    fn destroy(&mut self);
}

/// Builds tooltip content from samples, carrying the conversion context the
/// level row shares with the numeric readout.
#[derive(Debug, Clone)]
pub struct TooltipGenerator {
    /// Unit of the incoming measurement stream
    pub datasource_units: CapacityUnit,
    /// Vessel capacity in normalized liters
    pub capacity_liters: f64,
    /// Tooltip configuration block
    pub settings: TooltipSettings,
}

impl TooltipGenerator {
    /// Build the content block for a sample. With no sample at all the
    /// value is "not available" and the timestamp is epoch zero.
    /// `level_color` is the current color of the tooltip level channel.
    pub fn build(
        &self,
        sample: Option<&LevelSample>,
        level_color: Option<Color>,
        translator: &dyn Translator,
        dates: &mut dyn DateFormatter,
    ) -> TooltipContent {
        let mut content = TooltipContent::default();

        if self.settings.show_level {
            let value = match sample.map(|s| s.value) {
                Some(SampleValue::Numeric(raw)) => {
                    let level = self.level_in_tooltip_units(raw);
                    format!(
                        "{} {}",
                        format_value(level, self.settings.decimals),
                        self.settings.units.label()
                    )
                }
                // Invalid, Absent, or no sample yet: no unit conversion
                _ => translator.label(KEY_NOT_AVAILABLE),
            };
            content.rows.push(TooltipRow {
                label: translator.label(KEY_LEVEL),
                value,
                color: level_color,
            });
        }

        if self.settings.show_date {
            dates.update(sample.map(|s| s.timestamp_ms).unwrap_or(0));
            content.rows.push(TooltipRow {
                label: translator.label(KEY_LAST_UPDATE),
                value: dates.formatted().to_string(),
                color: None,
            });
        }

        content
    }

    /// Raw reading → percentage → normalized volume → tooltip unit, the
    /// same chain the numeric readout uses.
    fn level_in_tooltip_units(&self, raw: f64) -> f64 {
        let percentage = if self.datasource_units == CapacityUnit::Percent {
            raw
        } else {
            let reading = convert(raw, self.datasource_units, ConversionDirection::ToNormalized);
            reading / self.capacity_liters * 100.0
        };

        if self.settings.units == CapacityUnit::Percent {
            percentage
        } else {
            let normalized = percentage / 100.0 * self.capacity_liters;
            convert(normalized, self.settings.units, ConversionDirection::FromNormalized)
        }
    }
}
