//! Visual Update Orchestrator
//!
//! Turns each accepted measurement into an ordered list of declarative
//! visual mutations. The orchestrator owns the widget's render state and
//! its five color channels; it never touches a rendering surface itself —
//! the hosting UI applies the emitted [`VisualOp`]s to the SVG/DOM layers
//! it controls, which keeps the whole pipeline testable headless.

use crate::color::{Color, ColorProcessor, RangeColorProcessor};
use crate::format::{format_value, ChronoDateFormatter, DateFormatter};
use crate::i18n::{StaticTranslator, Translator, KEY_NOT_AVAILABLE};
use crate::measurement::{LevelSample, SampleValue};
use crate::resolver::ResolvedView;
use crate::settings::{LayoutMode, WidgetSettings};
use crate::shape::{level_position, LevelLimits};
use crate::units::{convert, CapacityUnit, ConversionDirection};
use crate::widget::animation::LEVEL_ANIMATION_MS;
use crate::widget::tooltip::{TooltipGenerator, TooltipHandle};
use tracing::warn;

/// Which rendered layer a mutation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// Tank shell outline elements
    ShapeStroke,
    /// Tank shell fill elements
    ShapeFill,
    /// Liquid surface elements
    LiquidSurface,
    /// Liquid fill body
    LiquidFill,
    /// Numeric readout text
    ValueText,
    /// Vessel volume sub-readout text (absolute layout only)
    VolumeText,
    /// Background overlay behind the readout
    Overlay,
    /// Tooltip popup content
    Tooltip,
}

/// One declarative mutation of a rendered layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Set the stroke color
    Stroke(Color),
    /// Set the fill color
    Fill(Color),
    /// Move the liquid surface to a coordinate
    MoveTo {
        /// Target coordinate in template space
        coordinate: f64,
        /// Animate the move instead of jumping
        animated: bool,
        /// Transition duration when animated
        duration_ms: u64,
    },
    /// Replace text content
    Text(String),
    /// Replace markup content
    Html(String),
}

/// A single `{role, mutation}` entry of a frame update.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualOp {
    /// Targeted layer
    pub role: ElementRole,
    /// Mutation to apply
    pub mutation: Mutation,
}

/// The ordered mutations for one tick. Application order matters: layers
/// are kept mutually consistent by applying ops front to back.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameUpdate {
    /// Mutations in application order
    pub ops: Vec<VisualOp>,
}

impl FrameUpdate {
    /// Mutations targeting one layer, in order.
    pub fn ops_for(&self, role: ElementRole) -> impl Iterator<Item = &Mutation> {
        self.ops.iter().filter(move |op| op.role == role).map(|op| &op.mutation)
    }
}

/// Derived per-instance render state, recomputed on every accepted tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderState {
    /// Current fill percentage used for geometry
    pub percentage: f64,
    /// Current liquid surface coordinate
    pub coordinate: f64,
    /// Current readout text
    pub value_text: String,
    /// Current volume sub-readout text, absolute layout only
    pub volume_text: Option<String>,
    /// Current tooltip markup, when the tooltip is enabled
    pub tooltip_markup: Option<String>,
}

/// Drives the ordered visual mutation sequence for one widget instance.
pub struct Orchestrator {
    settings: WidgetSettings,
    limits: LevelLimits,
    capacity_liters: f64,
    units: CapacityUnit,
    tank_color: Box<dyn ColorProcessor + Send>,
    liquid_color: Box<dyn ColorProcessor + Send>,
    value_color: Box<dyn ColorProcessor + Send>,
    overlay_color: Box<dyn ColorProcessor + Send>,
    tooltip_color: Box<dyn ColorProcessor + Send>,
    date_formatter: Box<dyn DateFormatter + Send>,
    translator: Box<dyn Translator + Send>,
    tooltip_gen: TooltipGenerator,
    tooltip_handle: Option<Box<dyn TooltipHandle + Send>>,
    state: RenderState,
}

impl Orchestrator {
    /// Build an orchestrator for a resolved widget, wiring the default
    /// color/date/translation collaborators from settings.
    pub fn new(settings: WidgetSettings, view: ResolvedView) -> Self {
        let capacity_liters = convert(
            view.volume,
            settings.volume_units,
            ConversionDirection::ToNormalized,
        );
        let tooltip_gen = TooltipGenerator {
            datasource_units: settings.datasource_units,
            capacity_liters,
            settings: settings.tooltip.clone(),
        };
        let date_formatter = ChronoDateFormatter::new(settings.tooltip.date_format.clone());
        let colors = settings.colors.clone();

        Self {
            limits: view.shape.limits(),
            capacity_liters,
            units: view.units,
            tank_color: Box::new(RangeColorProcessor::new(colors.tank)),
            liquid_color: Box::new(RangeColorProcessor::new(colors.liquid)),
            value_color: Box::new(RangeColorProcessor::new(colors.value)),
            overlay_color: Box::new(RangeColorProcessor::new(colors.overlay)),
            tooltip_color: Box::new(RangeColorProcessor::new(colors.tooltip_level)),
            date_formatter: Box::new(date_formatter),
            translator: Box::new(StaticTranslator::new()),
            tooltip_gen,
            tooltip_handle: None,
            settings,
            state: RenderState::default(),
        }
    }

    /// Replace the translation collaborator.
    pub fn with_translator(mut self, translator: Box<dyn Translator + Send>) -> Self {
        self.translator = translator;
        self
    }

    /// Replace the date-format collaborator.
    pub fn with_date_formatter(mut self, formatter: Box<dyn DateFormatter + Send>) -> Self {
        self.date_formatter = formatter;
        self
    }

    /// Attach a live tooltip popup; subsequent ticks push content into it.
    pub fn set_tooltip_handle(&mut self, handle: Box<dyn TooltipHandle + Send>) {
        self.tooltip_handle = Some(handle);
    }

    /// Destroy and detach the tooltip popup, if any.
    pub fn destroy_tooltip(&mut self) {
        if let Some(mut handle) = self.tooltip_handle.take() {
            handle.destroy();
        }
    }

    /// Current render state.
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Process one measurement into a frame update.
    ///
    /// Returns `None` for a sample without a value slot: the tick is
    /// aborted with no partial mutation and the previous frame stays on
    /// screen. `ignore_animation` makes the liquid move immediate and is
    /// used only for the very first paint.
    pub fn tick(&mut self, sample: &LevelSample, ignore_animation: bool) -> Option<FrameUpdate> {
        // 1. Normalize the raw reading into percentage space. An invalid
        //    (non-numeric) reading keeps geometry at 0% but the readout
        //    shows "not available"; the two are tracked independently.
        let (percentage, reading) = match sample.value {
            SampleValue::Absent => {
                warn!(timestamp_ms = sample.timestamp_ms, "measurement without a value, tick skipped");
                return None;
            }
            SampleValue::Invalid => (0.0, None),
            SampleValue::Numeric(raw) => {
                let pct = if self.settings.datasource_units == CapacityUnit::Percent {
                    raw
                } else {
                    let volume = convert(
                        raw,
                        self.settings.datasource_units,
                        ConversionDirection::ToNormalized,
                    );
                    volume / self.capacity_liters * 100.0
                };
                (pct, Some(pct))
            }
        };

        // 2. Target coordinate of the liquid surface.
        let coordinate = level_position(percentage, self.limits);

        let mut update = FrameUpdate::default();

        // 3-4. Tank shell color, applied to every stroke and fill element.
        self.tank_color.update(reading);
        let tank = self.tank_color.color();
        update.ops.push(VisualOp { role: ElementRole::ShapeStroke, mutation: Mutation::Stroke(tank) });
        update.ops.push(VisualOp { role: ElementRole::ShapeFill, mutation: Mutation::Fill(tank) });

        // 5. Liquid color and surface movement.
        self.liquid_color.update(reading);
        let movement = Mutation::MoveTo {
            coordinate,
            animated: !ignore_animation,
            duration_ms: LEVEL_ANIMATION_MS,
        };
        update.ops.push(VisualOp { role: ElementRole::LiquidSurface, mutation: movement.clone() });
        update.ops.push(VisualOp { role: ElementRole::LiquidFill, mutation: movement });
        update.ops.push(VisualOp {
            role: ElementRole::LiquidSurface,
            mutation: Mutation::Fill(self.liquid_color.color()),
        });

        // 6. Numeric readout in the display unit.
        let (value_text, display_value) = match reading {
            Some(pct) => {
                let value = if self.units == CapacityUnit::Percent {
                    pct
                } else {
                    let normalized = pct / 100.0 * self.capacity_liters;
                    convert(normalized, self.units, ConversionDirection::FromNormalized)
                };
                (format_value(value, self.settings.decimals), Some(value))
            }
            None => (self.translator.label(KEY_NOT_AVAILABLE), None),
        };
        self.value_color.update(display_value);

        // 7. Background overlay.
        self.overlay_color.update(reading);
        if self.settings.layout != LayoutMode::None {
            update.ops.push(VisualOp {
                role: ElementRole::Overlay,
                mutation: Mutation::Fill(self.overlay_color.color()),
            });
        }

        // 8. Numeric overlays per layout mode.
        let mut volume_text = None;
        match self.settings.layout {
            LayoutMode::None => {}
            LayoutMode::Percentage => {
                update.ops.push(VisualOp {
                    role: ElementRole::ValueText,
                    mutation: Mutation::Text(value_text.clone()),
                });
                update.ops.push(VisualOp {
                    role: ElementRole::ValueText,
                    mutation: Mutation::Fill(self.value_color.color()),
                });
            }
            LayoutMode::Absolute => {
                // Vessel capacity in the display unit, independent of the
                // current percentage.
                let capacity = convert(
                    self.capacity_liters,
                    self.units,
                    ConversionDirection::FromNormalized,
                );
                let text = format!(
                    "{} {}",
                    format_value(capacity, self.settings.decimals),
                    self.units.label()
                );
                update.ops.push(VisualOp {
                    role: ElementRole::ValueText,
                    mutation: Mutation::Text(value_text.clone()),
                });
                update.ops.push(VisualOp {
                    role: ElementRole::ValueText,
                    mutation: Mutation::Fill(self.value_color.color()),
                });
                update.ops.push(VisualOp {
                    role: ElementRole::VolumeText,
                    mutation: Mutation::Text(text.clone()),
                });
                volume_text = Some(text);
            }
        }

        // 9. Tooltip content.
        let mut tooltip_markup = None;
        if self.settings.tooltip.enabled {
            self.tooltip_color.update(reading);
            let content = self.tooltip_gen.build(
                Some(sample),
                Some(self.tooltip_color.color()),
                self.translator.as_ref(),
                self.date_formatter.as_mut(),
            );
            let markup = content.render();
            if let Some(handle) = self.tooltip_handle.as_mut() {
                handle.set_content(&markup);
            }
            update.ops.push(VisualOp {
                role: ElementRole::Tooltip,
                mutation: Mutation::Html(markup.clone()),
            });
            tooltip_markup = Some(markup);
        }

        self.state = RenderState {
            percentage,
            coordinate,
            value_text,
            volume_text,
            tooltip_markup,
        };

        Some(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orchestrator(settings: WidgetSettings) -> Orchestrator {
        let view = ResolvedView {
            shape: settings.shape,
            volume: settings.volume,
            units: settings.units,
        };
        Orchestrator::new(settings, view)
    }

    #[test]
    fn test_percent_datasource_drives_geometry_directly() {
        // Vertical cylinder limits (180, 20); 50% must land at 100.
        let mut orch = orchestrator(WidgetSettings::default());
        let update = orch.tick(&LevelSample::numeric(0, 50.0), true).unwrap();

        let moved = update
            .ops_for(ElementRole::LiquidSurface)
            .find_map(|m| match m {
                Mutation::MoveTo { coordinate, animated, .. } => Some((*coordinate, *animated)),
                _ => None,
            })
            .unwrap();
        assert_eq!(moved, (100.0, false));
        assert_eq!(orch.state().percentage, 50.0);
    }

    #[test]
    fn test_liter_datasource_normalizes_against_capacity() {
        let settings = WidgetSettings {
            volume: 200.0,
            datasource_units: CapacityUnit::Liters,
            ..Default::default()
        };
        let mut orch = orchestrator(settings);
        let update = orch.tick(&LevelSample::numeric(0, 50.0), true).unwrap();

        assert_eq!(orch.state().percentage, 25.0);
        let text = update
            .ops_for(ElementRole::ValueText)
            .find_map(|m| match m {
                Mutation::Text(t) => Some(t.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(text, "25");
    }

    #[test]
    fn test_absent_value_aborts_the_tick() {
        let mut orch = orchestrator(WidgetSettings::default());
        orch.tick(&LevelSample::numeric(0, 60.0), true).unwrap();
        let before = orch.state().clone();

        assert!(orch.tick(&LevelSample::absent(1), false).is_none());
        assert_eq!(orch.state(), &before);
    }

    #[test]
    fn test_invalid_value_renders_not_available_at_zero() {
        let mut orch = orchestrator(WidgetSettings::default());
        let update = orch.tick(&LevelSample::invalid(0), true).unwrap();

        assert_eq!(orch.state().percentage, 0.0);
        assert_eq!(orch.state().coordinate, 180.0);
        let text = update
            .ops_for(ElementRole::ValueText)
            .find_map(|m| match m {
                Mutation::Text(t) => Some(t.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(text, "N/A");
    }

    #[test]
    fn test_layout_none_suppresses_numeric_overlays() {
        let settings = WidgetSettings {
            layout: LayoutMode::None,
            ..Default::default()
        };
        let mut orch = orchestrator(settings);
        let update = orch.tick(&LevelSample::numeric(0, 75.0), true).unwrap();

        assert_eq!(update.ops_for(ElementRole::ValueText).count(), 0);
        assert_eq!(update.ops_for(ElementRole::VolumeText).count(), 0);
        assert_eq!(update.ops_for(ElementRole::Overlay).count(), 0);
    }

    #[test]
    fn test_absolute_layout_adds_volume_readout() {
        let settings = WidgetSettings {
            volume: 200.0,
            datasource_units: CapacityUnit::Liters,
            units: CapacityUnit::Liters,
            layout: LayoutMode::Absolute,
            ..Default::default()
        };
        let mut orch = orchestrator(settings);
        let update = orch.tick(&LevelSample::numeric(0, 50.0), true).unwrap();

        let volume = update
            .ops_for(ElementRole::VolumeText)
            .find_map(|m| match m {
                Mutation::Text(t) => Some(t.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(volume, "200 L");
        assert_eq!(orch.state().value_text, "50");
    }

    #[test]
    fn test_repeated_sample_is_idempotent() {
        let mut orch = orchestrator(WidgetSettings::default());
        let sample = LevelSample::numeric(1_700_000_000_000, 33.0);

        let first = orch.tick(&sample, false).unwrap();
        let state_after_first = orch.state().clone();
        let second = orch.tick(&sample, false).unwrap();

        assert_eq!(first, second);
        assert_eq!(orch.state(), &state_after_first);
    }

    #[test]
    fn test_subsequent_updates_animate() {
        let mut orch = orchestrator(WidgetSettings::default());
        orch.tick(&LevelSample::numeric(0, 10.0), true).unwrap();
        let update = orch.tick(&LevelSample::numeric(1, 90.0), false).unwrap();

        let animated = update
            .ops_for(ElementRole::LiquidFill)
            .find_map(|m| match m {
                Mutation::MoveTo { animated, duration_ms, .. } => Some((*animated, *duration_ms)),
                _ => None,
            })
            .unwrap();
        assert_eq!(animated, (true, LEVEL_ANIMATION_MS));
    }

    #[test]
    fn test_tank_and_liquid_colors_follow_percentage_ranges() {
        use crate::color::{ColorRange, ColorSettings};

        let mut settings = WidgetSettings::default();
        let alarm = Color::rgb(255, 0, 0);
        settings.colors.tank = ColorSettings {
            color: Color::rgb(0, 0, 255),
            ranges: vec![ColorRange { from: None, to: Some(20.0), color: alarm }],
        };
        let mut orch = orchestrator(settings);

        let update = orch.tick(&LevelSample::numeric(0, 5.0), true).unwrap();
        let stroke = update
            .ops_for(ElementRole::ShapeStroke)
            .find_map(|m| match m {
                Mutation::Stroke(c) => Some(*c),
                _ => None,
            })
            .unwrap();
        assert_eq!(stroke, alarm);
    }
}
