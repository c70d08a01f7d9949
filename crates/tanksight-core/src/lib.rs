//! # TankSight Core Library
//!
//! Core functionality for TankSight liquid level dashboard widgets.

#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - Capacity unit conversion (metric, gallons, percent)
//! - Tank shape geometry and liquid surface positioning
//! - One-time resolution of shape and vessel parameters from attributes
//! - Declarative per-measurement visual updates (colors, position, labels)
//! - Tooltip content generation
//!
//! ## Example
//!
//! ```rust,ignore
//! use tanksight_core::prelude::*;
//!
//! // Resolve the widget once, then feed it the measurement stream
//! let widget = LevelWidget::init(settings, &entity, &fetcher, &loader).await;
//! if let Some(update) = widget.on_data(&sample) {
//!     for op in &update.ops {
//!         apply_to_svg(op);
//!     }
//! }
//! ```

pub mod attributes;
pub mod color;
pub mod demo;
pub mod error;
pub mod format;
pub mod i18n;
pub mod measurement;
pub mod resolver;
pub mod settings;
pub mod shape;
pub mod svg;
pub mod units;
pub mod widget;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::attributes::{AttributeFetcher, EntityRef, HttpAttributeFetcher};
    pub use crate::color::{Color, ColorProcessor, ColorRange, ColorSettings, RangeColorProcessor};
    pub use crate::error::WidgetError;
    pub use crate::measurement::{LevelSample, SampleValue};
    pub use crate::resolver::ResolvedView;
    pub use crate::settings::{LayoutMode, TooltipSettings, ValueSource, WidgetSettings};
    pub use crate::shape::{level_position, LevelLimits, TankShape};
    pub use crate::svg::{FsTemplateLoader, TemplateLoader};
    pub use crate::units::{convert, CapacityUnit, ConversionDirection};
    pub use crate::widget::orchestrator::{ElementRole, FrameUpdate, Mutation, VisualOp};
    pub use crate::widget::{LevelWidget, WidgetState};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
