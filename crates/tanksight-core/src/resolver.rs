//! Shape & Secondary-Value Resolver
//!
//! Produces, once per widget instance, everything that must be known before
//! the first render: the vessel shape and the pair of secondary values
//! (vessel capacity, display unit). Resolution runs to completion before
//! any orchestrator tick and never retries; a fetch that cannot complete
//! leaves the instance in its terminal no-render state.

use crate::attributes::{AttributeFetcher, EntityRef};
use crate::error::WidgetError;
use crate::settings::{ValueSource, WidgetSettings};
use crate::shape::TankShape;
use crate::units::CapacityUnit;
use tracing::{debug, warn};

/// Everything the orchestrator needs that is not already in settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedView {
    /// Vessel shape to render
    pub shape: TankShape,
    /// Vessel capacity, expressed in the settings' volume unit
    pub volume: f64,
    /// Display unit of the numeric readout
    pub units: CapacityUnit,
}

/// Resolve shape, then secondary values, in that order.
pub async fn resolve<F: AttributeFetcher>(
    settings: &WidgetSettings,
    entity: &EntityRef,
    fetcher: &F,
) -> Result<ResolvedView, WidgetError> {
    let shape = resolve_shape(settings, entity, fetcher).await?;
    let (volume, units) = resolve_secondary(settings, entity, fetcher).await?;
    debug!(shape = shape.identifier(), volume, "widget resolution complete");
    Ok(ResolvedView { shape, volume, units })
}

/// Determine the shape to render.
///
/// Issues one fetch only when the shape is attribute-driven and the entity
/// is real; a missing or unparseable fetched value falls back to the
/// statically configured shape.
pub async fn resolve_shape<F: AttributeFetcher>(
    settings: &WidgetSettings,
    entity: &EntityRef,
    fetcher: &F,
) -> Result<TankShape, WidgetError> {
    if settings.shape_source != ValueSource::Attribute || entity.is_placeholder() {
        return Ok(settings.shape);
    }

    let attributes = fetcher
        .fetch_attributes(entity, &[settings.shape_attribute.as_str()])
        .await?;

    match attributes.get(&settings.shape_attribute).and_then(|v| v.as_str()) {
        Some(ident) => match TankShape::parse(ident) {
            Ok(shape) => Ok(shape),
            Err(_) => {
                warn!(
                    attribute = %settings.shape_attribute,
                    value = ident,
                    "shape attribute is not a known shape, using configured shape"
                );
                Ok(settings.shape)
            }
        },
        None => {
            warn!(
                attribute = %settings.shape_attribute,
                "shape attribute missing, using configured shape"
            );
            Ok(settings.shape)
        }
    }
}

/// Determine vessel capacity and display unit.
///
/// When neither value is attribute-driven, or the entity is the
/// placeholder, the static constants are returned without any fetch.
/// Otherwise exactly one combined fetch is issued for whichever attribute
/// names are actually needed; each missing value falls back to its static
/// constant independently.
pub async fn resolve_secondary<F: AttributeFetcher>(
    settings: &WidgetSettings,
    entity: &EntityRef,
    fetcher: &F,
) -> Result<(f64, CapacityUnit), WidgetError> {
    let volume_from_attribute = settings.volume_source == ValueSource::Attribute;
    let units_from_attribute = settings.units_source == ValueSource::Attribute;

    if (!volume_from_attribute && !units_from_attribute) || entity.is_placeholder() {
        return Ok((settings.volume, settings.units));
    }

    let mut keys = Vec::new();
    if volume_from_attribute {
        keys.push(settings.volume_attribute.as_str());
    }
    if units_from_attribute {
        keys.push(settings.units_attribute.as_str());
    }

    let attributes = fetcher.fetch_attributes(entity, &keys).await?;

    let volume = if volume_from_attribute {
        match attributes.get(&settings.volume_attribute).and_then(as_number) {
            Some(v) => v,
            None => {
                warn!(
                    attribute = %settings.volume_attribute,
                    "volume attribute missing, using configured volume"
                );
                settings.volume
            }
        }
    } else {
        settings.volume
    };

    let units = if units_from_attribute {
        match attributes
            .get(&settings.units_attribute)
            .and_then(|v| v.as_str())
            .map(CapacityUnit::parse)
        {
            Some(Ok(unit)) => unit,
            Some(Err(_)) | None => {
                warn!(
                    attribute = %settings.units_attribute,
                    "units attribute missing or unrecognized, using configured units"
                );
                settings.units
            }
        }
    } else {
        settings.units
    };

    Ok((volume, units))
}

fn as_number(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
