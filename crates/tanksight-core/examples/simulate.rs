//! Runs a simulated tank against a widget instance and prints the frame
//! updates it emits. Useful for eyeballing the data-to-visual pipeline
//! without a dashboard host.

use anyhow::Result;
use tanksight_core::demo::TankSimulator;
use tanksight_core::error::WidgetError;
use tanksight_core::prelude::*;

/// Inline template source so the demo needs no asset directory.
struct InlineTemplates;

impl TemplateLoader for InlineTemplates {
    async fn load_template(&self, _reference: &str) -> Result<String, WidgetError> {
        Ok(r#"<svg viewBox="0 0 200 200"><path class="tank-shape"/><rect class="tank-liquid"/></svg>"#
            .to_string())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let settings = WidgetSettings {
        volume: 200.0,
        datasource_units: CapacityUnit::Liters,
        units: CapacityUnit::Liters,
        layout: LayoutMode::Absolute,
        ..Default::default()
    };

    // Placeholder entity: resolution never leaves the process, so the HTTP
    // fetcher is wired but idle.
    let fetcher = HttpAttributeFetcher::new("http://localhost:8080");
    let mut widget = LevelWidget::init(
        settings,
        &EntityRef::placeholder(),
        &fetcher,
        &InlineTemplates,
    )
    .await;

    let mut simulator = TankSimulator::seeded(200.0, 1);
    for tick in 0..20u64 {
        let sample = simulator.update(tick * 1_000);
        if let Some(update) = widget.on_data(&sample) {
            let state = widget.render_state().expect("widget is ready");
            println!(
                "t={:>2}s  level={:>5.1}%  y={:>6.2}  readout=\"{}\"  ops={}",
                tick,
                state.percentage,
                state.coordinate,
                state.value_text,
                update.ops.len()
            );
        }
    }

    Ok(())
}
