//! Level widget lifecycle
//!
//! Ties resolution, template loading, and the orchestrator together into
//! one widget instance. Initialization is the only asynchronous phase; a
//! failure there is terminal (the instance renders nothing, ever) and is
//! reported once via tracing rather than retried.

pub mod animation;
pub mod orchestrator;
pub mod tooltip;

use crate::attributes::{AttributeFetcher, EntityRef};
use crate::error::WidgetError;
use crate::measurement::LevelSample;
use crate::resolver;
use crate::settings::WidgetSettings;
use crate::svg::TemplateLoader;
use crate::widget::orchestrator::{FrameUpdate, Orchestrator, RenderState};
use crate::widget::tooltip::TooltipHandle;
use tracing::warn;

/// Lifecycle state of a widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    /// Resolved and renderable
    Ready,
    /// Resolution failed; terminal, never renders
    Failed,
}

/// One liquid-level widget instance.
///
/// Construct with [`LevelWidget::init`]; feed samples with
/// [`LevelWidget::on_data`]. All callbacks for one instance run strictly
/// sequentially, so the instance owns its render state without locking.
pub struct LevelWidget {
    state: WidgetState,
    template_markup: Option<String>,
    orchestrator: Option<Orchestrator>,
    painted: bool,
}

impl LevelWidget {
    /// Resolve shape and secondary values, then load the shape's template.
    ///
    /// Resolution runs to completion before the widget accepts any data.
    /// Any failure yields a `Failed` instance: the error is logged once and
    /// every subsequent [`on_data`](Self::on_data) call is a no-op.
    pub async fn init<F, L>(
        settings: WidgetSettings,
        entity: &EntityRef,
        fetcher: &F,
        loader: &L,
    ) -> Self
    where
        F: AttributeFetcher,
        L: TemplateLoader,
    {
        match Self::try_init(settings, entity, fetcher, loader).await {
            Ok((orchestrator, markup)) => Self {
                state: WidgetState::Ready,
                template_markup: Some(markup),
                orchestrator: Some(orchestrator),
                painted: false,
            },
            Err(e) => {
                warn!(error = %e, "widget resolution failed, instance will not render");
                Self {
                    state: WidgetState::Failed,
                    template_markup: None,
                    orchestrator: None,
                    painted: false,
                }
            }
        }
    }

    async fn try_init<F, L>(
        settings: WidgetSettings,
        entity: &EntityRef,
        fetcher: &F,
        loader: &L,
    ) -> Result<(Orchestrator, String), WidgetError>
    where
        F: AttributeFetcher,
        L: TemplateLoader,
    {
        let view = resolver::resolve(&settings, entity, fetcher)
            .await
            .map_err(|e| WidgetError::ResolutionFailure(e.to_string()))?;
        let markup = loader
            .load_template(view.shape.template())
            .await
            .map_err(|e| WidgetError::ResolutionFailure(e.to_string()))?;
        Ok((Orchestrator::new(settings, view), markup))
    }

    /// Lifecycle state.
    pub fn state(&self) -> WidgetState {
        self.state
    }

    /// Raw SVG markup of the resolved template, for the hosting UI.
    pub fn template_markup(&self) -> Option<&str> {
        self.template_markup.as_deref()
    }

    /// Current render state, if the widget is renderable.
    pub fn render_state(&self) -> Option<&RenderState> {
        self.orchestrator.as_ref().map(|o| o.state())
    }

    /// Attach a live tooltip popup.
    pub fn set_tooltip_handle(&mut self, handle: Box<dyn TooltipHandle + Send>) {
        if let Some(orchestrator) = self.orchestrator.as_mut() {
            orchestrator.set_tooltip_handle(handle);
        }
    }

    /// Process one measurement from the data stream.
    ///
    /// The first frame actually painted is immediate; later frames animate.
    /// Returns `None` when the instance is failed or the sample carries no
    /// value.
    pub fn on_data(&mut self, sample: &LevelSample) -> Option<FrameUpdate> {
        let orchestrator = self.orchestrator.as_mut()?;
        let update = orchestrator.tick(sample, !self.painted)?;
        self.painted = true;
        Some(update)
    }

    /// Tear the widget down. Destroys the tooltip popup; anything still in
    /// flight that completes afterwards is ignored by the host simply not
    /// calling [`on_data`](Self::on_data) again.
    pub fn destroy(&mut self) {
        if let Some(orchestrator) = self.orchestrator.as_mut() {
            orchestrator.destroy_tooltip();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::orchestrator::{ElementRole, Mutation};
    use std::collections::HashMap;

    struct NoFetch;

    impl AttributeFetcher for NoFetch {
        async fn fetch_attributes(
            &self,
            _entity: &EntityRef,
            _keys: &[&str],
        ) -> Result<HashMap<String, serde_json::Value>, WidgetError> {
            panic!("static configuration must not fetch");
        }
    }

    struct InlineTemplates;

    impl TemplateLoader for InlineTemplates {
        async fn load_template(&self, _reference: &str) -> Result<String, WidgetError> {
            Ok("<svg viewBox=\"0 0 200 200\"/>".to_string())
        }
    }

    struct BrokenTemplates;

    impl TemplateLoader for BrokenTemplates {
        async fn load_template(&self, reference: &str) -> Result<String, WidgetError> {
            Err(WidgetError::Template {
                reference: reference.to_string(),
                message: "missing".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_first_paint_is_immediate_then_animated() {
        let mut widget = LevelWidget::init(
            WidgetSettings::default(),
            &EntityRef::placeholder(),
            &NoFetch,
            &InlineTemplates,
        )
        .await;
        assert_eq!(widget.state(), WidgetState::Ready);

        let first = widget.on_data(&LevelSample::numeric(0, 10.0)).unwrap();
        let animated = |update: &FrameUpdate| {
            update
                .ops_for(ElementRole::LiquidFill)
                .find_map(|m| match m {
                    Mutation::MoveTo { animated, .. } => Some(*animated),
                    _ => None,
                })
                .unwrap()
        };
        assert!(!animated(&first));

        let second = widget.on_data(&LevelSample::numeric(1, 20.0)).unwrap();
        assert!(animated(&second));
    }

    #[tokio::test]
    async fn test_aborted_first_tick_keeps_initial_paint_immediate() {
        let mut widget = LevelWidget::init(
            WidgetSettings::default(),
            &EntityRef::placeholder(),
            &NoFetch,
            &InlineTemplates,
        )
        .await;

        assert!(widget.on_data(&LevelSample::absent(0)).is_none());

        let first = widget.on_data(&LevelSample::numeric(1, 42.0)).unwrap();
        let animated = first
            .ops_for(ElementRole::LiquidSurface)
            .find_map(|m| match m {
                Mutation::MoveTo { animated, .. } => Some(*animated),
                _ => None,
            })
            .unwrap();
        assert!(!animated);
    }

    #[tokio::test]
    async fn test_template_failure_is_terminal() {
        let mut widget = LevelWidget::init(
            WidgetSettings::default(),
            &EntityRef::placeholder(),
            &NoFetch,
            &BrokenTemplates,
        )
        .await;

        assert_eq!(widget.state(), WidgetState::Failed);
        assert!(widget.template_markup().is_none());
        assert!(widget.on_data(&LevelSample::numeric(0, 50.0)).is_none());
    }
}
