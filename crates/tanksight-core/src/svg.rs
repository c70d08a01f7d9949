//! SVG template loading
//!
//! The geometry table references each shape's SVG template by a relative
//! path; the loader collaborator turns that reference into raw markup.
//! Markup is sanity-checked with quick-xml before it is handed to the
//! rendering layer so a broken template fails resolution instead of
//! producing a half-drawn widget.

use crate::error::WidgetError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::future::Future;
use std::path::PathBuf;

/// Template-loader collaborator: reference in, raw SVG markup out.
pub trait TemplateLoader {
    /// Load the markup behind a geometry-table template reference.
    fn load_template(
        &self,
        reference: &str,
    ) -> impl Future<Output = Result<String, WidgetError>> + Send;
}

/// Default [`TemplateLoader`] reading templates from a directory tree.
#[derive(Debug, Clone)]
pub struct FsTemplateLoader {
    root: PathBuf,
}

impl FsTemplateLoader {
    /// Loader rooted at a template directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateLoader for FsTemplateLoader {
    async fn load_template(&self, reference: &str) -> Result<String, WidgetError> {
        let path = self.root.join(reference);
        let markup = tokio::fs::read_to_string(&path).await?;
        validate_svg(reference, &markup)?;
        Ok(markup)
    }
}

/// Check that markup parses as XML and that its root element is `<svg>`.
pub fn validate_svg(reference: &str, markup: &str) -> Result<(), WidgetError> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                return if e.name().as_ref() == b"svg" {
                    Ok(())
                } else {
                    Err(WidgetError::Template {
                        reference: reference.to_string(),
                        message: format!(
                            "root element is '{}', expected 'svg'",
                            String::from_utf8_lossy(e.name().as_ref())
                        ),
                    })
                };
            }
            Ok(Event::Eof) => {
                return Err(WidgetError::Template {
                    reference: reference.to_string(),
                    message: "no root element".to_string(),
                });
            }
            Err(e) => {
                return Err(WidgetError::Template {
                    reference: reference.to_string(),
                    message: e.to_string(),
                });
            }
            // Declarations, comments, processing instructions before the root
            _ => {}
        }
        buf.clear();
    }
}
