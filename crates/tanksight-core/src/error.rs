//! Widget errors

use thiserror::Error;

/// Errors that can occur while resolving or rendering a level widget
#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Widget resolution failed: {0}")]
    ResolutionFailure(String),

    #[error("Unrecognized capacity unit: '{0}'")]
    InvalidUnit(String),

    #[error("Unrecognized tank shape: '{0}'")]
    UnknownShape(String),

    #[error("Template '{reference}' is not usable: {message}")]
    Template {
        /// Template reference that was being loaded
        reference: String,
        /// What went wrong with the markup
        message: String,
    },

    #[error("Attribute fetch failed: {0}")]
    Fetch(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
