//! Label translation
//!
//! The widget treats translation as a pure string lookup; the dashboard host
//! usually supplies its own implementation wired to its localization layer.

use std::collections::HashMap;

/// Translation key for the tooltip level row label.
pub const KEY_LEVEL: &str = "level";
/// Translation key for the tooltip last-update row label.
pub const KEY_LAST_UPDATE: &str = "last-update";
/// Translation key for the "not available" readout.
pub const KEY_NOT_AVAILABLE: &str = "not-available";

/// Pure string lookup for widget labels.
pub trait Translator {
    /// Resolve a label by key. Unknown keys return the key itself so a
    /// missing translation is visible instead of blank.
    fn label(&self, key: &str) -> String;
}

/// Built-in English labels, optionally overridden per key.
#[derive(Debug, Clone, Default)]
pub struct StaticTranslator {
    overrides: HashMap<String, String>,
}

impl StaticTranslator {
    /// Translator with the built-in English labels only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override or add a label.
    pub fn with_label(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), label.into());
        self
    }
}

impl Translator for StaticTranslator {
    fn label(&self, key: &str) -> String {
        if let Some(label) = self.overrides.get(key) {
            return label.clone();
        }
        match key {
            KEY_LEVEL => "Level".to_string(),
            KEY_LAST_UPDATE => "Last update".to_string(),
            KEY_NOT_AVAILABLE => "N/A".to_string(),
            other => other.to_string(),
        }
    }
}
