//! Synchronous localization seam for mapped concept codes.

use std::collections::HashMap;

/// Resolves a translation code to display text. Lookups are synchronous;
/// the host hands the widget an already-loaded message bundle.
#[cfg_attr(test, mockall::automock)]
pub trait Localizer {
    /// Returns the localized text for `code`, or the code itself when no
    /// translation is registered.
    fn translate(&self, code: &str) -> String;
}

/// Map-backed message bundle.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(code.into(), text.into());
    }
}

impl<S: Into<String>, T: Into<String>> FromIterator<(S, T)> for TranslationTable {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(code, text)| (code.into(), text.into()))
                .collect(),
        }
    }
}

impl Localizer for TranslationTable {
    fn translate(&self, code: &str) -> String {
        self.entries
            .get(code)
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }
}
