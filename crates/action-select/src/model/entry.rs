//! Display rows of the selection list.

use super::Catalog;

/// Display name used when neither the catalog nor the caller provides one.
const ERROR_NAME: &str = "error";

/// One selectable row: an action, a numeric value, or a preset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// Text shown for the row.
    pub name: String,
    /// Action path, or the value identifier of an argument choice.
    pub key: String,
    pub selected: bool,
    /// Hidden by the active filter.
    pub filtered_out: bool,
    /// Value recorded when this row answers an argument prompt.
    pub payload: Option<String>,
}

impl Entry {
    /// Build a row for `key`.
    ///
    /// With a catalog that resolves `key`, the name is the node's short (or
    /// full) name in sentence case. Otherwise it is `fallback`, or `"error"`
    /// when `fallback` is empty. The key is always kept as given.
    pub fn render(key: impl Into<String>, fallback: &str, catalog: Option<&Catalog>) -> Self {
        let key = key.into();
        let name = match catalog.and_then(|catalog| catalog.resolve_key(&key)) {
            Some(node) => sentence_case(node.display_name()),
            None if fallback.is_empty() => {
                if catalog.is_some() {
                    log::debug!("No catalog entry for '{}'", key);
                }
                ERROR_NAME.to_string()
            }
            None => fallback.to_string(),
        };

        Self {
            name,
            key,
            ..Self::default()
        }
    }

    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Whether the row can be navigated to and submitted.
    pub fn is_visible(&self, filtering: bool) -> bool {
        !filtering || !self.filtered_out
    }
}

/// Upper-case the first character, leaving the rest untouched.
pub fn sentence_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
