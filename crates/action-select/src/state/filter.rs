//! Free-text filtering of the selection list.

use super::SelectionList;
use crate::model::Entry;

/// Predicate built from the text typed into the palette.
///
/// The text is lower-cased and split on single spaces; an entry passes when
/// every token occurs in its key or in its lower-cased name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    tokens: Vec<String>,
}

impl FilterQuery {
    pub fn parse(text: &str) -> Self {
        Self {
            tokens: text.to_lowercase().split(' ').map(str::to_string).collect(),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        let name = entry.name.to_lowercase();
        self.tokens
            .iter()
            .all(|token| entry.key.contains(token.as_str()) || name.contains(token.as_str()))
    }
}

impl SelectionList {
    /// Activate filtering and mark every entry failing `query`.
    ///
    /// Returns the number of entries left visible. Selection is untouched.
    pub fn mark_filtered(&mut self, query: &FilterQuery) -> usize {
        self.clear_filter();
        self.set_filtering(true);

        let mut visible = 0;
        for entry in self.entries_mut() {
            entry.filtered_out = !query.matches(entry);
            if !entry.filtered_out {
                visible += 1;
            }
        }
        visible
    }

    /// End filtering; every entry becomes visible. Selection is untouched.
    pub fn clear_filter(&mut self) {
        self.set_filtering(false);
        for entry in self.entries_mut() {
            entry.filtered_out = false;
        }
    }
}
