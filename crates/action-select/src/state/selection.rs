//! The ordered list of displayed entries and its single selection.

use crate::model::Entry;

/// Which entry [`SelectionList::index_of`] should locate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRef {
    /// Entry at this position in the full (unfiltered) list.
    At(usize),
    /// Whichever entry is currently selected.
    Selected,
}

/// Ordered, filterable collection of entries.
///
/// Holds either top-level actions or argument choices, never both. At most
/// one entry is selected at any time.
#[derive(Debug, Clone, Default)]
pub struct SelectionList {
    entries: Vec<Entry>,
    filtering: bool,
}

impl SelectionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every entry. Filtering ends and nothing is selected.
    pub fn replace(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.filtering = false;
        self.deselect_all();
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_filtering(&self) -> bool {
        self.filtering
    }

    /// Entries available for navigation and submission, in list order.
    pub fn visible(&self) -> impl Iterator<Item = &Entry> + '_ {
        let filtering = self.filtering;
        self.entries
            .iter()
            .filter(move |entry| entry.is_visible(filtering))
    }

    pub fn visible_len(&self) -> usize {
        self.visible().count()
    }

    pub fn selected(&self) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.selected)
    }

    /// Select the visible entry at `index`, wrapping in both directions.
    ///
    /// Returns the visible index that ended up selected, or `None` (with
    /// nothing selected) when no entry is visible.
    pub fn select_at(&mut self, index: isize) -> Option<usize> {
        self.deselect_all();

        let count = self.visible_len();
        if count == 0 {
            return None;
        }

        let target = index.rem_euclid(count as isize) as usize;
        let filtering = self.filtering;
        let entry = self
            .entries
            .iter_mut()
            .filter(|entry| entry.is_visible(filtering))
            .nth(target)?;
        entry.selected = true;
        Some(target)
    }

    pub fn deselect_all(&mut self) {
        for entry in &mut self.entries {
            entry.selected = false;
        }
    }

    /// Position of an entry within the visible subset.
    pub fn index_of(&self, target: EntryRef) -> Option<usize> {
        let position = match target {
            EntryRef::At(position) => position,
            EntryRef::Selected => self.entries.iter().position(|entry| entry.selected)?,
        };

        let entry = self.entries.get(position)?;
        if !entry.is_visible(self.filtering) {
            return None;
        }
        Some(
            self.entries[..position]
                .iter()
                .filter(|entry| entry.is_visible(self.filtering))
                .count(),
        )
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }

    pub(crate) fn set_filtering(&mut self, filtering: bool) {
        self.filtering = filtering;
    }
}
