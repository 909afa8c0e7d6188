//! Palette Actions
//!
//! Semantic actions the palette understands. The host (or the key/pointer
//! bindings in [`crate::input`]) maps raw input to these and dispatches them
//! to [`crate::Palette::handle_action`].

/// Actions that can be performed on the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteAction {
    // === Navigation ===
    /// Select the next visible entry, wrapping to the first
    SelectNext,
    /// Select the previous visible entry, wrapping to the last
    SelectPrevious,
    /// Select the visible entry at this index (wraps, negative counts from the end)
    SelectAt(isize),

    // === Submission ===
    /// Submit the selected entry
    Submit,
    /// Select and submit the visible entry at this index
    SubmitVisible(usize),

    // === Text input ===
    /// Character typed into the input
    InsertChar(char),
    /// Delete the last character of the input
    DeleteChar,
    /// Clear the whole input
    ClearInput,
    /// Replace the input text
    SetInput(String),

    // === General ===
    /// Close the palette, abandoning any invocation in progress
    Close,
}
