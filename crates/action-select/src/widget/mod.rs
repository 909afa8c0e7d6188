//! Ratatui widgets for the palette.

mod palette;

pub use palette::{centered_offset, centered_panel, PaletteStyle, PaletteWidget};
