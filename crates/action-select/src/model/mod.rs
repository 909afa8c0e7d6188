//! Data model: the service's action catalog and the palette's display rows.

mod catalog;
mod entry;

pub use catalog::{ActionNode, ActionPath, Catalog};
pub use entry::{sentence_case, Entry};
