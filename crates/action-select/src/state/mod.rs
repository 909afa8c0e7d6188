//! State management for the palette.

mod filter;
mod invocation;
mod palette;
mod pending;
mod selection;

pub use filter::FilterQuery;
pub use invocation::{FlowState, FlowStep, InvocationContext};
pub use palette::{ListGeometry, Palette, NUMERIC_CHOICES};
pub use pending::{PendingRequests, RequestKind};
pub use selection::{EntryRef, SelectionList};
