//! # action-select
//!
//! A keyboard-driven command palette over a hierarchical action catalog
//! published by an external action service.
//!
//! ## Design Principles
//!
//! The palette is **instrumented**: it never talks to the service itself.
//! Every operation returns [`PaletteEvent`]s, and the host delivers
//! [`PaletteEvent::Send`] requests and feeds replies back through
//! [`Palette::handle_message`]. This keeps the controller single-threaded
//! and testable without a running service.
//!
//! ## Flow
//!
//! 1. [`Palette::mount`] opens the panel and emits a catalog query.
//! 2. The catalog is flattened into one entry per invocable action.
//! 3. The user filters, navigates, and submits an entry; the palette emits an
//!    invocation request.
//! 4. The service either asks for an argument (the list is replaced by its
//!    choices and step 3 repeats) or reports the invocation complete, which
//!    closes the palette.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use action_select::{decode_message, Palette, PaletteEvent, PaletteWidget};
//!
//! let mut palette = Palette::new();
//! for event in palette.mount() {
//!     handle(event);
//! }
//!
//! // Terminal input
//! let outcome = palette.handle_key(key_event);
//!
//! // Service output, one JSON message per line
//! if let Some(message) = decode_message(&line)? {
//!     for event in palette.handle_message(message) {
//!         handle(event);
//!     }
//! }
//!
//! // Rendering
//! frame.render_stateful_widget(PaletteWidget::new(), frame.area(), &mut palette);
//! ```

pub mod action;
pub mod event;
pub mod input;
pub mod model;
pub mod protocol;
pub mod state;
pub mod widget;

// Re-export commonly used types
pub use action::PaletteAction;
pub use event::PaletteEvent;
pub use input::{translate_key, KeyBinding, KeyOutcome};
pub use model::{ActionNode, ActionPath, Catalog, Entry};
pub use protocol::{
    decode_message, encode_request, ArgumentInfo, ArgumentRequest, Arguments, Preset,
    ProtocolError, RequestId, ServiceMessage, ServiceRequest,
};
pub use state::{FlowState, ListGeometry, Palette};
pub use widget::{PaletteStyle, PaletteWidget};
