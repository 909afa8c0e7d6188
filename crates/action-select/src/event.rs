//! Events emitted by the palette for the host to handle.

use crate::protocol::{Arguments, ServiceRequest};

/// Events emitted by the palette.
///
/// The palette performs no I/O. The host delivers [`PaletteEvent::Send`]
/// requests to the action service and feeds the replies back through
/// [`crate::Palette::handle_message`].
///
/// # Example
///
/// ```ignore
/// for event in palette.handle_action(PaletteAction::Submit) {
///     match event {
///         PaletteEvent::Send(request) => connection.send(&request)?,
///         PaletteEvent::Closed => running = false,
///         _ => {}
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteEvent {
    /// Deliver this request to the action service.
    Send(ServiceRequest),

    /// The entry at this visible index became selected and should be
    /// scrolled to the center of the list.
    ScrollIntoView { visible_index: usize },

    /// The service accepted a fully specified invocation.
    InvocationComplete { key: String, args: Arguments },

    /// The palette closed; later actions are ignored.
    Closed,
}
