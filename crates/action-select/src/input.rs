//! Keyboard and pointer bindings for the palette.
//!
//! Keys are translated in two steps: [`translate_key`] maps a key event to a
//! [`KeyBinding`] without touching state, and [`Palette::handle_key`] applies
//! it. Keys the palette does not bind are reported as [`KeyOutcome::Ignored`]
//! so the host can handle them (Esc, Ctrl+C, ...).

use crate::action::PaletteAction;
use crate::event::PaletteEvent;
use crate::state::Palette;
use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

/// What a key means to the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyBinding {
    /// Perform this action.
    Action(PaletteAction),
    /// Swallow the key without doing anything.
    Suppress,
    /// Not a palette key.
    Unbound,
}

/// Whether the palette handled an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Handled; the host must not apply its own behavior for this event.
    Consumed(Vec<PaletteEvent>),
    /// Not handled; the host may act on it.
    Ignored,
}

impl KeyOutcome {
    pub fn is_consumed(&self) -> bool {
        matches!(self, Self::Consumed(_))
    }

    /// Events produced while handling the input (empty when ignored).
    pub fn into_events(self) -> Vec<PaletteEvent> {
        match self {
            Self::Consumed(events) => events,
            Self::Ignored => Vec::new(),
        }
    }
}

/// Map a key press to its palette binding.
pub fn translate_key(key: &KeyEvent) -> KeyBinding {
    if key.kind == KeyEventKind::Release {
        return KeyBinding::Unbound;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Down => KeyBinding::Action(PaletteAction::SelectNext),
        KeyCode::Up => KeyBinding::Action(PaletteAction::SelectPrevious),
        KeyCode::Char('n') if ctrl => KeyBinding::Action(PaletteAction::SelectNext),
        KeyCode::Char('p') if ctrl => KeyBinding::Action(PaletteAction::SelectPrevious),
        KeyCode::Enter => KeyBinding::Action(PaletteAction::Submit),
        KeyCode::Tab | KeyCode::BackTab => KeyBinding::Suppress,

        // Text editing
        KeyCode::Char('u') if ctrl => KeyBinding::Action(PaletteAction::ClearInput),
        KeyCode::Backspace if key.modifiers.contains(KeyModifiers::SUPER) => {
            KeyBinding::Action(PaletteAction::ClearInput)
        }
        KeyCode::Backspace => KeyBinding::Action(PaletteAction::DeleteChar),
        KeyCode::Char(c) if !ctrl && !alt => KeyBinding::Action(PaletteAction::InsertChar(c)),

        _ => KeyBinding::Unbound,
    }
}

impl Palette {
    /// Apply a key event.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match translate_key(&key) {
            KeyBinding::Action(action) => KeyOutcome::Consumed(self.handle_action(action)),
            KeyBinding::Suppress => KeyOutcome::Consumed(Vec::new()),
            KeyBinding::Unbound => KeyOutcome::Ignored,
        }
    }

    /// Apply a pointer event.
    ///
    /// A left-button press inside the list submits the entry under it; the
    /// hit test uses the geometry recorded by the last render.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> KeyOutcome {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return KeyOutcome::Ignored;
        }
        let Some(geometry) = self.geometry() else {
            return KeyOutcome::Ignored;
        };
        if !geometry
            .area
            .contains(ratatui::layout::Position::new(mouse.column, mouse.row))
        {
            return KeyOutcome::Ignored;
        }

        match geometry.visible_index_at(mouse.column, mouse.row) {
            Some(index) if index < self.list().visible_len() => {
                KeyOutcome::Consumed(self.handle_action(PaletteAction::SubmitVisible(index)))
            }
            _ => KeyOutcome::Consumed(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActionNode, Catalog};
    use crate::protocol::{ServiceMessage, ServiceRequest};
    use crate::state::ListGeometry;
    use indexmap::IndexMap;
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn loaded(keys: &[&str]) -> Palette {
        let actions = keys
            .iter()
            .map(|key| {
                let node = ActionNode {
                    name: key.to_string(),
                    name_short: None,
                    is_invocable: true,
                    actions: IndexMap::new(),
                };
                (key.to_string(), node)
            })
            .collect();

        let mut palette = Palette::new();
        let query = palette.mount().remove(0);
        let PaletteEvent::Send(request) = query else {
            panic!("expected query");
        };
        palette.handle_message(ServiceMessage::Catalog {
            id: request.id(),
            actions: Catalog::new(actions),
        });
        palette
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_translate_navigation_keys() {
        assert_eq!(
            translate_key(&key(KeyCode::Down)),
            KeyBinding::Action(PaletteAction::SelectNext)
        );
        assert_eq!(
            translate_key(&key(KeyCode::Up)),
            KeyBinding::Action(PaletteAction::SelectPrevious)
        );
        assert_eq!(
            translate_key(&ctrl('n')),
            KeyBinding::Action(PaletteAction::SelectNext)
        );
        assert_eq!(
            translate_key(&key(KeyCode::Enter)),
            KeyBinding::Action(PaletteAction::Submit)
        );
    }

    #[test]
    fn test_translate_text_keys() {
        assert_eq!(
            translate_key(&key(KeyCode::Char('x'))),
            KeyBinding::Action(PaletteAction::InsertChar('x'))
        );
        assert_eq!(
            translate_key(&KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT)),
            KeyBinding::Action(PaletteAction::InsertChar('X'))
        );
        assert_eq!(
            translate_key(&key(KeyCode::Backspace)),
            KeyBinding::Action(PaletteAction::DeleteChar)
        );
        assert_eq!(
            translate_key(&ctrl('u')),
            KeyBinding::Action(PaletteAction::ClearInput)
        );
    }

    #[test]
    fn test_tab_is_suppressed_and_others_unbound() {
        assert_eq!(translate_key(&key(KeyCode::Tab)), KeyBinding::Suppress);
        assert_eq!(translate_key(&key(KeyCode::BackTab)), KeyBinding::Suppress);
        assert_eq!(translate_key(&key(KeyCode::Esc)), KeyBinding::Unbound);
        assert_eq!(translate_key(&ctrl('c')), KeyBinding::Unbound);
        assert_eq!(translate_key(&key(KeyCode::F(5))), KeyBinding::Unbound);
    }

    #[test]
    fn test_key_release_is_unbound() {
        let mut release = key(KeyCode::Down);
        release.kind = KeyEventKind::Release;
        assert_eq!(translate_key(&release), KeyBinding::Unbound);
    }

    #[test]
    fn test_handle_key_navigates() {
        let mut palette = loaded(&["a", "b", "c"]);
        let outcome = palette.handle_key(key(KeyCode::Up));
        assert!(outcome.is_consumed());
        assert_eq!(palette.selected_index(), Some(2));

        let outcome = palette.handle_key(key(KeyCode::Tab));
        assert_eq!(outcome, KeyOutcome::Consumed(vec![]));
        assert_eq!(palette.selected_index(), Some(2));

        assert_eq!(palette.handle_key(key(KeyCode::Esc)), KeyOutcome::Ignored);
    }

    #[test]
    fn test_click_submits_entry_under_pointer() {
        let mut palette = loaded(&["a", "b", "c"]);
        palette.set_geometry(ListGeometry {
            area: Rect::new(0, 2, 30, 3),
            offset: 0,
        });

        let events = palette.handle_mouse(click(5, 3)).into_events();
        let sent = events.iter().find_map(|event| match event {
            PaletteEvent::Send(ServiceRequest::Invocation { key, .. }) => Some(key.clone()),
            _ => None,
        });
        assert_eq!(sent.as_deref(), Some("b"));
        assert_eq!(palette.selected_index(), Some(1));
    }

    #[test]
    fn test_click_outside_list_is_ignored() {
        let mut palette = loaded(&["a", "b"]);
        assert_eq!(palette.handle_mouse(click(1, 1)), KeyOutcome::Ignored);

        palette.set_geometry(ListGeometry {
            area: Rect::new(0, 2, 30, 5),
            offset: 0,
        });
        assert_eq!(palette.handle_mouse(click(1, 1)), KeyOutcome::Ignored);
        // Inside the list but below the last entry
        assert_eq!(palette.handle_mouse(click(1, 6)), KeyOutcome::Consumed(vec![]));
    }
}
