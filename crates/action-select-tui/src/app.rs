//! Host application: routes terminal input and service messages into the
//! palette and carries out the events it emits.

use crate::service::{ServiceEvent, ServiceSink};
use action_select::{Arguments, KeyOutcome, Palette, PaletteAction, PaletteEvent, PaletteWidget};
use action_select_config::AppConfig;
use anyhow::{bail, Result};
use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;

/// An invocation accepted by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub key: String,
    pub args: Arguments,
}

pub struct App<S> {
    config: AppConfig,
    palette: Palette,
    service: S,
    running: bool,
    invocation: Option<Invocation>,
}

impl<S: ServiceSink> App<S> {
    pub fn new(config: AppConfig, service: S) -> Self {
        Self {
            config,
            palette: Palette::new(),
            service,
            running: true,
            invocation: None,
        }
    }

    /// Open the palette.
    pub fn start(&mut self) -> Result<()> {
        let events = self.palette.mount();
        self.apply(events)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The completed invocation, if any, and the service.
    pub fn finish(self) -> (Option<Invocation>, S) {
        (self.invocation, self.service)
    }

    pub fn handle_terminal_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => {
                let events = self.palette.handle_mouse(mouse).into_events();
                self.apply(events)
            }
            _ => Ok(()),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.palette.handle_key(key) {
            KeyOutcome::Consumed(events) => self.apply(events),
            KeyOutcome::Ignored if is_close_key(&key) => {
                let events = self.palette.handle_action(PaletteAction::Close);
                self.apply(events)
            }
            KeyOutcome::Ignored => Ok(()),
        }
    }

    pub fn handle_service_event(&mut self, event: ServiceEvent) -> Result<()> {
        match event {
            ServiceEvent::Message(message) => {
                let events = self.palette.handle_message(message);
                self.apply(events)
            }
            ServiceEvent::Disconnected => {
                if !self.running {
                    return Ok(());
                }
                self.running = false;
                bail!("Action service exited before the invocation completed")
            }
        }
    }

    fn apply(&mut self, events: Vec<PaletteEvent>) -> Result<()> {
        for event in events {
            match event {
                PaletteEvent::Send(request) => self.service.send(&request)?,
                PaletteEvent::ScrollIntoView { visible_index } => {
                    log::trace!("Entry {} scrolled into view", visible_index);
                }
                PaletteEvent::InvocationComplete { key, args } => {
                    self.invocation = Some(Invocation { key, args });
                }
                PaletteEvent::Closed => self.running = false,
            }
        }
        Ok(())
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let widget = PaletteWidget::new()
            .size_percent(
                self.config.panel_width_percent,
                self.config.panel_height_percent,
            )
            .placeholder(&self.config.placeholder)
            .input_placeholder(&self.config.input_placeholder);
        frame.render_stateful_widget(widget, frame.area(), &mut self.palette);
    }
}

fn is_close_key(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use action_select::{decode_message, ServiceRequest};

    #[derive(Default)]
    struct Recorder {
        sent: Vec<ServiceRequest>,
    }

    impl ServiceSink for Recorder {
        fn send(&mut self, request: &ServiceRequest) -> Result<()> {
            self.sent.push(request.clone());
            Ok(())
        }
    }

    fn started() -> App<Recorder> {
        let mut app = App::new(AppConfig::default(), Recorder::default());
        app.start().unwrap();
        app
    }

    fn receive(app: &mut App<Recorder>, line: &str) -> Result<()> {
        let message = decode_message(line).unwrap().unwrap();
        app.handle_service_event(ServiceEvent::Message(message))
    }

    fn press(app: &mut App<Recorder>, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_terminal_event(Event::Key(KeyEvent::new(code, modifiers)))
            .unwrap();
    }

    #[test]
    fn test_start_sends_query() {
        let app = started();
        assert_eq!(app.service().sent.len(), 1);
        assert!(matches!(app.service().sent[0], ServiceRequest::Query { .. }));
        assert!(app.is_running());
    }

    #[test]
    fn test_escape_and_ctrl_c_close() {
        let mut app = started();
        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert!(!app.is_running());
        assert!(!app.palette().is_open());

        let mut app = started();
        press(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!app.is_running());

        let (invocation, _) = app.finish();
        assert!(invocation.is_none());
    }

    #[test]
    fn test_completed_invocation_is_kept() {
        let mut app = started();
        receive(
            &mut app,
            r#"{"type":"catalog","id":1,"actions":{"quit":{"name":"quit","isInvocable":true}}}"#,
        )
        .unwrap();

        press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.service().sent.len(), 2);

        receive(&mut app, r#"{"type":"response","id":2,"argumentRequests":[]}"#).unwrap();
        assert!(!app.is_running());
        let (invocation, _) = app.finish();
        assert_eq!(
            invocation,
            Some(Invocation {
                key: "quit".to_string(),
                args: Arguments::new(),
            })
        );
    }

    #[test]
    fn test_disconnect_while_running_is_an_error() {
        let mut app = started();
        assert!(app.handle_service_event(ServiceEvent::Disconnected).is_err());
        assert!(!app.is_running());
        // Reported once
        assert!(app.handle_service_event(ServiceEvent::Disconnected).is_ok());
    }
}
