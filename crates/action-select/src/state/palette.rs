//! The palette controller.

use super::{
    EntryRef, FilterQuery, FlowState, FlowStep, InvocationContext, PendingRequests, RequestKind,
    SelectionList,
};
use crate::action::PaletteAction;
use crate::event::PaletteEvent;
use crate::model::{Catalog, Entry};
use crate::protocol::{ArgumentRequest, ServiceMessage, ServiceRequest};
use ratatui::layout::{Position, Rect};

/// Number of choices offered for numeric parameters: `"0"` through `"31"`.
pub const NUMERIC_CHOICES: usize = 32;

/// Where the last render placed the entry rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListGeometry {
    /// Screen area holding one entry per row.
    pub area: Rect,
    /// Visible index of the entry drawn in the first row.
    pub offset: usize,
}

impl ListGeometry {
    /// Visible index of the row under a screen cell, if inside the list area.
    pub fn visible_index_at(&self, column: u16, row: u16) -> Option<usize> {
        if !self.area.contains(Position::new(column, row)) {
            return None;
        }
        Some(self.offset + usize::from(row - self.area.y))
    }
}

/// Command palette controller, one per mounted panel.
///
/// Owns the selection list, the input text, the invocation flow and the
/// pending request table. All mutation happens through
/// [`Palette::handle_action`] and [`Palette::handle_message`].
#[derive(Debug, Clone, Default)]
pub struct Palette {
    list: SelectionList,
    input: String,
    catalog: Option<Catalog>,
    flow: FlowState,
    pending: PendingRequests,
    open: bool,
    geometry: Option<ListGeometry>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the panel and request the catalog.
    pub fn mount(&mut self) -> Vec<PaletteEvent> {
        self.open = true;
        self.flow = FlowState::ChoosingAction;
        let id = self.pending.register(RequestKind::Query);
        log::info!("Palette mounted, querying catalog ({})", id);
        vec![PaletteEvent::Send(ServiceRequest::Query { id })]
    }

    pub fn list(&self) -> &SelectionList {
        &self.list
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn flow(&self) -> &FlowState {
        &self.flow
    }

    pub fn pending(&self) -> &PendingRequests {
        &self.pending
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Still waiting for the first usable catalog.
    pub fn is_loading(&self) -> bool {
        self.catalog.is_none() && matches!(self.flow, FlowState::ChoosingAction)
    }

    /// Parameter currently being prompted for, if any.
    pub fn prompt(&self) -> Option<&str> {
        self.flow.param()
    }

    /// Visible index of the selected entry.
    pub fn selected_index(&self) -> Option<usize> {
        self.list.index_of(EntryRef::Selected)
    }

    pub fn geometry(&self) -> Option<ListGeometry> {
        self.geometry
    }

    /// Record where the entry rows were drawn (called by the widget).
    pub fn set_geometry(&mut self, geometry: ListGeometry) {
        self.geometry = Some(geometry);
    }

    /// Process an action and return the resulting events.
    pub fn handle_action(&mut self, action: PaletteAction) -> Vec<PaletteEvent> {
        let mut events = Vec::new();
        if !self.open {
            log::debug!("Palette closed, ignoring {:?}", action);
            return events;
        }

        match action {
            PaletteAction::SelectNext => self.navigate(1, &mut events),
            PaletteAction::SelectPrevious => self.navigate(-1, &mut events),
            PaletteAction::SelectAt(index) => self.select_at(index, &mut events),
            PaletteAction::Submit => self.submit(None, &mut events),
            PaletteAction::SubmitVisible(index) => {
                if index < self.list.visible_len() {
                    self.submit(Some(index), &mut events);
                }
            }
            PaletteAction::InsertChar(c) => {
                self.input.push(c);
                self.text_changed(&mut events);
            }
            PaletteAction::DeleteChar => {
                if self.input.pop().is_some() {
                    self.text_changed(&mut events);
                }
            }
            PaletteAction::ClearInput => {
                if !self.input.is_empty() {
                    self.input.clear();
                    self.text_changed(&mut events);
                }
            }
            PaletteAction::SetInput(text) => {
                self.input = text;
                self.text_changed(&mut events);
            }
            PaletteAction::Close => self.close(&mut events),
        }

        events
    }

    /// Process a message from the action service.
    pub fn handle_message(&mut self, message: ServiceMessage) -> Vec<PaletteEvent> {
        let mut events = Vec::new();
        if !self.open {
            log::debug!("Palette closed, ignoring {} message", message.type_name());
            return events;
        }

        if let ServiceMessage::Catalog { actions, .. } = &message {
            if actions.is_empty() {
                // Not available yet; the query stays pending
                log::debug!("Catalog for {} is empty, still awaiting", message.id());
                return events;
            }
        }
        if !self.pending.resolve(&message) {
            return events;
        }

        match message {
            ServiceMessage::Catalog { actions, .. } => self.show_actions(actions, &mut events),
            ServiceMessage::Response {
                id,
                argument_requests,
            } => {
                let argument = argument_requests.into_iter().next().flatten();
                match self.flow.respond(id, argument) {
                    FlowStep::Ignored => {
                        log::debug!("Response {} does not belong to the current flow", id);
                    }
                    FlowStep::Complete(InvocationContext { key, args }) => {
                        log::info!("Invocation of '{}' complete", key);
                        events.push(PaletteEvent::InvocationComplete { key, args });
                        self.close(&mut events);
                    }
                    FlowStep::Prompt(argument) => {
                        self.show_argument_choices(&argument, &mut events)
                    }
                }
            }
        }

        events
    }

    fn select_at(&mut self, index: isize, events: &mut Vec<PaletteEvent>) {
        if let Some(visible_index) = self.list.select_at(index) {
            events.push(PaletteEvent::ScrollIntoView { visible_index });
        }
    }

    fn navigate(&mut self, delta: isize, events: &mut Vec<PaletteEvent>) {
        let count = self.list.visible_len() as isize;
        if count == 0 {
            return;
        }
        let current = self.selected_index().map_or(-1, |index| index as isize);
        self.select_at((count + current + delta) % count, events);
    }

    fn submit(&mut self, target: Option<usize>, events: &mut Vec<PaletteEvent>) {
        if let Some(visible_index) = target {
            self.select_at(visible_index as isize, events);
        }

        let Some(entry) = self.list.selected() else {
            log::debug!("Nothing selected, ignoring submit");
            return;
        };
        if self.pending.has_pending(RequestKind::Invocation) {
            log::debug!("Invocation already in flight, ignoring submit");
            return;
        }
        let Some(context) = self.flow.prepare(entry) else {
            log::debug!("Cannot submit while {:?}", self.flow);
            return;
        };

        let id = self.pending.register(RequestKind::Invocation);
        self.flow.dispatch(id, context.clone());
        events.push(PaletteEvent::Send(ServiceRequest::Invocation {
            id,
            key: context.key,
            args: context.args,
        }));
    }

    fn text_changed(&mut self, events: &mut Vec<PaletteEvent>) {
        if self.input.is_empty() {
            self.list.clear_filter();
            self.select_at(0, events);
            return;
        }

        let visible = self.list.mark_filtered(&FilterQuery::parse(&self.input));
        self.select_at(0, events);
        if visible == 1 {
            log::debug!("Filter '{}' left a single entry, submitting", self.input);
            self.submit(None, events);
        }
    }

    /// Only the mount query is answered with a catalog, so the flow is still
    /// choosing an action here. Text typed while loading filters the result.
    fn show_actions(&mut self, catalog: Catalog, events: &mut Vec<PaletteEvent>) {
        let entries: Vec<Entry> = catalog
            .flatten()
            .iter()
            .map(|path| Entry::render(path.to_string(), "", Some(&catalog)))
            .collect();
        log::info!("Catalog loaded with {} actions", entries.len());

        self.list.replace(entries);
        self.catalog = Some(catalog);
        if self.input.is_empty() {
            self.select_at(0, events);
        } else {
            self.text_changed(events);
        }
    }

    fn show_argument_choices(&mut self, argument: &ArgumentRequest, events: &mut Vec<PaletteEvent>) {
        log::debug!(
            "Prompting for '{}' ({}, {} presets)",
            argument.param,
            argument.info.kind,
            argument.info.presets.len()
        );

        let mut entries = Vec::new();
        if argument.info.is_number() {
            entries.extend((0..NUMERIC_CHOICES).map(|value| {
                let value = value.to_string();
                Entry::render(value.clone(), &value, None).with_payload(value)
            }));
        }
        entries.extend(argument.info.presets.iter().map(|preset| {
            Entry::render(preset.id.clone(), preset.label(), None).with_payload(preset.id.clone())
        }));

        self.list.replace(entries);
        self.input.clear();
        self.list.clear_filter();
        self.select_at(0, events);
    }

    fn close(&mut self, events: &mut Vec<PaletteEvent>) {
        if !self.open {
            return;
        }
        log::info!("Palette closed");
        self.open = false;
        self.flow = FlowState::Idle;
        self.pending.clear();
        events.push(PaletteEvent::Closed);
    }
}
