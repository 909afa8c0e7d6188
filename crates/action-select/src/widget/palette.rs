//! Floating palette panel.

use crate::state::{ListGeometry, Palette};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, StatefulWidget, Widget};

const DEFAULT_PLACEHOLDER: &str = "Awaiting API…";
const DEFAULT_INPUT_PLACEHOLDER: &str = "Type to filter…";
const ACTIONS_TITLE: &str = "Actions";

/// Colors used by [`PaletteWidget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteStyle {
    pub border: Style,
    pub title: Style,
    pub prompt_marker: Style,
    pub input: Style,
    pub placeholder: Style,
    pub entry: Style,
    pub key: Style,
    pub selected: Style,
}

impl Default for PaletteStyle {
    fn default() -> Self {
        Self {
            border: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            prompt_marker: Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            input: Style::default().fg(Color::White),
            placeholder: Style::default().fg(Color::DarkGray),
            entry: Style::default(),
            key: Style::default().fg(Color::DarkGray),
            selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Renders a [`Palette`] as a centered floating panel.
///
/// The panel holds one input line followed by the visible entries, display
/// name on the left and key on the right. Rendering records the list
/// geometry into the palette for pointer hit-testing.
#[derive(Debug, Clone)]
pub struct PaletteWidget<'a> {
    style: PaletteStyle,
    width_percent: u16,
    height_percent: u16,
    placeholder: &'a str,
    input_placeholder: &'a str,
}

impl Default for PaletteWidget<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> PaletteWidget<'a> {
    pub fn new() -> Self {
        Self {
            style: PaletteStyle::default(),
            width_percent: 60,
            height_percent: 60,
            placeholder: DEFAULT_PLACEHOLDER,
            input_placeholder: DEFAULT_INPUT_PLACEHOLDER,
        }
    }

    pub fn style(mut self, style: PaletteStyle) -> Self {
        self.style = style;
        self
    }

    /// Panel size as a percentage of the render area (clamped to 10..=100).
    pub fn size_percent(mut self, width: u16, height: u16) -> Self {
        self.width_percent = width.clamp(10, 100);
        self.height_percent = height.clamp(10, 100);
        self
    }

    /// Text shown while the catalog has not arrived.
    pub fn placeholder(mut self, text: &'a str) -> Self {
        self.placeholder = text;
        self
    }

    /// Text shown in the input line while it is empty.
    pub fn input_placeholder(mut self, text: &'a str) -> Self {
        self.input_placeholder = text;
        self
    }

    fn render_input(&self, palette: &Palette, area: Rect, buf: &mut Buffer) {
        let text = if palette.input().is_empty() {
            Span::styled(self.input_placeholder, self.style.placeholder)
        } else {
            Span::styled(palette.input(), self.style.input)
        };
        Paragraph::new(Line::from(vec![
            Span::styled("> ", self.style.prompt_marker),
            text,
        ]))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(self.style.placeholder),
        )
        .render(area, buf);
    }

    fn render_entries(&self, palette: &mut Palette, area: Rect, buf: &mut Buffer) {
        let height = area.height as usize;
        let offset = centered_offset(palette.selected_index(), palette.list().visible_len(), height);

        for (row, entry) in palette
            .list()
            .visible()
            .skip(offset)
            .take(height)
            .enumerate()
        {
            let y = area.y + row as u16;
            let (line_style, key_style) = if entry.selected {
                (self.style.selected, self.style.selected)
            } else {
                (self.style.entry, self.style.key)
            };
            buf.set_style(Rect::new(area.x, y, area.width, 1), line_style);

            // Key takes precedence; the name is truncated to what is left
            let key_width = Span::raw(entry.key.as_str()).width() as u16;
            let key_x = area.x + area.width.saturating_sub(key_width);
            let name_width = key_x.saturating_sub(area.x).saturating_sub(1);
            buf.set_stringn(area.x, y, &entry.name, name_width as usize, line_style);
            if key_width < area.width {
                buf.set_stringn(key_x, y, &entry.key, key_width as usize, key_style);
            }
        }

        palette.set_geometry(ListGeometry { area, offset });
    }
}

impl StatefulWidget for PaletteWidget<'_> {
    type State = Palette;

    fn render(self, area: Rect, buf: &mut Buffer, palette: &mut Palette) {
        let panel = centered_panel(area, self.width_percent, self.height_percent);
        Clear.render(panel, buf);

        let title = palette.prompt().unwrap_or(ACTIONS_TITLE);
        let block = Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_style(self.style.border)
            .title_style(self.style.title);
        let inner = block.inner(panel);
        block.render(panel, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Input line and separator
                Constraint::Min(0),    // Entries
            ])
            .split(inner);

        self.render_input(palette, chunks[0], buf);

        if palette.is_loading() {
            Paragraph::new(Span::styled(self.placeholder, self.style.placeholder))
                .alignment(Alignment::Center)
                .render(chunks[1], buf);
            return;
        }
        self.render_entries(palette, chunks[1], buf);
    }
}

/// Panel of the given percentage size, centered in `area`.
pub fn centered_panel(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(width_percent.min(100)) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(height_percent.min(100)) / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// First visible index to draw so that `selected` sits in the middle of a
/// list of `height` rows, without scrolling past either end.
pub fn centered_offset(selected: Option<usize>, len: usize, height: usize) -> usize {
    if height == 0 || len <= height {
        return 0;
    }
    let selected = selected.unwrap_or(0);
    selected.saturating_sub(height / 2).min(len - height)
}
