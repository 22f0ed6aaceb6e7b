//! UI widgets for the running log.

use std::collections::HashSet;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::data::{Entry, Stats};
use super::theme::Theme;

/// Entry form field that receives typed characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Day,
    Distance,
}

impl FormField {
    pub fn toggle(self) -> Self {
        match self {
            FormField::Day => FormField::Distance,
            FormField::Distance => FormField::Day,
        }
    }
}

/// Text typed into the entry form
#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    pub day: String,
    pub distance: String,
    pub active: FormField,
}

impl EntryForm {
    pub fn push(&mut self, c: char) {
        self.active_text().push(c);
    }

    pub fn backspace(&mut self) {
        self.active_text().pop();
    }

    pub fn reset(&mut self) {
        *self = EntryForm::default();
    }

    fn active_text(&mut self) -> &mut String {
        match self.active {
            FormField::Day => &mut self.day,
            FormField::Distance => &mut self.distance,
        }
    }
}

/// Entry form panel widget
pub struct EntryFormPanel<'a> {
    form: &'a EntryForm,
    theme: &'a Theme,
}

impl<'a> EntryFormPanel<'a> {
    pub fn new(form: &'a EntryForm, theme: &'a Theme) -> Self {
        EntryFormPanel { form, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let (border_style, title_style) = self.theme.panel_styles(focused);
        let block = Block::default()
            .title(" Add run ")
            .borders(Borders::ALL)
            .border_type(if focused {
                BorderType::Double
            } else {
                BorderType::Plain
            })
            .border_style(border_style)
            .title_style(title_style);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(inner);

        let field = |label: &'static str, value: &str, which: FormField| {
            let active = focused && self.form.active == which;
            let style = if active {
                self.theme.highlight_style()
            } else {
                self.theme.normal_style()
            };
            let cursor = if active { "_" } else { "" };
            Paragraph::new(Line::from(vec![
                Span::styled(label, self.theme.dimmed_title_style()),
                Span::styled(format!("{value}{cursor}"), style),
            ]))
        };

        frame.render_widget(field("Day: ", &self.form.day, FormField::Day), columns[0]);
        frame.render_widget(
            field("Distance (km): ", &self.form.distance, FormField::Distance),
            columns[1],
        );
    }
}

/// Table of entries with a cursor row and marked rows
pub struct EntryTable<'a> {
    entries: &'a [Entry],
    cursor: usize,
    marked: &'a HashSet<usize>,
    theme: &'a Theme,
}

impl<'a> EntryTable<'a> {
    pub fn new(
        entries: &'a [Entry],
        cursor: usize,
        marked: &'a HashSet<usize>,
        theme: &'a Theme,
    ) -> Self {
        EntryTable {
            entries,
            cursor,
            marked,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let rows: Vec<Row> = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, e)| {
                let prefix = if self.marked.contains(&idx) { "* " } else { "  " };
                let row = Row::new(vec![
                    Cell::from(format!("{prefix}{}", e.day)),
                    Cell::from(format!("{:>12.2}", e.distance)),
                ]);
                if self.marked.contains(&idx) {
                    row.style(self.theme.marked_style())
                } else {
                    row
                }
            })
            .collect();

        let (border_style, title_style) = self.theme.panel_styles(focused);
        let block = Block::default()
            .title(format!(" Runs ({}) ", self.entries.len()))
            .borders(Borders::ALL)
            .border_type(if focused {
                BorderType::Double
            } else {
                BorderType::Plain
            })
            .border_style(border_style)
            .title_style(title_style);

        let header = Row::new(vec![Cell::from("  Day"), Cell::from("Distance (km)")])
            .style(self.theme.title_style());

        let table = Table::new(rows, [Constraint::Length(12), Constraint::Length(14)])
            .header(header)
            .block(block)
            .row_highlight_style(self.theme.highlight_style())
            .highlight_symbol("> ");

        let mut state = TableState::default();
        if !self.entries.is_empty() {
            state.select(Some(self.cursor));
        }
        frame.render_stateful_widget(table, area, &mut state);
    }
}

/// Transient message shown in the status bar
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    /// Local time the message was raised, `HH:MM:SS`
    pub at: String,
}

/// Status bar widget
pub struct StatusBar<'a> {
    count: usize,
    stats: Option<&'a Stats>,
    message: Option<&'a StatusMessage>,
    confirm_overwrite: bool,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        count: usize,
        stats: Option<&'a Stats>,
        message: Option<&'a StatusMessage>,
        confirm_overwrite: bool,
        theme: &'a Theme,
    ) -> Self {
        StatusBar {
            count,
            stats,
            message,
            confirm_overwrite,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw(format!("{} entries", self.count))];
        if let Some(stats) = self.stats {
            spans.push(Span::raw(" | "));
            spans.push(Span::raw(stats.short_line()));
        }
        let ask = if self.confirm_overwrite { "on" } else { "off" };
        spans.push(Span::styled(
            format!(" | ask before overwrite: {ask} | [?] Help [q] Quit"),
            self.theme.dimmed_title_style(),
        ));

        let mut lines = vec![Line::from(spans)];
        if let Some(msg) = self.message {
            let label = if msg.is_error { "Error" } else { "Info" };
            lines.push(Line::from(Span::styled(
                format!("[{}] {label}: {}", msg.at, msg.text),
                self.theme.message_style(msg.is_error),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .style(Style::default())
            .block(Block::default().borders(Borders::TOP));

        frame.render_widget(paragraph, area);
    }
}
