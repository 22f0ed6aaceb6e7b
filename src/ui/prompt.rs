//! Popup dialogs: file path prompt and yes/no confirmation.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::help::centered_rect;
use super::theme::Theme;

/// Popup asking for a file path
pub struct PathPrompt<'a> {
    title: &'a str,
    input: &'a str,
    theme: &'a Theme,
}

impl<'a> PathPrompt<'a> {
    pub fn new(title: &'a str, input: &'a str, theme: &'a Theme) -> Self {
        PathPrompt {
            title,
            input,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(70, 25, area);
        frame.render_widget(Clear, popup_area);

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Path: ", self.theme.dimmed_title_style()),
                Span::styled(format!("{}_", self.input), self.theme.highlight_style()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  [Enter] Confirm  [Esc] Cancel",
                self.theme.dimmed_title_style(),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(format!(" {} ", self.title))
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(self.theme.focused_border_style())
                    .title_style(self.theme.title_style())
                    .style(self.theme.surface_style()),
            )
            .wrap(Wrap { trim: false })
            .style(self.theme.surface_style());

        frame.render_widget(paragraph, popup_area);
    }
}

/// Popup asking a yes/no question
pub struct ConfirmDialog<'a> {
    question: &'a str,
    theme: &'a Theme,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(question: &'a str, theme: &'a Theme) -> Self {
        ConfirmDialog { question, theme }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(50, 25, area);
        frame.render_widget(Clear, popup_area);

        let lines = vec![
            Line::from(""),
            Line::from(self.question),
            Line::from(""),
            Line::from(Span::styled("[y] Yes  [n] No", self.theme.dimmed_title_style())),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .title(" Confirm ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(self.theme.focused_border_style())
                    .title_style(self.theme.title_style())
                    .style(self.theme.surface_style()),
            )
            .alignment(Alignment::Center)
            .style(self.theme.surface_style());

        frame.render_widget(paragraph, popup_area);
    }
}
