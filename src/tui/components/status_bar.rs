//! # StatusBar Component
//!
//! Bottom line showing the provider and model, the current status, any
//! request error, and the key hints.
//!
//! Stateless: every field is a prop copied from `App` before rendering.
//! An error takes the place of the status message until it is dismissed.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme::Styles;

const KEY_HINTS: &str = "Tab move · Ctrl+S decide · Ctrl+N new · Ctrl+T theme · Ctrl+C quit ";

pub struct StatusBar {
    pub provider_name: String,
    pub model_name: String,
    pub status_message: String,
    pub error: Option<String>,
}

impl StatusBar {
    pub fn new(provider_name: String, model_name: String, status_message: String) -> Self {
        Self {
            provider_name,
            model_name,
            status_message,
            error: None,
        }
    }

    fn left_line(&self, styles: &Styles) -> Line<'_> {
        let mut spans = vec![Span::styled(
            format!(" {} · {}", self.provider_name, self.model_name),
            styles.muted(),
        )];
        if let Some(error) = &self.error {
            spans.push(Span::styled(" | ", styles.muted()));
            spans.push(Span::styled(format!("Error: {} (Esc)", error), styles.error()));
        } else if !self.status_message.is_empty() {
            spans.push(Span::styled(" | ", styles.muted()));
            spans.push(Span::styled(self.status_message.as_str(), styles.text()));
        }
        Line::from(spans)
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect, styles: &Styles) {
        let hints_width = (KEY_HINTS.chars().count() as u16).min(area.width / 2);
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(hints_width)]).areas(area);

        frame.render_widget(
            Paragraph::new(self.left_line(styles)).style(styles.page()),
            left,
        );
        frame.render_widget(
            Paragraph::new(Span::styled(KEY_HINTS, styles.muted()))
                .right_aligned()
                .style(styles.page()),
            right,
        );
    }
}
