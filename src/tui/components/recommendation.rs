//! # Recommendation Component
//!
//! The "Do this now" card. Shows, in priority order: a spinner while a
//! request is in flight, the last request error, the active chat's answer
//! rendered as markdown, or a hint when nothing has been decided yet.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `RecommendationState` (scroll position) lives in `TuiState`
//! - `Recommendation` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;
use crate::tui::markdown;
use crate::tui::theme::Styles;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// What the card should show this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardContent<'a> {
    Empty,
    Loading { spinner_frame: usize },
    Error(&'a str),
    Answer { chat: usize, text: &'a str },
}

pub struct RecommendationState {
    pub scroll_state: ScrollViewState,
    /// Chat the scroll position belongs to; a different chat starts at the top.
    shown_chat: Option<usize>,
}

impl Default for RecommendationState {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            shown_chat: None,
        }
    }

    fn follow(&mut self, chat: Option<usize>) {
        if self.shown_chat != chat {
            self.scroll_state.scroll_to_top();
            self.shown_chat = chat;
        }
    }
}

impl EventHandler for RecommendationState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            _ => {}
        }
        None
    }
}

pub struct Recommendation<'a> {
    state: &'a mut RecommendationState,
    content: CardContent<'a>,
}

impl<'a> Recommendation<'a> {
    pub fn new(state: &'a mut RecommendationState, content: CardContent<'a>) -> Self {
        Self { state, content }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, styles: &Styles) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(styles.unfocused_border())
            .padding(Padding::horizontal(1))
            .title(Span::styled(" Do this now ", styles.heading()))
            .style(styles.card());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match self.content {
            CardContent::Empty => {
                self.state.follow(None);
                let hint = Paragraph::new(Line::from(Span::styled(
                    "Fill in the form and press \"Make the decision\".",
                    styles.muted(),
                )))
                .wrap(Wrap { trim: true });
                frame.render_widget(hint, inner);
            }
            CardContent::Loading { spinner_frame } => {
                let glyph = SPINNER[spinner_frame % SPINNER.len()];
                let line = Line::from(vec![
                    Span::styled(format!("{glyph} "), styles.text()),
                    Span::styled("Thinking…", styles.muted()),
                ]);
                frame.render_widget(Paragraph::new(line), inner);
            }
            CardContent::Error(message) => {
                let text = Text::from(vec![
                    Line::from(Span::styled("Couldn't get a decision.", styles.error())),
                    Line::default(),
                    Line::from(Span::styled(message.to_string(), styles.text())),
                    Line::default(),
                    Line::from(Span::styled(
                        "Esc to dismiss, then try again.",
                        styles.muted(),
                    )),
                ]);
                frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
            }
            CardContent::Answer { chat, text } => {
                self.state.follow(Some(chat));
                render_answer(frame, inner, text, styles, &mut self.state.scroll_state);
            }
        }
    }
}

fn render_answer(
    frame: &mut Frame,
    area: Rect,
    text: &str,
    styles: &Styles,
    scroll_state: &mut ScrollViewState,
) {
    // -1 column for the scrollbar
    let content_width = area.width.saturating_sub(1);
    if content_width == 0 || area.height == 0 {
        return;
    }
    let paragraph = Paragraph::new(markdown::render(text.trim(), styles))
        .style(styles.card())
        .wrap(Wrap { trim: false });
    let height = (paragraph.line_count(content_width) as u16).max(1);

    let mut scroll_view = ScrollView::new(Size::new(content_width, height))
        .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
        .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
    scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, height));
    frame.render_stateful_widget(scroll_view, area, scroll_state);
}
