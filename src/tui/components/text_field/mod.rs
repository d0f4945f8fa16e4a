//! # TextField Component
//!
//! A bordered, labelled text input used for the time and goal fields and
//! for the sidebar's chat search.
//!
//! Single-line fields flatten pasted newlines and never grow. Multi-line
//! fields accept `Ctrl+J` newlines, wrap, and scroll internally once the
//! content exceeds `max_lines`.
//!
//! The buffer is internal state; `focused` is a prop set by the parent.

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Styles;

use cursor::CursorState;
use text_wrap::{
    VERTICAL_OVERHEAD, flatten_newlines, inner_width, next_char_boundary, prev_char_boundary,
    wrap_line_count, wrap_options,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextFieldEvent {
    Changed,
    /// Enter pressed; the parent decides what that means.
    Enter,
}

pub struct TextField {
    buffer: String,
    label: &'static str,
    placeholder: &'static str,
    /// Prop: whether this field has keyboard focus.
    pub focused: bool,
    multiline: bool,
    max_lines: u16,
    cursor: CursorState,
}

impl TextField {
    pub fn single_line(label: &'static str, placeholder: &'static str) -> Self {
        Self {
            buffer: String::new(),
            label,
            placeholder,
            focused: false,
            multiline: false,
            max_lines: 1,
            cursor: CursorState::new(),
        }
    }

    pub fn multi_line(label: &'static str, placeholder: &'static str, max_lines: u16) -> Self {
        Self {
            multiline: true,
            max_lines: max_lines.max(1),
            ..Self::single_line(label, placeholder)
        }
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Replace the contents and move the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = if self.multiline {
            text.to_string()
        } else {
            flatten_newlines(text)
        };
        self.cursor.pos = self.buffer.len();
    }

    #[cfg(test)]
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor.reset();
    }

    /// Rendered height for `content_width`, in `[1, max_lines]` lines plus borders.
    pub fn calculate_height(&self, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        let content_lines = wrap_line_count(&self.buffer, width);
        content_lines.min(self.max_lines) + VERTICAL_OVERHEAD
    }

    fn visible_lines(&self, content_width: u16) -> Vec<String> {
        let width = inner_width(content_width);
        if width == 0 {
            return Vec::new();
        }
        let lines = textwrap::wrap(&self.buffer, wrap_options(width));
        let start = (self.cursor.scroll_offset as usize).min(lines.len());
        let end = (start + self.max_lines as usize).min(lines.len());
        lines[start..end].iter().map(|l| l.to_string()).collect()
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
    }
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect, styles: &Styles) {
        self.cursor.last_content_width = area.width;
        self.cursor
            .update_scroll_offset(&self.buffer, area.width, self.max_lines);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(styles.border_for(self.focused))
            .padding(Padding::horizontal(1))
            .title(Span::styled(format!(" {} ", self.label), styles.muted()))
            .style(styles.card());

        let lines: Vec<Line> = if self.buffer.is_empty() {
            vec![Line::from(Span::styled(self.placeholder, styles.muted()))]
        } else {
            self.visible_lines(area.width)
                .into_iter()
                .map(|l| Line::from(Span::styled(l, styles.text())))
                .collect()
        };

        frame.render_widget(Paragraph::new(lines).block(block), area);

        if self.focused {
            frame.set_cursor_position(self.cursor.screen_pos(&self.buffer, area));
        }
    }
}

impl EventHandler for TextField {
    type Event = TextFieldEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar('\n') if !self.multiline => None,
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor.pos, *c);
                self.cursor.pos += c.len_utf8();
                Some(TextFieldEvent::Changed)
            }
            TuiEvent::Paste(text) => {
                let text = if self.multiline {
                    text.replace("\r\n", "\n")
                } else {
                    flatten_newlines(text)
                };
                self.insert_str(&text);
                Some(TextFieldEvent::Changed)
            }
            TuiEvent::Backspace => (self.cursor.pos > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(prev..self.cursor.pos);
                self.cursor.pos = prev;
                TextFieldEvent::Changed
            }),
            TuiEvent::Delete => (self.cursor.pos < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor.pos);
                self.buffer.drain(self.cursor.pos..next);
                TextFieldEvent::Changed
            }),
            TuiEvent::CursorLeft => (self.cursor.pos > 0).then(|| {
                self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                TextFieldEvent::Changed
            }),
            TuiEvent::CursorRight => (self.cursor.pos < self.buffer.len()).then(|| {
                self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                TextFieldEvent::Changed
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor.pos]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor.pos != line_start).then(|| {
                    self.cursor.pos = line_start;
                    TextFieldEvent::Changed
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor.pos..]
                    .find('\n')
                    .map(|i| self.cursor.pos + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor.pos != line_end).then(|| {
                    self.cursor.pos = line_end;
                    TextFieldEvent::Changed
                })
            }
            TuiEvent::CursorUp if self.multiline => self
                .cursor
                .move_vertically(&self.buffer, -1, self.cursor.last_content_width)
                .then_some(TextFieldEvent::Changed),
            TuiEvent::CursorDown if self.multiline => self
                .cursor
                .move_vertically(&self.buffer, 1, self.cursor.last_content_width)
                .then_some(TextFieldEvent::Changed),
            TuiEvent::Submit => Some(TextFieldEvent::Enter),
            _ => None,
        }
    }
}
