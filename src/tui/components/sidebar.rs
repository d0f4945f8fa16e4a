//! # Sidebar Component
//!
//! Left column: brand, "New chat" button, chat search, the recent chats
//! list and the dark mode toggle.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` (search text, list selection) lives in `TuiState`
//! - `Sidebar` is created each frame with borrowed state and session props
//!
//! The list shows only chats matching the search query. `matches` holds
//! indices into the session's chat list, so selecting a row yields the
//! index `SelectChat` expects.

use chrono::{DateTime, Local, Utc};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::session::ChatRecord;
use crate::core::theme::Theme;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::TextField;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Styles;

/// Sidebar width in columns.
pub const SIDEBAR_WIDTH: u16 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarFocus {
    Search,
    Chats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarEvent {
    /// Open the chat at this index in the session.
    Open(usize),
}

pub struct SidebarState {
    pub search: TextField,
    /// Row in the filtered list
    pub selected: usize,
    pub list_state: ListState,
    /// Prop
    pub focus: Option<SidebarFocus>,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self::new()
    }
}

impl SidebarState {
    pub fn new() -> Self {
        Self {
            search: TextField::single_line("Search chats", "Type to filter  (Ctrl+F)"),
            selected: 0,
            list_state: ListState::default(),
            focus: None,
        }
    }

    pub fn query(&self) -> &str {
        self.search.text()
    }

    /// Keep the selection inside a list of `len` rows.
    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    /// Handle an event against the current filtered list.
    pub fn handle_event(&mut self, event: &TuiEvent, matches: &[usize]) -> Option<SidebarEvent> {
        let focus = self.focus?;
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.clamp(matches.len());
                None
            }
            TuiEvent::CursorDown => {
                self.selected = self.selected.saturating_add(1);
                self.clamp(matches.len());
                None
            }
            TuiEvent::Submit => matches.get(self.selected).copied().map(SidebarEvent::Open),
            _ if focus == SidebarFocus::Search => {
                if self.search.handle_event(event).is_some() {
                    // New query, new list
                    self.selected = 0;
                }
                None
            }
            _ => None,
        }
    }
}

pub struct Sidebar<'a> {
    state: &'a mut SidebarState,
    chats: &'a [ChatRecord],
    matches: &'a [usize],
    active_chat: Option<usize>,
    theme: Theme,
}

impl<'a> Sidebar<'a> {
    pub fn new(
        state: &'a mut SidebarState,
        chats: &'a [ChatRecord],
        matches: &'a [usize],
        active_chat: Option<usize>,
        theme: Theme,
    ) -> Self {
        Self {
            state,
            chats,
            matches,
            active_chat,
            theme,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, styles: &Styles) {
        let block = Block::default()
            .style(styles.sidebar())
            .padding(Padding::new(1, 1, 1, 0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [brand, tagline, _, new_chat, _, search, recent, list, toggle] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .areas(inner);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("◉ ", styles.text()),
                Span::styled("Moment", styles.heading()),
                Span::styled(" 1.0", styles.muted()),
            ])),
            brand,
        );
        frame.render_widget(
            Paragraph::new(Span::styled("Decide what to do now", styles.muted())),
            tagline,
        );

        let label = format!("{:<width$}", " ＋ New chat", width = (new_chat.width as usize).saturating_sub(8));
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(label, styles.primary_button()),
                Span::styled(" Ctrl+N ", styles.primary_button()),
            ])),
            new_chat,
        );

        self.state.search.focused = self.state.focus == Some(SidebarFocus::Search);
        self.state.search.render(frame, search, styles);

        frame.render_widget(
            Paragraph::new(Span::styled("Recent", styles.muted())),
            recent,
        );
        self.render_list(frame, list, styles);
        self.render_toggle(frame, toggle, styles);
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect, styles: &Styles) {
        if self.matches.is_empty() {
            let message = if self.chats.is_empty() {
                "No chats yet"
            } else {
                "No matching chats"
            };
            frame.render_widget(
                Paragraph::new(Span::styled(message, styles.muted())),
                area,
            );
            return;
        }

        self.state.clamp(self.matches.len());
        let list_focused = self.state.focus == Some(SidebarFocus::Chats)
            || self.state.focus == Some(SidebarFocus::Search);

        let items: Vec<ListItem> = self
            .matches
            .iter()
            .enumerate()
            .filter_map(|(row, &index)| self.chats.get(index).map(|chat| (row, index, chat)))
            .map(|(row, index, chat)| {
                let date = format_timestamp(chat.created_at);
                let title_width = (area.width as usize).saturating_sub(date.len() + 3);
                let title = truncate_str(chat.display_title(), title_width);
                let pad = title_width.saturating_sub(title.width());
                let marker = if self.active_chat == Some(index) {
                    "▌"
                } else {
                    " "
                };
                let style = if list_focused && row == self.state.selected {
                    styles.selected()
                } else if self.active_chat == Some(index) {
                    styles.heading()
                } else {
                    styles.text()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, styles.text()),
                    Span::styled(format!("{}{}", title, " ".repeat(pad)), style),
                    Span::styled(format!(" {}", date), styles.muted()),
                ]))
            })
            .collect();

        frame.render_stateful_widget(List::new(items), area, &mut self.state.list_state);
    }

    fn render_toggle(&self, frame: &mut Frame, area: Rect, styles: &Styles) {
        let (icon, switch) = if self.theme.is_dark() {
            ("☾", "● on ")
        } else {
            ("☀", "○ off")
        };
        let line = Line::from(vec![
            Span::styled(format!("{icon} Dark mode "), styles.text()),
            Span::styled(switch, styles.heading()),
            Span::styled("  Ctrl+T", styles.muted()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// "Jan 15" in local time.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%b %d").to_string()
}

/// Truncate to `max_width` display columns, ending in "…" when cut.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
