//! # Session State
//!
//! Everything one user's visit owns: the theme, the list of past decisions
//! ("chats") and which one is on screen.
//!
//! Lives for the lifetime of the process and is never written to disk.
//! `chats` is append-only; `active_chat` is only ever set to an index that
//! exists, so readers never have to bounds-check it.

use chrono::{DateTime, Utc};
use log::debug;

use crate::core::theme::Theme;

/// Maximum title length, in characters.
pub const TITLE_MAX_CHARS: usize = 50;

/// Title shown for a record whose goal produced no title text.
pub const UNTITLED: &str = "Untitled decision";

/// Author of a stored message. Only model answers are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// One stored decision: a goal-derived title plus the model's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRecord {
    pub title: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
}

impl ChatRecord {
    /// Title for display, falling back to [`UNTITLED`].
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    /// The recommendation text (first message).
    pub fn response(&self) -> Option<&str> {
        self.messages.first().map(|m| m.content.as_str())
    }
}

/// Truncate a goal to at most [`TITLE_MAX_CHARS`] characters.
pub fn derive_title(goal: &str) -> String {
    goal.chars().take(TITLE_MAX_CHARS).collect()
}

#[derive(Debug)]
pub struct Session {
    pub id: String,
    theme: Theme,
    chats: Vec<ChatRecord>,
    active_chat: Option<usize>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_theme(Theme::Dark)
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            theme,
            chats: Vec::new(),
            active_chat: None,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn chats(&self) -> &[ChatRecord] {
        &self.chats
    }

    pub fn active_chat(&self) -> Option<usize> {
        self.active_chat
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        self.theme
    }

    /// Append a new record for `goal` and make it active. Returns its index.
    pub fn record(&mut self, goal: &str, response_text: String) -> usize {
        self.chats.push(ChatRecord {
            title: derive_title(goal),
            messages: vec![ChatMessage {
                role: Role::Assistant,
                content: response_text,
            }],
            created_at: Utc::now(),
        });
        let index = self.chats.len() - 1;
        self.active_chat = Some(index);
        debug!("Session {}: recorded chat #{}", self.id, index);
        index
    }

    /// Clear the active chat; history is kept.
    pub fn new_chat(&mut self) {
        self.active_chat = None;
    }

    /// Make chat `index` active. Returns false (and changes nothing) if out of range.
    pub fn select_chat(&mut self, index: usize) -> bool {
        if index < self.chats.len() {
            self.active_chat = Some(index);
            true
        } else {
            false
        }
    }

    pub fn active_record(&self) -> Option<&ChatRecord> {
        self.active_chat.and_then(|i| self.chats.get(i))
    }

    /// Text of the active chat's first message, if any chat is active.
    pub fn active_response(&self) -> Option<&str> {
        self.active_record().and_then(ChatRecord::response)
    }

    /// Indices of chats whose title contains `query`, case-insensitively.
    /// A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<usize> {
        let needle = query.trim().to_lowercase();
        self.chats
            .iter()
            .enumerate()
            .filter(|(_, chat)| needle.is_empty() || chat.title.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_defaults() {
        let session = Session::new();
        assert_eq!(session.theme(), Theme::Dark);
        assert!(session.chats().is_empty());
        assert_eq!(session.active_chat(), None);
        assert_eq!(session.active_response(), None);
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        assert_ne!(Session::new().id, Session::new().id);
    }

    #[test]
    fn test_toggle_theme_twice_restores() {
        let mut session = Session::new();
        assert_eq!(session.toggle_theme(), Theme::Light);
        assert_eq!(session.toggle_theme(), Theme::Dark);
    }

    #[test]
    fn test_record_appends_and_activates() {
        let mut session = Session::new();
        let index = session.record("Finish report", "Do X now".to_string());
        assert_eq!(index, 0);
        assert_eq!(session.active_chat(), Some(0));
        let chat = &session.chats()[0];
        assert_eq!(chat.title, "Finish report");
        assert_eq!(
            chat.messages,
            vec![ChatMessage {
                role: Role::Assistant,
                content: "Do X now".to_string()
            }]
        );

        session.record("Go for a run", "Run 5k".to_string());
        assert_eq!(session.chats().len(), 2);
        assert_eq!(session.active_chat(), Some(1));
        assert_eq!(session.chats()[0].title, "Finish report");
    }

    #[test]
    fn test_record_does_not_deduplicate() {
        let mut session = Session::new();
        session.record("Same", "a".to_string());
        session.record("Same", "a".to_string());
        assert_eq!(session.chats().len(), 2);
    }

    #[test]
    fn test_title_truncated_to_fifty_chars() {
        let goal = "x".repeat(80);
        assert_eq!(derive_title(&goal).chars().count(), TITLE_MAX_CHARS);
        assert_eq!(derive_title("short"), "short");
    }

    #[test]
    fn test_title_truncation_respects_char_boundaries() {
        let goal = "é".repeat(60);
        let title = derive_title(&goal);
        assert_eq!(title.chars().count(), 50);
        assert_eq!(title.len(), 100);
    }

    #[test]
    fn test_new_chat_keeps_history() {
        let mut session = Session::new();
        session.record("a", "1".to_string());
        session.new_chat();
        assert_eq!(session.active_chat(), None);
        assert_eq!(session.chats().len(), 1);
    }

    #[test]
    fn test_select_chat_in_range() {
        let mut session = Session::new();
        session.record("a", "first".to_string());
        session.record("b", "second".to_string());
        assert!(session.select_chat(0));
        assert_eq!(session.active_chat(), Some(0));
        assert_eq!(session.active_response(), Some("first"));
    }

    #[test]
    fn test_select_chat_out_of_range_is_ignored() {
        let mut session = Session::new();
        session.record("a", "first".to_string());
        session.new_chat();
        assert!(!session.select_chat(1));
        assert_eq!(session.active_chat(), None);
    }

    #[test]
    fn test_display_title_falls_back() {
        let record = ChatRecord {
            title: "   ".to_string(),
            messages: vec![],
            created_at: Utc::now(),
        };
        assert_eq!(record.display_title(), UNTITLED);
        assert_eq!(record.response(), None);
    }

    #[test]
    fn test_search_filters_case_insensitively() {
        let mut session = Session::new();
        session.record("Finish REPORT", "1".to_string());
        session.record("Go running", "2".to_string());
        session.record("report review", "3".to_string());
        assert_eq!(session.search("report"), vec![0, 2]);
        assert_eq!(session.search(""), vec![0, 1, 2]);
        assert_eq!(session.search("  "), vec![0, 1, 2]);
        assert!(session.search("nothing").is_empty());
    }
}
