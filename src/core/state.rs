//! # Application State
//!
//! Core business state for Moment. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn CompletionProvider>  // LLM provider
//! ├── session: Session              // theme + chat history
//! ├── phase: Phase                  // Idle / Submitting / Displaying
//! ├── status_message: String        // status bar text
//! ├── error: Option<String>         // last failure, shown until next action
//! ├── settings: CompletionSettings  // model, temperature, max tokens
//! └── system_prompt: String
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::config::{
    DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE, ResolvedConfig,
};
use crate::core::prompt::SYSTEM_PROMPT;
use crate::core::session::Session;
use crate::inference::CompletionProvider;

/// Where the session is in the submit → display cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Submitting,
    Displaying,
}

/// Fixed parameters for every completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

pub struct App {
    pub provider: Arc<dyn CompletionProvider>,
    pub session: Session,
    pub phase: Phase,
    pub status_message: String,
    pub error: Option<String>,
    pub settings: CompletionSettings,
    pub system_prompt: String,
    /// Goal of the request in flight; becomes the chat title on success.
    pub pending_goal: Option<String>,
}

impl App {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            session: Session::new(),
            phase: Phase::Idle,
            status_message: String::from("Decide the best next action — right now."),
            error: None,
            settings: CompletionSettings::default(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            pending_goal: None,
        }
    }

    pub fn from_config(provider: Arc<dyn CompletionProvider>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(provider);
        app.session = Session::with_theme(config.theme);
        app.settings = CompletionSettings {
            model_name: config.model_name.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        };
        app.system_prompt = config.system_prompt.clone();
        app
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Submitting
    }
}
