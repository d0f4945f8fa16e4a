//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Focus
//!
//! Tab / Shift+Tab move through the form fields, the decide button, the
//! chat search and the chat list. The sidebar stops are skipped while the
//! sidebar is hidden on a narrow terminal. Global shortcuts (Ctrl+S, Ctrl+N, Ctrl+T,
//! Ctrl+F, F2, Esc) work wherever focus is.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner turns.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
pub mod components;
mod event;
pub mod markdown;
pub mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::Provider;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::prompt::PromptPair;
use crate::core::state::{App, CompletionSettings};
use crate::inference::{
    CompletionProvider, CompletionRequest, GroqProvider, LmStudioProvider, ProviderError,
};
use crate::tui::component::EventHandler;
use crate::tui::components::form::time_label;
use crate::tui::components::{
    DecisionForm, FormEvent, FormField, RecommendationState, SidebarEvent, SidebarFocus,
    SidebarState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which part of the screen receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form(FormField),
    Sidebar(SidebarFocus),
}

impl Focus {
    const ORDER: [Focus; 7] = [
        Focus::Form(FormField::Time),
        Focus::Form(FormField::Energy),
        Focus::Form(FormField::MentalState),
        Focus::Form(FormField::Goal),
        Focus::Form(FormField::Decide),
        Focus::Sidebar(SidebarFocus::Search),
        Focus::Sidebar(SidebarFocus::Chats),
    ];

    /// Number of leading `ORDER` entries that belong to the form.
    const FORM_STOPS: usize = 5;

    /// The reachable prefix of `ORDER`; sidebar stops sit at the end.
    fn stops(sidebar_visible: bool) -> &'static [Focus] {
        if sidebar_visible {
            &Self::ORDER
        } else {
            &Self::ORDER[..Self::FORM_STOPS]
        }
    }

    fn position(self, stops: &[Focus]) -> usize {
        stops.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self, sidebar_visible: bool) -> Focus {
        let stops = Self::stops(sidebar_visible);
        stops[(self.position(stops) + 1) % stops.len()]
    }

    pub fn prev(self, sidebar_visible: bool) -> Focus {
        let stops = Self::stops(sidebar_visible);
        let len = stops.len();
        stops[(self.position(stops) + len - 1) % len]
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub form: DecisionForm,
    pub sidebar: SidebarState,
    pub recommendation: RecommendationState,
    pub focus: Focus,
    /// Whether the last frame had room for the sidebar.
    pub sidebar_visible: bool,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        let mut tui = Self {
            form: DecisionForm::new(),
            sidebar: SidebarState::new(),
            recommendation: RecommendationState::new(),
            focus: Focus::Form(FormField::Time),
            sidebar_visible: true,
        };
        tui.sync_focus();
        tui
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.sync_focus();
    }

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next(self.sidebar_visible));
    }

    pub fn focus_prev(&mut self) {
        self.set_focus(self.focus.prev(self.sidebar_visible));
    }

    /// Record whether the sidebar fits. Focus leaves it when it is hidden.
    pub fn set_sidebar_visible(&mut self, visible: bool) {
        self.sidebar_visible = visible;
        if !visible && matches!(self.focus, Focus::Sidebar(_)) {
            self.set_focus(Focus::Form(FormField::Time));
        }
    }

    /// Push the focus prop down into the components.
    fn sync_focus(&mut self) {
        let (form, sidebar) = match self.focus {
            Focus::Form(field) => (Some(field), None),
            Focus::Sidebar(part) => (None, Some(part)),
        };
        self.form.focus = form;
        self.sidebar.focus = sidebar;
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is harmlessly ignored by terminals without it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!(
            "Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)"
        );
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the completion provider selected by the resolved config.
pub fn build_provider(
    config: &ResolvedConfig,
) -> Result<Arc<dyn CompletionProvider>, ProviderError> {
    match config.provider {
        Provider::LmStudio => Ok(Arc::new(LmStudioProvider::new(
            Some(config.lmstudio_base_url.clone()),
            config.request_timeout,
        )?)),
        Provider::Groq => {
            let api_key = config.groq_api_key.clone().ok_or_else(|| {
                ProviderError::Config("Groq selected but no GROQ_API_KEY set".to_string())
            })?;
            Ok(Arc::new(GroqProvider::new(
                api_key,
                Some(config.groq_base_url.clone()),
                config.request_timeout,
            )?))
        }
    }
}

pub fn run(config: ResolvedConfig, provider: Arc<dyn CompletionProvider>) -> std::io::Result<()> {
    let mut app = App::from_config(provider, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Actions from background request tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true;

    loop {
        let animating = app.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain everything pending before the next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, event, &tx) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, action, &tx) {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }
    }

    info!(
        "Moment shutting down ({} chats this session)",
        app.session.chats().len()
    );
    ratatui::restore();
    Ok(())
}

/// Route one terminal event. Returns true when the app should quit.
fn handle_event(
    app: &mut App,
    tui: &mut TuiState,
    event: TuiEvent,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match event {
        // Resize just needs a redraw (already flagged)
        TuiEvent::Resize => false,
        TuiEvent::ForceQuit => dispatch(app, Action::Quit, tx),
        TuiEvent::NewChat => dispatch(app, Action::NewChat, tx),
        TuiEvent::ToggleTheme => dispatch(app, Action::ToggleTheme, tx),
        TuiEvent::Decide => dispatch(app, Action::Submit(tui.form.to_input()), tx),
        TuiEvent::FocusSearch => {
            if tui.sidebar_visible {
                tui.set_focus(Focus::Sidebar(SidebarFocus::Search));
            }
            false
        }
        TuiEvent::FillTime => {
            tui.form.set_time(&time_label(chrono::Local::now()));
            false
        }
        TuiEvent::FocusNext => {
            tui.focus_next();
            false
        }
        TuiEvent::FocusPrev => {
            tui.focus_prev();
            false
        }
        TuiEvent::Escape => {
            if app.error.is_some() {
                dispatch(app, Action::DismissError, tx)
            } else {
                false
            }
        }
        TuiEvent::ScrollUp | TuiEvent::ScrollDown => {
            tui.recommendation.handle_event(&event);
            false
        }
        _ => match tui.focus {
            Focus::Form(_) => match tui.form.handle_event(&event) {
                Some(FormEvent::Submit(input)) => dispatch(app, Action::Submit(input), tx),
                Some(FormEvent::Advance) => {
                    tui.focus_next();
                    false
                }
                None => false,
            },
            Focus::Sidebar(_) => {
                let matches = app.session.search(tui.sidebar.query());
                match tui.sidebar.handle_event(&event, &matches) {
                    Some(SidebarEvent::Open(index)) => dispatch(app, Action::SelectChat(index), tx),
                    None => false,
                }
            }
        },
    }
}

/// Apply an action and carry out its effect. Returns true on quit.
fn dispatch(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        Effect::SpawnRequest(prompts) => {
            spawn_request(app, prompts, tx.clone());
            false
        }
        Effect::None => false,
    }
}

fn spawn_request(app: &App, prompts: PromptPair, tx: mpsc::Sender<Action>) {
    info!("Spawning completion request via {}", app.provider.name());

    let provider = app.provider.clone();
    let settings = app.settings.clone();

    tokio::spawn(async move {
        let action = run_completion(provider.as_ref(), &settings, &prompts).await;
        if tx.send(action).is_err() {
            warn!("Failed to send completion result: receiver dropped");
        }
    });
}

/// Run one completion and turn the outcome into the action that reports it.
pub async fn run_completion(
    provider: &dyn CompletionProvider,
    settings: &CompletionSettings,
    prompts: &PromptPair,
) -> Action {
    let request = CompletionRequest {
        system_prompt: &prompts.system,
        user_prompt: &prompts.user,
        model: &settings.model_name,
        temperature: settings.temperature,
        max_tokens: settings.max_tokens,
    };
    let started = Instant::now();
    match provider.complete(request).await {
        Ok(completion) => {
            debug!(
                "Completion finished in {}ms (finish_reason={:?})",
                started.elapsed().as_millis(),
                completion.finish_reason
            );
            Action::ResponseReceived(completion)
        }
        Err(e) => {
            warn!("Completion via {} failed: {}", provider.name(), e);
            Action::RequestFailed(e.to_string())
        }
    }
}
