//! # TUI Components
//!
//! Every visible piece of the Moment screen.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive all data as struct fields and render it:
//! - `StatusBar`: provider, model, status / error and key hints
//!
//! ### Stateful Components (Event-Driven)
//!
//! Own local state and emit high-level events from `TuiEvent`s:
//! - `TextField`: single- or multi-line text input
//! - `DecisionForm`: time, energy, mental state, goal and the decide button
//! - `SidebarState` / `Sidebar`: new chat, search, recent chats, theme toggle
//! - `RecommendationState` / `Recommendation`: the "Do this now" card
//!
//! The sidebar and recommendation card use the persistent state + transient
//! wrapper pattern: the state lives in `TuiState`, the wrapper is built each
//! frame with borrowed state plus props from `App`.
//!
//! ## Props-Based Data Flow
//!
//! Components never read `App` directly:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! let mut bar = StatusBar::new(provider, model, status);
//! bar.render(frame, area, &styles);
//!
//! // Bad: hidden dependency on global state
//! bar.render(frame, area); // reads from App
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── text_field/        (text input, cursor, wrapping)
//! ├── form.rs            (the decision form)
//! ├── sidebar.rs         (chat list, search, theme toggle)
//! ├── recommendation.rs  ("Do this now" card)
//! └── status_bar.rs      (bottom status line)
//! ```

pub mod form;
pub mod recommendation;
pub mod sidebar;
mod status_bar;
pub mod text_field;

pub use form::{DecisionForm, FormEvent, FormField};
pub use recommendation::{CardContent, Recommendation, RecommendationState};
pub use sidebar::{SIDEBAR_WIDTH, Sidebar, SidebarEvent, SidebarFocus, SidebarState};
pub use status_bar::StatusBar;
pub use text_field::{TextField, TextFieldEvent};
