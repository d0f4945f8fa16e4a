//! # Core Application Logic
//!
//! This module contains Moment's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Session (chats)      │
//!                    │  • Form + Prompt        │
//!                    │  • Action / update()    │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │ inference  │
//!             │  Adapter   │          │ (network)  │
//!             │ (ratatui)  │          │            │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct — all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`session`]: Per-session chat history and theme
//! - [`form`]: Form fields and validation
//! - [`prompt`]: Prompt formatting
//! - [`theme`]: Light/dark palettes
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod form;
pub mod prompt;
pub mod session;
pub mod state;
pub mod theme;
