//! # Prompt Builder
//!
//! Turns a validated form into the system + user turn sent to the model.
//! Pure string formatting, no I/O.

use crate::core::form::ValidatedForm;

/// Default system instruction.
pub const SYSTEM_PROMPT: &str = "You are Moment AI — a human-like decision engine.
Make ONE decisive judgment call.
Explain using Productivity, Structure, Growth, Well-being.";

/// The two prompts for one completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Formats the user turn from the form fields.
pub fn build_user_prompt(form: &ValidatedForm) -> String {
    format!(
        "Time: {}\nEnergy: {}\nMental state: {}\nGoal: {}",
        form.current_time(),
        form.energy(),
        form.mental_state(),
        form.goal()
    )
}

pub fn build(system_prompt: &str, form: &ValidatedForm) -> PromptPair {
    PromptPair {
        system: system_prompt.to_string(),
        user: build_user_prompt(form),
    }
}
