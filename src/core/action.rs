//! # Actions
//!
//! Everything that can happen in Moment becomes an `Action`.
//! User presses "Make the decision"? That's `Action::Submit(form)`.
//! API responds? That's `Action::ResponseReceived(completion)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an `Effect` telling the adapter what I/O to do.
//! No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::form::FormInput;
use crate::core::prompt::{self, PromptPair};
use crate::core::state::{App, Phase};
use crate::inference::Completion;

#[derive(Debug)]
pub enum Action {
    /// The user pressed the decide button.
    Submit(FormInput),
    ResponseReceived(Completion),
    RequestFailed(String),
    /// Clear the active chat; history is kept.
    NewChat,
    SelectChat(usize),
    ToggleTheme,
    DismissError,
    Quit,
}

/// I/O the adapter must perform after an update.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    Quit,
    SpawnRequest(PromptPair),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(form) => {
            if app.phase == Phase::Submitting {
                debug!("Submit ignored: a request is already in flight");
                return Effect::None;
            }
            let valid = match form.validate() {
                Ok(valid) => valid,
                Err(reason) => {
                    // Empty required fields are a silent no-op
                    debug!("Submit skipped: {}", reason);
                    return Effect::None;
                }
            };
            info!(
                "Submitting decision request (energy={}, mental_state={})",
                valid.energy(),
                valid.mental_state()
            );
            app.pending_goal = Some(valid.goal().to_string());
            app.phase = Phase::Submitting;
            app.error = None;
            app.status_message = String::from("Thinking…");
            Effect::SpawnRequest(prompt::build(&app.system_prompt, &valid))
        }
        Action::ResponseReceived(completion) => {
            let Some(goal) = app.pending_goal.take() else {
                warn!("Dropping response with no request in flight");
                return Effect::None;
            };
            let truncated = completion.was_truncated();
            let index = app.session.record(&goal, completion.text);
            app.phase = Phase::Displaying;
            app.status_message = if truncated {
                String::from("Answer cut short (token limit)")
            } else {
                String::from("Decision ready")
            };
            info!("Response recorded as chat #{}", index);
            Effect::None
        }
        Action::RequestFailed(message) => {
            warn!("Completion failed: {}", message);
            app.pending_goal = None;
            app.phase = Phase::Idle;
            app.status_message = String::from("Request failed");
            app.error = Some(message);
            Effect::None
        }
        Action::NewChat => {
            app.session.new_chat();
            app.error = None;
            if app.phase != Phase::Submitting {
                app.phase = Phase::Idle;
            }
            app.status_message = String::from("New chat");
            Effect::None
        }
        Action::SelectChat(index) => {
            if !app.session.select_chat(index) {
                warn!("SelectChat({}) out of range", index);
                return Effect::None;
            }
            app.error = None;
            if app.phase != Phase::Submitting {
                app.phase = Phase::Displaying;
            }
            Effect::None
        }
        Action::ToggleTheme => {
            let theme = app.session.toggle_theme();
            app.status_message = format!("Theme: {}", theme.label());
            Effect::None
        }
        Action::DismissError => {
            app.error = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::{Energy, MentalState};
    use crate::core::prompt::SYSTEM_PROMPT;
    use crate::core::session::{ChatMessage, Role};
    use crate::core::theme::Theme;
    use crate::test_support::test_app;

    fn form(time: &str, goal: &str) -> FormInput {
        FormInput {
            current_time: time.to_string(),
            energy: Energy::High,
            mental_state: MentalState::Motivated,
            goal: goal.to_string(),
        }
    }

    fn submit_and_answer(app: &mut App, goal: &str, answer: &str) {
        let effect = update(app, Action::Submit(form("7:45 PM", goal)));
        assert!(matches!(effect, Effect::SpawnRequest(_)));
        update(app, Action::ResponseReceived(Completion::new(answer)));
    }

    #[test]
    fn test_valid_submit_spawns_request() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit(form("7:45 PM", "Finish report")));
        assert_eq!(
            effect,
            Effect::SpawnRequest(PromptPair {
                system: SYSTEM_PROMPT.to_string(),
                user: "Time: 7:45 PM\nEnergy: High\nMental state: Motivated\nGoal: Finish report"
                    .to_string(),
            })
        );
        assert_eq!(app.phase, Phase::Submitting);
        assert!(app.is_loading());
        assert!(app.session.chats().is_empty());
    }

    #[test]
    fn test_empty_goal_is_silent_noop() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit(form("7:45 PM", "")));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.phase, Phase::Idle);
        assert!(app.error.is_none());
        assert!(app.session.chats().is_empty());
    }

    #[test]
    fn test_empty_time_is_silent_noop() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit(form("", "Finish report")));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.phase, Phase::Idle);
        assert!(app.pending_goal.is_none());
    }

    #[test]
    fn test_scenario_finish_report() {
        let mut app = test_app();
        submit_and_answer(&mut app, "Finish report", "Do X now");
        assert_eq!(app.session.chats().len(), 1);
        let chat = &app.session.chats()[0];
        assert_eq!(chat.title, "Finish report");
        assert_eq!(
            chat.messages,
            vec![ChatMessage {
                role: Role::Assistant,
                content: "Do X now".to_string()
            }]
        );
        assert_eq!(app.session.active_chat(), Some(0));
        assert_eq!(app.phase, Phase::Displaying);
    }

    #[test]
    fn test_second_submission_becomes_active() {
        let mut app = test_app();
        submit_and_answer(&mut app, "one", "1");
        submit_and_answer(&mut app, "two", "2");
        assert_eq!(app.session.chats().len(), 2);
        assert_eq!(
            app.session.active_chat(),
            Some(app.session.chats().len() - 1)
        );
    }

    #[test]
    fn test_long_goal_title_truncated() {
        let mut app = test_app();
        let goal = "g".repeat(120);
        submit_and_answer(&mut app, &goal, "ok");
        assert_eq!(app.session.chats()[0].title.chars().count(), 50);
    }

    #[test]
    fn test_submit_while_loading_is_ignored() {
        let mut app = test_app();
        update(&mut app, Action::Submit(form("7:45 PM", "first")));
        let effect = update(&mut app, Action::Submit(form("7:46 PM", "second")));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.pending_goal.as_deref(), Some("first"));
    }

    #[test]
    fn test_failure_returns_to_idle_without_record() {
        let mut app = test_app();
        update(&mut app, Action::Submit(form("7:45 PM", "Finish report")));
        update(
            &mut app,
            Action::RequestFailed("network error: connection refused".to_string()),
        );
        assert_eq!(app.phase, Phase::Idle);
        assert!(app.session.chats().is_empty());
        assert_eq!(
            app.error.as_deref(),
            Some("network error: connection refused")
        );
        assert!(app.pending_goal.is_none());
    }

    #[test]
    fn test_next_submit_clears_error() {
        let mut app = test_app();
        update(&mut app, Action::Submit(form("7:45 PM", "x")));
        update(&mut app, Action::RequestFailed("boom".to_string()));
        update(&mut app, Action::Submit(form("7:45 PM", "x")));
        assert!(app.error.is_none());
    }

    #[test]
    fn test_stray_response_is_dropped() {
        let mut app = test_app();
        update(&mut app, Action::ResponseReceived(Completion::new("late")));
        assert!(app.session.chats().is_empty());
        assert_eq!(app.phase, Phase::Idle);
    }

    #[test]
    fn test_new_chat_clears_active_keeps_chats() {
        let mut app = test_app();
        submit_and_answer(&mut app, "a", "1");
        update(&mut app, Action::NewChat);
        assert_eq!(app.session.active_chat(), None);
        assert_eq!(app.session.chats().len(), 1);
        assert_eq!(app.phase, Phase::Idle);
    }

    #[test]
    fn test_select_chat_displays_it() {
        let mut app = test_app();
        submit_and_answer(&mut app, "a", "first");
        submit_and_answer(&mut app, "b", "second");
        update(&mut app, Action::NewChat);
        update(&mut app, Action::SelectChat(0));
        assert_eq!(app.session.active_chat(), Some(0));
        assert_eq!(app.session.active_response(), Some("first"));
        assert_eq!(app.phase, Phase::Displaying);
    }

    #[test]
    fn test_select_chat_out_of_range_changes_nothing() {
        let mut app = test_app();
        update(&mut app, Action::SelectChat(3));
        assert_eq!(app.session.active_chat(), None);
        assert_eq!(app.phase, Phase::Idle);
    }

    #[test]
    fn test_toggle_theme_round_trip() {
        let mut app = test_app();
        update(&mut app, Action::ToggleTheme);
        assert_eq!(app.session.theme(), Theme::Light);
        update(&mut app, Action::ToggleTheme);
        assert_eq!(app.session.theme(), Theme::Dark);
    }

    #[test]
    fn test_truncated_answer_noted_in_status() {
        let mut app = test_app();
        update(&mut app, Action::Submit(form("7:45 PM", "x")));
        update(
            &mut app,
            Action::ResponseReceived(Completion {
                finish_reason: Some("length".to_string()),
                ..Completion::new("partial")
            }),
        );
        assert!(app.status_message.contains("token limit"));
        assert_eq!(app.session.active_response(), Some("partial"));
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
