//! # Decision Form
//!
//! The four inputs the user fills in before asking for a decision, plus the
//! non-empty validation that gates a submission.

use std::fmt;

/// How much energy the user reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Energy {
    #[default]
    Low,
    Medium,
    High,
}

impl Energy {
    pub const ALL: [Energy; 3] = [Energy::Low, Energy::Medium, Energy::High];

    /// Next option, wrapping around.
    pub fn next(self) -> Energy {
        match self {
            Energy::Low => Energy::Medium,
            Energy::Medium => Energy::High,
            Energy::High => Energy::Low,
        }
    }

    /// Previous option, wrapping around.
    pub fn prev(self) -> Energy {
        match self {
            Energy::Low => Energy::High,
            Energy::Medium => Energy::Low,
            Energy::High => Energy::Medium,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Energy::Low => "Low",
            Energy::Medium => "Medium",
            Energy::High => "High",
        }
    }
}

/// The user's self-reported mental state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MentalState {
    #[default]
    Stressed,
    Neutral,
    Motivated,
}

impl MentalState {
    pub const ALL: [MentalState; 3] = [
        MentalState::Stressed,
        MentalState::Neutral,
        MentalState::Motivated,
    ];

    pub fn next(self) -> MentalState {
        match self {
            MentalState::Stressed => MentalState::Neutral,
            MentalState::Neutral => MentalState::Motivated,
            MentalState::Motivated => MentalState::Stressed,
        }
    }

    pub fn prev(self) -> MentalState {
        match self {
            MentalState::Stressed => MentalState::Motivated,
            MentalState::Neutral => MentalState::Stressed,
            MentalState::Motivated => MentalState::Neutral,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MentalState::Stressed => "Stressed",
            MentalState::Neutral => "Neutral",
            MentalState::Motivated => "Motivated",
        }
    }
}

impl fmt::Display for Energy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for MentalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw form contents for one submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormInput {
    pub current_time: String,
    pub energy: Energy,
    pub mental_state: MentalState,
    pub goal: String,
}

/// A form whose required fields are known to be non-empty.
///
/// Only `FormInput::validate` constructs one, so holding a `ValidatedForm`
/// is proof the submission may proceed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedForm {
    current_time: String,
    energy: Energy,
    mental_state: MentalState,
    goal: String,
}

impl ValidatedForm {
    pub fn current_time(&self) -> &str {
        &self.current_time
    }

    pub fn energy(&self) -> Energy {
        self.energy
    }

    pub fn mental_state(&self) -> MentalState {
        self.mental_state
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingGoal,
    MissingTime,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingGoal => write!(f, "goal is empty"),
            ValidationError::MissingTime => write!(f, "current time is empty"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl FormInput {
    /// Checks that both `goal` and `current_time` are non-empty. Whitespace
    /// counts as text. The goal is checked first.
    pub fn validate(&self) -> Result<ValidatedForm, ValidationError> {
        if self.goal.is_empty() {
            return Err(ValidationError::MissingGoal);
        }
        if self.current_time.is_empty() {
            return Err(ValidationError::MissingTime);
        }
        Ok(ValidatedForm {
            current_time: self.current_time.clone(),
            energy: self.energy,
            mental_state: self.mental_state,
            goal: self.goal.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormInput {
        FormInput {
            current_time: "7:45 PM".to_string(),
            energy: Energy::High,
            mental_state: MentalState::Motivated,
            goal: "Finish report".to_string(),
        }
    }

    #[test]
    fn test_defaults_match_first_radio_option() {
        let form = FormInput::default();
        assert_eq!(form.energy, Energy::Low);
        assert_eq!(form.mental_state, MentalState::Stressed);
        assert!(form.goal.is_empty());
    }

    #[test]
    fn test_validate_accepts_filled_form() {
        let valid = filled().validate().unwrap();
        assert_eq!(valid.goal(), "Finish report");
        assert_eq!(valid.current_time(), "7:45 PM");
        assert_eq!(valid.energy(), Energy::High);
        assert_eq!(valid.mental_state(), MentalState::Motivated);
    }

    #[test]
    fn test_validate_rejects_empty_goal() {
        let form = FormInput {
            goal: String::new(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingGoal));
    }

    #[test]
    fn test_validate_rejects_empty_time() {
        let form = FormInput {
            current_time: String::new(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingTime));
    }

    #[test]
    fn test_validate_accepts_whitespace_only_fields() {
        let form = FormInput {
            current_time: " ".to_string(),
            goal: "  \n\t".to_string(),
            ..filled()
        };
        let valid = form.validate().unwrap();
        assert_eq!(valid.goal(), "  \n\t");
        assert_eq!(valid.current_time(), " ");
    }

    #[test]
    fn test_both_empty_reports_goal_first() {
        assert_eq!(
            FormInput::default().validate(),
            Err(ValidationError::MissingGoal)
        );
    }

    #[test]
    fn test_radio_cycles_wrap() {
        assert_eq!(Energy::High.next(), Energy::Low);
        assert_eq!(Energy::Low.prev(), Energy::High);
        assert_eq!(MentalState::Motivated.next(), MentalState::Stressed);
        assert_eq!(MentalState::Stressed.prev(), MentalState::Motivated);
        for e in Energy::ALL {
            assert_eq!(e.next().prev(), e);
        }
    }
}
