use serde::{Deserialize, Serialize};

/// Token accounting reported by the provider, when it reports any.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageStats {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// A finished, non-streamed completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    /// Why generation stopped ("stop", "length", ...), if reported.
    pub finish_reason: Option<String>,
    pub usage: Option<UsageStats>,
}

impl Completion {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: None,
            usage: None,
        }
    }

    /// True when the model ran out of token budget mid-answer.
    pub fn was_truncated(&self) -> bool {
        self.finish_reason.as_deref() == Some("length")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_new_has_no_metadata() {
        let c = Completion::new("Do X now");
        assert_eq!(c.text, "Do X now");
        assert!(c.usage.is_none());
        assert!(!c.was_truncated());
    }

    #[test]
    fn test_length_finish_reason_is_truncation() {
        let c = Completion {
            finish_reason: Some("length".to_string()),
            ..Completion::new("partial")
        };
        assert!(c.was_truncated());
    }

    #[test]
    fn test_usage_tolerates_missing_fields() {
        let usage: UsageStats = serde_json::from_str(r#"{"prompt_tokens": 12}"#).unwrap();
        assert_eq!(usage.prompt_tokens, 12);
        assert_eq!(usage.completion_tokens, 0);
    }
}
