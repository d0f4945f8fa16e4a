//! Groq provider (hosted, OpenAI-compatible chat completions).

use std::time::Duration;

use async_trait::async_trait;

use super::chat_completions::ChatCompletionsClient;
use crate::inference::{Completion, CompletionProvider, CompletionRequest, ProviderError};

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub struct GroqProvider {
    inner: ChatCompletionsClient,
}

impl GroqProvider {
    /// Creates a new Groq provider.
    ///
    /// # Arguments
    /// * `api_key` - Groq API key
    /// * `base_url` - Optional custom base URL (defaults to Groq's API)
    /// * `timeout` - Upper bound on a whole request
    pub fn new(
        api_key: String,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        if api_key.trim().is_empty() {
            return Err(ProviderError::Config("Groq API key is empty".to_string()));
        }
        let base_url = base_url.unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string());
        Ok(Self {
            inner: ChatCompletionsClient::new("Groq", base_url, Some(api_key), timeout)?,
        })
    }
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion, ProviderError> {
        self.inner.complete(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_is_config_error() {
        let result = GroqProvider::new("  ".to_string(), None, Duration::from_secs(5));
        assert!(matches!(result, Err(ProviderError::Config(_))));
    }

    #[test]
    fn test_defaults_to_groq_endpoint() {
        let provider = GroqProvider::new("gsk_test".to_string(), None, Duration::from_secs(5)).unwrap();
        assert_eq!(provider.inner.base_url(), DEFAULT_GROQ_BASE_URL);
        assert_eq!(provider.name(), "groq");
    }
}
