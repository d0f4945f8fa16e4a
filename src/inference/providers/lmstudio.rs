//! LM Studio provider (local inference server, no auth).
//!
//! LM Studio exposes the same `/v1/chat/completions` endpoint as the hosted
//! providers, so this is a thin wrapper over the shared client.

use std::time::Duration;

use async_trait::async_trait;

use super::chat_completions::ChatCompletionsClient;
use crate::inference::{Completion, CompletionProvider, CompletionRequest, ProviderError};

pub const DEFAULT_LMSTUDIO_BASE_URL: &str = "http://localhost:1234/v1";

pub struct LmStudioProvider {
    inner: ChatCompletionsClient,
}

impl LmStudioProvider {
    pub fn new(base_url: Option<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_LMSTUDIO_BASE_URL.to_string());
        Ok(Self {
            inner: ChatCompletionsClient::new("LM Studio", base_url, None, timeout)?,
        })
    }
}

#[async_trait]
impl CompletionProvider for LmStudioProvider {
    fn name(&self) -> &str {
        "lmstudio"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion, ProviderError> {
        self.inner.complete(request).await
    }
}
