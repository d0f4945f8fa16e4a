//! Shared client for OpenAI-compatible `/chat/completions` endpoints.
//!
//! Groq and LM Studio both speak this dialect; the only differences are the
//! base URL and whether a bearer token is sent. This module uses the wire
//! terminology ("messages", "choices", "role").

use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::inference::{Completion, CompletionRequest, ProviderError, UsageStats};

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Serialize, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
enum Role {
    System,
    User,
}

#[derive(Serialize, Debug)]
struct Message<'a> {
    role: Role,
    content: &'a str,
}

/// The request body for `/chat/completions`
#[derive(Serialize, Debug)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<UsageStats>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// `{"error": {"message": "..."}}` as returned by OpenAI-style APIs.
#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: String,
}

// ============================================================================
// Translation Layer
// ============================================================================

fn to_wire<'a>(request: &CompletionRequest<'a>) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model: request.model,
        messages: vec![
            Message {
                role: Role::System,
                content: request.system_prompt,
            },
            Message {
                role: Role::User,
                content: request.user_prompt,
            },
        ],
        temperature: request.temperature,
        max_tokens: request.max_tokens,
    }
}

/// Pulls the first choice's text out of a response body.
fn from_wire(response: ChatCompletionResponse) -> Result<Completion, ProviderError> {
    let usage = response.usage;
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyResponse)?;
    // Only a missing or null content is empty; whitespace is kept as returned
    let text = choice.message.content.ok_or(ProviderError::EmptyResponse)?;
    Ok(Completion {
        text,
        finish_reason: choice.finish_reason,
        usage,
    })
}

/// Prefer the API's own error message over the raw body.
fn error_message(body: String) -> String {
    match serde_json::from_str::<ErrorEnvelope>(&body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body,
    }
}

// ============================================================================
// Client
// ============================================================================

pub struct ChatCompletionsClient {
    label: &'static str,
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl ChatCompletionsClient {
    pub fn new(
        label: &'static str,
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Config(format!("HTTP client: {e}")))?;
        Ok(Self {
            label,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn complete(
        &self,
        request: CompletionRequest<'_>,
    ) -> Result<Completion, ProviderError> {
        let body = to_wire(&request);

        info!(
            "{} chat completion request: model={}, temperature={}, max_tokens={}",
            self.label, request.model, request.temperature, request.max_tokens
        );
        debug!("{} user prompt: {:?}", self.label, request.user_prompt);

        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&body);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("{} request failed: {}", self.label, e);
            ProviderError::from(e)
        })?;

        let status = response.status();
        debug!("{} response status: {}", self.label, status);

        if !status.is_success() {
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("{} API error: {} - {}", self.label, status, err_body);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: error_message(err_body),
            });
        }

        let raw = response.text().await.map_err(ProviderError::from)?;
        debug!("{} raw response: {} bytes", self.label, raw.len());
        let parsed: ChatCompletionResponse = serde_json::from_str(&raw)
            .map_err(|e| ProviderError::Parse(format!("{e}")))?;

        let completion = from_wire(parsed)?;
        info!(
            "{} completion received: {} chars, finish_reason={:?}, usage={:?}",
            self.label,
            completion.text.len(),
            completion.finish_reason,
            completion.usage
        );
        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest<'static> {
        CompletionRequest {
            system_prompt: "sys",
            user_prompt: "usr",
            model: "llama-3.1-8b-instant",
            temperature: 0.5,
            max_tokens: 350,
        }
    }

    #[test]
    fn test_request_serializes_system_then_user() {
        let json = serde_json::to_value(to_wire(&request())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "llama-3.1-8b-instant",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "usr"}
                ],
                "temperature": 0.5,
                "max_tokens": 350
            })
        );
    }

    #[test]
    fn test_from_wire_takes_first_choice() {
        let body: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Do X now"},"finish_reason":"stop"},
                           {"message":{"content":"ignored"}}],
                "usage":{"prompt_tokens":40,"completion_tokens":5,"total_tokens":45}}"#,
        )
        .unwrap();
        let completion = from_wire(body).unwrap();
        assert_eq!(completion.text, "Do X now");
        assert_eq!(completion.finish_reason.as_deref(), Some("stop"));
        assert_eq!(completion.usage.map(|u| u.total_tokens), Some(45));
    }

    #[test]
    fn test_from_wire_no_choices_is_empty_response() {
        let body: ChatCompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(from_wire(body), Err(ProviderError::EmptyResponse)));
    }

    #[test]
    fn test_from_wire_null_content_is_empty_response() {
        let body: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(matches!(from_wire(body), Err(ProviderError::EmptyResponse)));
    }

    #[test]
    fn test_from_wire_keeps_whitespace_content() {
        let body: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"  "}}]}"#).unwrap();
        assert_eq!(from_wire(body).unwrap().text, "  ");
    }

    #[test]
    fn test_error_message_unwraps_envelope() {
        let body = r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error"}}"#;
        assert_eq!(error_message(body.to_string()), "Invalid API Key");
        assert_eq!(error_message("plain text".to_string()), "plain text");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ChatCompletionsClient::new(
            "test",
            "http://localhost:1234/v1/".to_string(),
            None,
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:1234/v1");
    }
}
