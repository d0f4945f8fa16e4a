//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::inference::{Completion, CompletionProvider, CompletionRequest, ProviderError};

/// A provider that answers every request with the same text and counts calls.
pub struct StubProvider {
    pub reply: String,
    pub calls: AtomicUsize,
}

impl StubProvider {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn complete(
        &self,
        _request: CompletionRequest<'_>,
    ) -> Result<Completion, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Completion::new(self.reply.clone()))
    }
}

/// Creates a test App with a StubProvider.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(StubProvider::new("stub reply")))
}
