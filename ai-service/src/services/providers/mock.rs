//! Mock provider implementation for testing.

use super::{ChatMessage, ChatProvider, Completion, CompletionParams, ProviderError};
use async_trait::async_trait;
use std::sync::Mutex;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Always complete with this content.
    Reply(String),
    /// Always fail with a network error carrying this reason.
    Fail(String),
}

/// Scripted chat provider that records the conversations it receives.
pub struct MockChatProvider {
    behavior: MockBehavior,
    received: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockChatProvider {
    pub fn replying(content: impl Into<String>) -> Self {
        Self::new(MockBehavior::Reply(content.into()))
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fail(reason.into()))
    }

    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            received: Mutex::new(Vec::new()),
        }
    }

    /// Conversations seen so far, oldest first.
    pub fn received(&self) -> Vec<Vec<ChatMessage>> {
        self.received
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        _params: &CompletionParams,
    ) -> Result<Completion, ProviderError> {
        if let Ok(mut calls) = self.received.lock() {
            calls.push(messages.to_vec());
        }

        match &self.behavior {
            MockBehavior::Reply(content) => Ok(Completion {
                content: content.clone(),
            }),
            MockBehavior::Fail(reason) => Err(ProviderError::Network(reason.clone())),
        }
    }
}
