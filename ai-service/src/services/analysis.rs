//! Task analysis: prompt construction and the upstream-failure fallback.

use crate::dtos::AnalysisResponse;
use crate::services::metrics::record_analysis;
use crate::services::providers::{
    ChatMessage, ChatProvider, Completion, CompletionParams, ProviderError,
};
use std::sync::Arc;

pub const SYSTEM_INSTRUCTION: &str = "You are a helpful project management assistant.";

/// Substituted for `insight` whenever the upstream call fails for any reason.
pub const FALLBACK_INSIGHT: &str = "I'm having trouble connecting to the AI brain right now. Please try again later. (Simulated Insight: Break this down into research, implementation, and testing.)";

pub const SUGGESTED_TAGS: [&str; 2] = ["productivity", "ai-analyzed"];

pub const SENTIMENT: &str = "positive";

/// Embed the description verbatim into the analysis prompt.
pub fn build_prompt(description: &str) -> String {
    format!(
        "Analyze this project description and provide 3 key subtasks and a risk assessment: '{}'",
        description
    )
}

#[derive(Clone)]
pub struct TaskAnalyzer {
    provider: Arc<dyn ChatProvider>,
    params: CompletionParams,
}

impl TaskAnalyzer {
    pub fn new(provider: Arc<dyn ChatProvider>, temperature: f32) -> Self {
        Self {
            provider,
            params: CompletionParams {
                temperature: Some(temperature),
            },
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Ask the provider for an insight. Errors are returned untouched.
    pub async fn request_insight(&self, description: &str) -> Result<Completion, ProviderError> {
        let messages = [
            ChatMessage::system(SYSTEM_INSTRUCTION),
            ChatMessage::user(build_prompt(description)),
        ];

        self.provider.complete(&messages, &self.params).await
    }

    /// Analyze a description. Never fails: every upstream error becomes
    /// `FALLBACK_INSIGHT`, so callers see one response shape.
    pub async fn analyze(&self, description: &str) -> AnalysisResponse {
        let insight = match self.request_insight(description).await {
            Ok(completion) => {
                record_analysis("success");
                completion.content
            }
            Err(err) => {
                tracing::warn!(
                    provider = %self.provider.name(),
                    error_kind = err.kind(),
                    error = %err,
                    "Upstream completion failed, returning fallback insight"
                );
                record_analysis(err.kind());
                FALLBACK_INSIGHT.to_string()
            }
        };

        AnalysisResponse {
            insight,
            suggested_tags: SUGGESTED_TAGS.iter().map(|t| t.to_string()).collect(),
            sentiment: SENTIMENT.to_string(),
        }
    }
}
