//! DeepSeek chat-completion client.
//!
//! Speaks the OpenAI-compatible `/chat/completions` contract with bearer
//! authentication.

use super::{ChatMessage, ChatProvider, Completion, CompletionParams, ProviderError};
use crate::config::DeepSeekConfig;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const PROVIDER_NAME: &str = "DeepSeek";

/// DeepSeek provider.
pub struct DeepSeekProvider {
    config: DeepSeekConfig,
    client: Client,
}

impl DeepSeekProvider {
    pub fn new(config: DeepSeekConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn is_configured(&self) -> bool {
        !self.config.api_key.expose_secret().is_empty()
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn build_request<'a>(
        &'a self,
        messages: &'a [ChatMessage],
        params: &CompletionParams,
    ) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.config.model,
            messages,
            temperature: params.temperature.unwrap_or(self.config.temperature),
        }
    }
}

#[async_trait]
impl ChatProvider for DeepSeekProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<Completion, ProviderError> {
        let request = self.build_request(messages, params);

        tracing::debug!(
            model = %self.config.model,
            message_count = messages.len(),
            "Sending request to DeepSeek API"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        parse_completion(&body)
    }
}

/// Extract `choices[0].message.content` from a completion body.
pub fn parse_completion(body: &str) -> Result<Completion, ProviderError> {
    let api_response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

    let choice = api_response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedResponse("no choices returned".to_string()))?;

    let content = choice
        .message
        .content
        .filter(|c| !c.is_empty())
        .ok_or(ProviderError::EmptyCompletion)?;

    Ok(Completion { content })
}

// ============================================================================
// DeepSeek API types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;

    fn provider() -> DeepSeekProvider {
        DeepSeekProvider::new(DeepSeekConfig {
            api_key: Secret::new("sk-test".to_string()),
            base_url: "http://localhost:9999/".to_string(),
            ..DeepSeekConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn request_payload_matches_chat_contract() {
        let provider = provider();
        let messages = vec![ChatMessage::system("sys"), ChatMessage::user("hello")];
        let request = provider.build_request(&messages, &CompletionParams::default());

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "deepseek-chat");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hello");
        assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn url_joins_without_double_slash() {
        assert_eq!(
            provider().completions_url(),
            "http://localhost:9999/chat/completions"
        );
    }

    #[test]
    fn empty_key_is_reported_unconfigured() {
        let provider = DeepSeekProvider::new(DeepSeekConfig::default()).unwrap();
        assert!(!provider.is_configured());
        assert!(self::provider().is_configured());
    }

    #[test]
    fn parses_first_choice_content() {
        let body = r#"{"model":"deepseek-chat","choices":[
            {"message":{"role":"assistant","content":"first"}},
            {"message":{"role":"assistant","content":"second"}}]}"#;
        let completion = parse_completion(body).unwrap();
        assert_eq!(completion.content, "first");
    }

    #[test]
    fn rejects_missing_choices_and_bad_json() {
        assert!(matches!(
            parse_completion(r#"{"choices":[]}"#),
            Err(ProviderError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_completion(r#"{"error":"nope"}"#),
            Err(ProviderError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_completion("<html>"),
            Err(ProviderError::MalformedResponse(_))
        ));
    }

    #[test]
    fn whitespace_content_is_relayed_verbatim() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"  "}}]}"#;
        assert_eq!(parse_completion(body).unwrap().content, "  ");

        let body = r#"{"choices":[{"message":{"role":"assistant","content":"\n"}}]}"#;
        assert_eq!(parse_completion(body).unwrap().content, "\n");
    }

    #[test]
    fn empty_or_null_content_is_empty_completion() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":""}}]}"#;
        assert!(matches!(
            parse_completion(body),
            Err(ProviderError::EmptyCompletion)
        ));

        let body = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        assert!(matches!(
            parse_completion(body),
            Err(ProviderError::EmptyCompletion)
        ));
    }
}
