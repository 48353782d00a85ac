//! Shared helpers for ai-service integration tests.
#![allow(dead_code)]

use ai_service::config::{AiConfig, DeepSeekConfig, ObservabilityConfig, RecommendationConfig};
use ai_service::services::providers::deepseek::DeepSeekProvider;
use ai_service::services::RandomSource;
use ai_service::AppState;
use axum::{body::Body, http::Request, response::Response};
use secrecy::Secret;
use std::sync::Arc;

pub const TEST_API_KEY: &str = "sk-test";

/// Config bound to an ephemeral localhost port with the upstream at `base_url`.
pub fn test_config(base_url: &str) -> AiConfig {
    AiConfig {
        common: service_core::config::Config {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        deepseek: DeepSeekConfig {
            api_key: Secret::new(TEST_API_KEY.to_string()),
            base_url: base_url.to_string(),
            timeout_secs: 5,
            ..DeepSeekConfig::default()
        },
        recommendation: RecommendationConfig::default(),
        observability: ObservabilityConfig::default(),
    }
}

/// A base URL nothing listens on: bind an ephemeral port, then release it.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind probe port");
    let port = listener.local_addr().expect("No local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// State wired to the real DeepSeek client pointed at `base_url`.
pub fn deepseek_state(base_url: &str, rng: Arc<dyn RandomSource>) -> AppState {
    let config = test_config(base_url);
    let provider =
        DeepSeekProvider::new(config.deepseek.clone()).expect("Failed to build provider");
    AppState::new(config, Arc::new(provider), rng)
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn read_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).expect("Response body was not JSON")
}
