//! Integration tests for the status and probe endpoints.

mod common;

use ai_service::services::ThreadRngSource;
use ai_service::{build_router, Application};
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{deepseek_state, read_json, unreachable_base_url};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

/// Spawn the application on a random port and return the port number.
async fn spawn_app() -> u16 {
    let state = deepseek_state(&unreachable_base_url(), Arc::new(ThreadRngSource));
    let app = Application::build_with_state(state)
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

#[tokio::test]
async fn root_reports_service_and_provider() {
    let app = build_router(deepseek_state(
        &unreachable_base_url(),
        Arc::new(ThreadRngSource),
    ));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(
        body,
        serde_json::json!({"status": "AI Service Running", "provider": "DeepSeek"})
    );
}

#[tokio::test]
async fn root_over_tcp_returns_ok() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("http://127.0.0.1:{}/", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "AI Service Running");
    assert_eq!(body["provider"], "DeepSeek");
}

#[tokio::test]
async fn liveness_and_readiness_return_ok() {
    let port = spawn_app().await;
    let client = Client::new();

    let response = client
        .get(format!("http://127.0.0.1:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "ai-service");

    let response = client
        .get(format!("http://127.0.0.1:{}/ready", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
async fn metrics_endpoint_serves_text() {
    let app = build_router(deepseek_state(
        &unreachable_base_url(),
        Arc::new(ThreadRngSource),
    ));

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/plain; charset=utf-8"
    );
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let app = build_router(deepseek_state(
        &unreachable_base_url(),
        Arc::new(ThreadRngSource),
    ));

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/analyze")
                .header("origin", "http://localhost:3000")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
