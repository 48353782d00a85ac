//! Application startup and lifecycle management.
//!
//! Wires configuration into the analyzer and recommender, builds the HTTP
//! router, and runs it until a shutdown signal arrives.

use crate::config::AiConfig;
use crate::handlers::{
    analyze::analyze_task,
    health::{health_check, readiness_check, service_status},
    metrics::metrics_endpoint,
    recommend::recommend_assignee,
};
use crate::services::providers::deepseek::DeepSeekProvider;
use crate::services::providers::ChatProvider;
use crate::services::{AssigneeRecommender, RandomSource, TaskAnalyzer, ThreadRngSource};
use axum::{
    body::Body,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{http_request_span, request_id_middleware},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AiConfig,
    pub analyzer: TaskAnalyzer,
    pub recommender: AssigneeRecommender,
}

impl AppState {
    /// Assemble state from explicit collaborators.
    pub fn new(
        config: AiConfig,
        provider: Arc<dyn ChatProvider>,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        let analyzer = TaskAnalyzer::new(provider, config.deepseek.temperature);
        let recommender = AssigneeRecommender::new(config.recommendation.team.clone(), rng);

        Self {
            config,
            analyzer,
            recommender,
        }
    }

    /// Production wiring: DeepSeek upstream and a thread RNG.
    pub fn from_config(config: AiConfig) -> Result<Self, AppError> {
        let provider = DeepSeekProvider::new(config.deepseek.clone())
            .map_err(|e| AppError::ConfigError(anyhow::Error::new(e)))?;

        if !provider.is_configured() {
            tracing::warn!("DEEPSEEK_API_KEY is not set; analysis will return the fallback insight");
        }

        tracing::info!(
            model = %config.deepseek.model,
            base_url = %config.deepseek.base_url,
            "Initialized DeepSeek provider"
        );

        Ok(Self::new(config, Arc::new(provider), Arc::new(ThreadRngSource)))
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_status))
        .route("/api/analyze", post(analyze_task))
        .route("/api/recommend", post(recommend_assignee))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .layer(from_fn(metrics_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http().make_span_with(http_request_span::<Body>))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: AiConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(config)?;
        Self::build_with_state(state).await
    }

    /// Build around pre-assembled state (port 0 = random port for testing).
    pub async fn build_with_state(state: AppState) -> Result<Self, AppError> {
        let address = state.config.common.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("AI service: HTTP on port {}", port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
