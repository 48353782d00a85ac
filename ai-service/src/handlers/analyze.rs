use crate::dtos::{AnalysisRequest, AnalysisResponse};
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use service_core::error::AppError;

/// `POST /api/analyze`
///
/// Upstream failures never surface here; only an unreadable body is an error
/// (415 without a JSON content type, 400 otherwise).
pub async fn analyze_task(
    State(state): State<AppState>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected analyze body");
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                AppError::UnsupportedMediaType(anyhow::anyhow!(rejection.body_text()))
            }
            _ => AppError::BadRequest(anyhow::anyhow!(rejection.body_text())),
        }
    })?;

    tracing::info!(
        description_len = request.description.len(),
        "Analyzing task description"
    );

    Ok(Json(state.analyzer.analyze(&request.description).await))
}
