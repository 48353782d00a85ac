use crate::dtos::RecommendationResponse;
use crate::startup::AppState;
use axum::{extract::State, Json};

/// `POST /api/recommend` — the request body is never read.
pub async fn recommend_assignee(State(state): State<AppState>) -> Json<RecommendationResponse> {
    let response = state.recommender.recommend();
    tracing::debug!(assignee = %response.recommended_assignee, "Recommended assignee");
    Json(response)
}
