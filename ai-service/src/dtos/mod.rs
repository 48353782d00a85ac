//! Request and response bodies of the HTTP API.

use serde::{Deserialize, Deserializer, Serialize};

pub const HEALTH_STATUS: &str = "AI Service Running";

/// `POST /api/analyze` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalysisRequest {
    /// Free-text task description. Missing or `null` reads as empty; other
    /// non-string values are taken as their JSON text.
    #[serde(default, deserialize_with = "any_as_text")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub insight: String,
    pub suggested_tags: Vec<String>,
    pub sentiment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommended_assignee: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub provider: String,
}

fn any_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text,
        other => other.to_string(),
    })
}
