//! Route handler functions.
//!
//! Each handler extracts its JSON payload via axum extractors, runs the
//! assistant, and returns a JSON response.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rota_assistant::{Intent, QueryContext};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request / response types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct AssistantQueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AssistantQueryResponse {
    pub intent: Intent,
    pub answer: String,
    pub context: QueryContext,
    pub original_query: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /api/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /api/assistant/query`
///
/// Runs the full pipeline: classify, retrieve, generate. The structured
/// context is returned alongside the answer so clients can render or
/// audit the data the answer was grounded in.
pub async fn assistant_query(
    State(state): State<AppState>,
    Json(request): Json<AssistantQueryRequest>,
) -> Result<Json<AssistantQueryResponse>, ApiError> {
    let (outcome, answer) = state.assistant.ask(&request.query).await?;

    Ok(Json(AssistantQueryResponse {
        intent: outcome.intent,
        answer,
        context: outcome.context,
        original_query: outcome.original_query,
        timestamp: outcome.timestamp,
    }))
}
