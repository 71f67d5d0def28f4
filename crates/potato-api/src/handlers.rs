//! Route handler functions for all API endpoints.
//!
//! Request bodies are taken as raw bytes and decoded here so that an empty
//! or malformed body still produces the `{error, success}` envelope rather
//! than axum's plain-text rejection.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    pub message: Option<String>,
    pub session_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResetRequest {
    pub session_id: Option<String>,
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponseBody {
    pub response: String,
    pub searched: bool,
    pub success: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponseBody {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub active_sessions: usize,
}

/// Decode a JSON body, treating an empty body as all-defaults.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {}", e)))
}

// =============================================================================
// Handler functions
// =============================================================================

/// POST /api/chat - run one (possibly search-augmented) chat turn.
pub async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponseBody>, ApiError> {
    let req: ChatRequest = parse_body(&body)?;

    let reply = state
        .orchestrator
        .handle(req.session_id.as_deref(), req.message.as_deref())
        .await?;

    Ok(Json(ChatResponseBody {
        response: reply.response,
        searched: reply.searched,
        success: true,
    }))
}

/// POST /api/reset - forget a session's conversation. Idempotent.
pub async fn reset(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ResetResponseBody>, ApiError> {
    let req: ResetRequest = parse_body(&body)?;

    state
        .orchestrator
        .reset(req.session_id.as_deref())
        .await?;

    Ok(Json(ResetResponseBody {
        success: true,
        message: "chat reset".to_string(),
    }))
}

/// GET /health - liveness and basic counters.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        active_sessions: state.orchestrator.active_sessions().await,
    })
}

/// GET / - embedded chat page.
pub async fn index() -> impl IntoResponse {
    Html(crate::ui::CHAT_HTML)
}
