//! Route handlers for the chat API.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use folio_core::MAX_INPUT_CHARS;

use crate::error::ApiError;
use crate::state::AppState;

pub const INVALID_FORMAT_MESSAGE: &str = "Invalid request format.";
pub const MESSAGE_REQUIRED_MESSAGE: &str = "Message is required.";
pub const EMPTY_MESSAGE_MESSAGE: &str = "Please send a message!";
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input detected. Please use only text.";
pub const TOO_LONG_MESSAGE: &str = "Message too long. Maximum 500 characters.";

// =============================================================================
// Response types
// =============================================================================

/// Successful chat answer.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(rename = "hasLinks")]
    pub has_links: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

// =============================================================================
// Handler functions
// =============================================================================

/// Text of the `message` field. Non-string values are taken as their JSON
/// text.
fn message_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// POST /api/chat - answer one question from the knowledge base.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        debug!(error = %rejection, "Unreadable chat request");
        ApiError::BadRequest(INVALID_FORMAT_MESSAGE.to_string())
    })?;

    let message = body
        .as_object()
        .and_then(|fields| fields.get("message"))
        .map(message_text)
        .ok_or_else(|| ApiError::BadRequest(MESSAGE_REQUIRED_MESSAGE.to_string()))?;
    let language = body.get("language").and_then(Value::as_str).unwrap_or("en");

    let message = message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest(EMPTY_MESSAGE_MESSAGE.to_string()));
    }
    if !state.guard.validate(message) {
        return Err(ApiError::BadRequest(INVALID_INPUT_MESSAGE.to_string()));
    }
    if message.chars().count() > MAX_INPUT_CHARS {
        return Err(ApiError::BadRequest(TOO_LONG_MESSAGE.to_string()));
    }

    let sanitized = state.guard.sanitize(message);
    let answer = state.knowledge.find_best_match(&sanitized);
    let response = state.sanitizer.sanitize(answer);
    let has_links = response.contains("<a href=");

    info!(language, has_links, "Answered chat message");

    Ok(Json(ChatResponse {
        response,
        has_links,
    }))
}

/// GET /api/health - liveness probe.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    debug!(uptime_secs = state.start_time.elapsed().as_secs(), "Health check");
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
