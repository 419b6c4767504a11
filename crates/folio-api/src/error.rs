//! API error types and JSON error response formatting.
//!
//! Every error answers with the same body shape as a successful chat reply,
//! `{"response": "<message>"}`, so clients can show the text directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use folio_core::error::FolioError;

/// Message shown for any unexpected server-side failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Sorry, I encountered an error. Please try again later.";

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub response: String,
}

/// API error type that maps to HTTP status codes and JSON responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400 Bad Request - missing, malformed or rejected input.
    #[error("{0}")]
    BadRequest(String),
    /// 429 Too Many Requests - the client's window budget is spent.
    #[error("{0}")]
    TooManyRequests(String),
    /// 500 Internal Server Error - details are logged, never returned.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let response = match self {
            ApiError::BadRequest(msg) | ApiError::TooManyRequests(msg) => msg,
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Chat request failed");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        (status, Json(ErrorBody { response })).into_response()
    }
}

impl From<FolioError> for ApiError {
    fn from(err: FolioError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
