//! Router setup with all API routes and middleware.
//!
//! Configures the axum Router with CORS, tracing, compression, panic
//! recovery, body limits and the chat rate limiter.

use std::any::Any;
use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use folio_core::config::ServerConfig;
use folio_core::error::FolioError;

use crate::error::ApiError;
use crate::handlers;
use crate::rate_limit::RateLimiter;
use crate::state::AppState;

/// Turn a handler panic into the generic 500 answer.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(detail).into_response()
}

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Any origin may call the API.
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let limiter = RateLimiter::new(
        state.config.rate_limit_max_requests,
        Duration::from_secs(state.config.rate_limit_window_secs),
    );

    let chat_routes = Router::new()
        .route("/api/chat", post(handlers::chat))
        .layer(axum::middleware::from_fn(
            crate::rate_limit::rate_limit_middleware,
        ))
        .layer(axum::Extension(limiter));

    let public_routes = Router::new().route("/api/health", get(handlers::health));

    let body_limit = state.config.max_body_bytes;

    public_routes
        .merge(chat_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server on the configured address.
///
/// Connect info is attached so the rate limiter can key on client address.
pub async fn start_server(config: &ServerConfig) -> Result<(), FolioError> {
    let addr = format!("{}:{}", config.host, config.port);
    let router = create_router(AppState::new(config.clone()));

    tracing::info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| FolioError::Api(format!("Failed to bind: {}", e)))?;

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| FolioError::Api(format!("Server error: {}", e)))?;

    Ok(())
}
