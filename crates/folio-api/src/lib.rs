//! Folio API crate - axum HTTP server answering portfolio chat questions.
//!
//! Serves `POST /api/chat` over a keyword knowledge base, with per-client
//! rate limiting, request validation and response tag allowlisting, plus a
//! `GET /api/health` probe.

pub mod error;
pub mod guard;
pub mod handlers;
pub mod knowledge;
pub mod rate_limit;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
