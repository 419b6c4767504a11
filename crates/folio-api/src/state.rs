//! Application state shared across all route handlers.
//!
//! Everything here is immutable after startup; the only mutable server
//! state is the rate limiter's client map, which lives in its own layer.

use std::sync::Arc;
use std::time::Instant;

use folio_core::config::ServerConfig;

use crate::guard::{RequestGuard, ResponseSanitizer};
use crate::knowledge::KnowledgeBase;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Question/answer table.
    pub knowledge: Arc<KnowledgeBase>,
    /// Incoming message validation.
    pub guard: Arc<RequestGuard>,
    /// Outgoing answer tag allowlisting.
    pub sanitizer: Arc<ResponseSanitizer>,
    /// Server start time for uptime logging.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self::with_knowledge(config, KnowledgeBase::new())
    }

    pub fn with_knowledge(config: ServerConfig, knowledge: KnowledgeBase) -> Self {
        Self {
            config: Arc::new(config),
            knowledge: Arc::new(knowledge),
            guard: Arc::new(RequestGuard::new()),
            sanitizer: Arc::new(ResponseSanitizer::new()),
            start_time: Instant::now(),
        }
    }
}
