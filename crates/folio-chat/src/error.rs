//! Error types for the chat client.

use folio_core::error::FolioError;

/// Errors raised while setting up the chat client.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
    #[error("invalid chat endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("no chat endpoints configured")]
    NoCandidates,
}

impl From<ChatError> for FolioError {
    fn from(err: ChatError) -> Self {
        FolioError::Transport(err.to_string())
    }
}

/// Why a single attempt against one endpoint failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportFailure {
    /// The endpoint answered with a non-success status.
    #[error("endpoint returned HTTP {status}")]
    Status {
        status: u16,
        /// The `response` field of the error body, when there was one.
        response: Option<String>,
    },
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    /// A success status with a body that is not a JSON object.
    #[error("malformed response body: {0}")]
    MalformedBody(String),
    /// A relative endpoint with no origin to resolve it against.
    #[error("cannot resolve endpoint {0} without an origin")]
    UnresolvedEndpoint(String),
}

impl TransportFailure {
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportFailure::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }
}
