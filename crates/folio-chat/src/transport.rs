//! Delivery of chat messages to remote endpoints.
//!
//! Candidates are tried strictly in order, one request each, with a
//! per-request timeout. A success or an HTTP 429 ends the sequence; any
//! other failure moves on to the next candidate. When every candidate has
//! failed, the last failure decides the outcome.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, warn};

use folio_core::config::ChatConfig;
use folio_core::locale::Locale;

use crate::error::{ChatError, TransportFailure};
use crate::types::{contains_anchor, ChatReply, ChatRequest};

/// Result of one full attempt sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportOutcome {
    /// An endpoint answered. `has_links` is the endpoint's flag, or inferred
    /// from the text when the endpoint did not send one.
    Success { response: String, has_links: bool },
    /// An endpoint answered HTTP 429. No further candidates were tried.
    RateLimited,
    /// The last failure was a 4xx (not 404) carrying a message to show.
    ClientError { status: u16, response: String },
    /// Every candidate failed for some other reason.
    Exhausted { last: TransportFailure },
}

impl TransportOutcome {
    /// Classify the failure that ended an attempt sequence.
    pub fn from_failure(last: TransportFailure) -> Self {
        match &last {
            TransportFailure::Status { status: 429, .. } => TransportOutcome::RateLimited,
            TransportFailure::Status {
                status,
                response: Some(text),
            } if (400..500).contains(status) && *status != 404 && !text.is_empty() => {
                TransportOutcome::ClientError {
                    status: *status,
                    response: text.clone(),
                }
            }
            _ => TransportOutcome::Exhausted { last },
        }
    }
}

/// Anything that can resolve a sanitized message into a transport outcome.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn send(&self, message: &str, locale: &Locale) -> TransportOutcome;
}

/// Sends messages over HTTP to an ordered list of candidate endpoints.
pub struct HttpTransport {
    client: reqwest::Client,
    candidates: Vec<String>,
    origin: Option<String>,
    timeout: Duration,
}

impl HttpTransport {
    /// Build the transport from the chat configuration.
    pub fn new(config: &ChatConfig) -> Result<Self, ChatError> {
        let transport = Self::with_candidates(
            config.endpoint_candidates(),
            Duration::from_millis(config.request_timeout_ms),
        )?;
        Ok(match config.origin.as_deref() {
            Some(origin) => transport.with_origin(origin),
            None => transport,
        })
    }

    /// Build the transport over an explicit candidate list.
    pub fn with_candidates(candidates: Vec<String>, timeout: Duration) -> Result<Self, ChatError> {
        if candidates.is_empty() {
            return Err(ChatError::NoCandidates);
        }
        for candidate in candidates.iter().filter(|c| !c.starts_with('/')) {
            reqwest::Url::parse(candidate)
                .map_err(|e| ChatError::InvalidEndpoint(format!("{}: {}", candidate, e)))?;
        }
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ChatError::ClientBuild(e.to_string()))?;
        Ok(Self {
            client,
            candidates,
            origin: None,
            timeout,
        })
    }

    /// Origin that root-relative candidates are resolved against.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn resolve(&self, candidate: &str) -> Result<String, TransportFailure> {
        if !candidate.starts_with('/') {
            return Ok(candidate.to_string());
        }
        match self.origin.as_deref() {
            Some(origin) => Ok(format!("{}{}", origin.trim_end_matches('/'), candidate)),
            None => Err(TransportFailure::UnresolvedEndpoint(candidate.to_string())),
        }
    }

    async fn attempt(&self, url: &str, body: &ChatRequest) -> Result<ChatReply, TransportFailure> {
        let resp = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(request_failure)?;

        let status = resp.status();
        if !status.is_success() {
            // The status decides the outcome even when the body is unreadable.
            let response = resp
                .text()
                .await
                .ok()
                .and_then(|text| serde_json::from_str::<ChatReply>(&text).ok())
                .map(|reply| reply.response);
            return Err(TransportFailure::Status {
                status: status.as_u16(),
                response,
            });
        }

        let text = resp.text().await.map_err(request_failure)?;
        serde_json::from_str::<ChatReply>(&text)
            .map_err(|e| TransportFailure::MalformedBody(e.to_string()))
    }
}

#[async_trait]
impl ChatBackend for HttpTransport {
    async fn send(&self, message: &str, locale: &Locale) -> TransportOutcome {
        let body = ChatRequest {
            message: message.to_string(),
            language: locale.tag().to_string(),
        };

        let mut last = None;
        for candidate in &self.candidates {
            let result = match self.resolve(candidate) {
                Ok(url) => {
                    debug!(url = %url, "Attempting chat endpoint");
                    self.attempt(&url, &body).await
                }
                Err(failure) => Err(failure),
            };

            match result {
                Ok(reply) => {
                    let has_links = reply
                        .has_links
                        .unwrap_or_else(|| contains_anchor(&reply.response));
                    info!(endpoint = %candidate, has_links, "Chat endpoint answered");
                    return TransportOutcome::Success {
                        response: reply.response,
                        has_links,
                    };
                }
                Err(failure) => {
                    warn!(endpoint = %candidate, error = %failure, "Chat endpoint failed");
                    let stop = failure.is_rate_limited();
                    last = Some(failure);
                    if stop {
                        break;
                    }
                }
            }
        }

        // Candidates are never empty, so at least one failure was recorded.
        match last {
            Some(failure) => TransportOutcome::from_failure(failure),
            None => TransportOutcome::Exhausted {
                last: TransportFailure::Network("no endpoint attempted".to_string()),
            },
        }
    }
}

fn request_failure(err: reqwest::Error) -> TransportFailure {
    if err.is_timeout() {
        TransportFailure::Timeout
    } else {
        TransportFailure::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16, response: Option<&str>) -> TransportFailure {
        TransportFailure::Status {
            status,
            response: response.map(str::to_string),
        }
    }

    #[test]
    fn test_429_is_rate_limited_even_with_body() {
        assert_eq!(
            TransportOutcome::from_failure(status(429, Some("slow down"))),
            TransportOutcome::RateLimited
        );
    }

    #[test]
    fn test_client_error_with_message_is_surfaced() {
        assert_eq!(
            TransportOutcome::from_failure(status(400, Some("Message is required."))),
            TransportOutcome::ClientError {
                status: 400,
                response: "Message is required.".to_string()
            }
        );
    }

    #[test]
    fn test_client_error_without_usable_body_is_exhausted() {
        for failure in [status(400, None), status(422, Some(""))] {
            assert!(matches!(
                TransportOutcome::from_failure(failure),
                TransportOutcome::Exhausted { .. }
            ));
        }
    }

    #[test]
    fn test_404_and_5xx_are_exhausted() {
        for code in [404, 500, 503] {
            assert!(matches!(
                TransportOutcome::from_failure(status(code, Some("nope"))),
                TransportOutcome::Exhausted { .. }
            ));
        }
    }

    #[test]
    fn test_timeout_is_exhausted() {
        assert_eq!(
            TransportOutcome::from_failure(TransportFailure::Timeout),
            TransportOutcome::Exhausted {
                last: TransportFailure::Timeout
            }
        );
    }

    #[test]
    fn test_empty_candidate_list_is_rejected() {
        let result = HttpTransport::with_candidates(vec![], Duration::from_secs(1));
        assert!(matches!(result, Err(ChatError::NoCandidates)));
    }

    #[test]
    fn test_unparseable_candidate_is_rejected() {
        let result =
            HttpTransport::with_candidates(vec!["not a url".to_string()], Duration::from_secs(1));
        assert!(matches!(result, Err(ChatError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_new_uses_config_candidates_in_order() {
        let transport = HttpTransport::new(&ChatConfig::default()).unwrap();
        assert_eq!(
            transport.candidates(),
            &["/api/chat".to_string(), "http://localhost:5000/api/chat".to_string()]
        );
        assert_eq!(transport.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_relative_candidate_needs_origin() {
        let transport =
            HttpTransport::with_candidates(vec!["/api/chat".to_string()], Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            transport.resolve("/api/chat"),
            Err(TransportFailure::UnresolvedEndpoint("/api/chat".to_string()))
        );

        let transport = transport.with_origin("https://folio.dev/");
        assert_eq!(
            transport.resolve("/api/chat").unwrap(),
            "https://folio.dev/api/chat"
        );
        assert_eq!(
            transport.resolve("http://localhost:5000/api/chat").unwrap(),
            "http://localhost:5000/api/chat"
        );
    }

    #[tokio::test]
    async fn test_unresolvable_single_candidate_is_exhausted() {
        let transport =
            HttpTransport::with_candidates(vec!["/api/chat".to_string()], Duration::from_secs(1))
                .unwrap();
        let outcome = transport.send("hello", &Locale::default()).await;
        assert!(matches!(
            outcome,
            TransportOutcome::Exhausted {
                last: TransportFailure::UnresolvedEndpoint(_)
            }
        ));
    }
}
