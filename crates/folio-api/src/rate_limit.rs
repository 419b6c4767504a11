//! Fixed-window rate limiter keyed by client address.
//!
//! Each client gets `max_requests` per window. The window opens with the
//! client's first request and resets once it has fully elapsed. Applied as
//! an axum middleware on the chat route.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// Body text of a 429 answer.
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests. Please wait a moment.";

/// Key used when the client address is not known.
const UNKNOWN_CLIENT: &str = "unknown";

/// Expired windows are swept once the map grows past this many clients.
const SWEEP_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    started: Instant,
}

/// Shared state for the rate limiter.
#[derive(Clone)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    clients: Arc<Mutex<HashMap<String, Window>>>,
}

impl RateLimiter {
    /// Allow `max_requests` per `window` for each client.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Try to admit one request from `client`.
    pub fn try_acquire(&self, client: &str) -> bool {
        self.try_acquire_at(client, Instant::now())
    }

    fn try_acquire_at(&self, client: &str, now: Instant) -> bool {
        let mut clients = match self.clients.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if clients.len() > SWEEP_THRESHOLD {
            let window = self.window;
            clients.retain(|_, w| now.duration_since(w.started) < window);
        }

        if let Some(w) = clients.get_mut(client) {
            if now.duration_since(w.started) < self.window {
                if w.count >= self.max_requests {
                    return false;
                }
                w.count += 1;
                return true;
            }
        }

        clients.insert(
            client.to_string(),
            Window {
                count: 1,
                started: now,
            },
        );
        true
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.clients.lock().map(|c| c.len()).unwrap_or(0)
    }
}

/// The client address, as recorded by the server's connect info.
fn client_key(req: &Request) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Axum middleware that enforces the rate limit.
pub async fn rate_limit_middleware(
    axum::extract::Extension(limiter): axum::extract::Extension<RateLimiter>,
    req: Request,
    next: Next,
) -> Response {
    let client = client_key(&req);
    if limiter.try_acquire(&client) {
        next.run(req).await
    } else {
        tracing::warn!(client = %client, "Rate limit exceeded");
        ApiError::TooManyRequests(RATE_LIMIT_MESSAGE.to_string()).into_response()
    }
}
