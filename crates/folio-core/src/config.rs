use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{FolioError, Result};

/// Path every chat endpoint is served under.
pub const CHAT_PATH: &str = "/api/chat";

/// Top-level configuration for Folio.
///
/// Loaded from `~/.folio/config.toml` by default. The `chat` section drives
/// the client side of the conversation, the `server` section the HTTP
/// backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FolioConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl FolioConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FolioConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| FolioError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Language tag sent with every chat request ("en", "tl", "zh").
    pub language: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            language: "en".to_string(),
        }
    }
}

/// Chat client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Explicit API base URL. When set, it is the only endpoint tried.
    pub api_base_url: Option<String>,
    /// Origin the same-origin candidate resolves against.
    pub origin: Option<String>,
    /// Endpoint tried after the same-origin one when no base URL is set.
    pub fallback_url: String,
    /// Per-candidate request timeout in milliseconds.
    pub request_timeout_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            origin: None,
            fallback_url: format!("http://localhost:5000{}", CHAT_PATH),
            request_timeout_ms: 10_000,
        }
    }
}

impl ChatConfig {
    /// Build the ordered list of endpoints a message is attempted against.
    ///
    /// An explicit base URL yields exactly one candidate. Otherwise the
    /// same-origin path comes first, then the fixed fallback address. The
    /// list is never empty.
    pub fn endpoint_candidates(&self) -> Vec<String> {
        match self
            .api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|base| !base.is_empty())
        {
            Some(base) => {
                let base = base.strip_suffix('/').unwrap_or(base);
                vec![format!("{}{}", base, CHAT_PATH)]
            }
            None => vec![CHAT_PATH.to_string(), self.fallback_url.clone()],
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Requests allowed per client address within one window.
    pub rate_limit_max_requests: u32,
    /// Rate limit window length in seconds.
    pub rate_limit_window_secs: u64,
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            rate_limit_max_requests: 10,
            rate_limit_window_secs: 60,
            max_body_bytes: 64 * 1024,
        }
    }
}
