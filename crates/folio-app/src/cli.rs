//! CLI argument definitions for the Folio application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use folio_core::config::ChatConfig;

/// Folio - a portfolio chat assistant and the server that answers it.
#[derive(Parser, Debug)]
#[command(name = "folio", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive chat in the terminal.
    Chat(ClientArgs),
    /// Ask a single question and print the answer.
    Ask {
        /// The question. Multiple words are joined with spaces.
        #[arg(required = true)]
        message: Vec<String>,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Run the chat API server.
    Serve {
        /// API server port.
        #[arg(short = 'p', long = "port")]
        port: Option<u16>,
    },
}

/// Options shared by the chat client commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ClientArgs {
    /// Language tag sent with each message (en, tl, zh).
    #[arg(long = "lang")]
    pub lang: Option<String>,

    /// Chat API base URL. Replaces the default endpoint list.
    #[arg(long = "api-base-url")]
    pub api_base_url: Option<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > FOLIO_CONFIG env var > ~/.folio/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("FOLIO_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level override.
    ///
    /// Returns `None` if not overridden on the command line.
    pub fn resolve_log_level(&self) -> Option<String> {
        self.log_level.clone()
    }
}

/// API server port.
///
/// Priority: --port flag > FOLIO_PORT env var > config file value > 5000.
pub fn resolve_port(flag: Option<u16>, config_port: u16) -> u16 {
    pick_port(flag, std::env::var("FOLIO_PORT").ok(), config_port)
}

fn pick_port(flag: Option<u16>, env: Option<String>, config_port: u16) -> u16 {
    if let Some(p) = flag {
        return p;
    }
    if let Some(p) = env.and_then(|val| val.parse::<u16>().ok()) {
        return p;
    }
    if config_port != 0 {
        return config_port;
    }
    5000
}

impl ClientArgs {
    /// Language tag. Priority: --lang flag > config file value.
    pub fn resolve_language(&self, config_language: &str) -> String {
        self.lang
            .clone()
            .unwrap_or_else(|| config_language.to_string())
    }

    /// Apply the base URL override to a chat configuration.
    ///
    /// Priority: --api-base-url flag > FOLIO_API_BASE_URL env var > config.
    pub fn apply_to(&self, chat: &mut ChatConfig) {
        self.apply_with_env(chat, std::env::var("FOLIO_API_BASE_URL").ok());
    }

    fn apply_with_env(&self, chat: &mut ChatConfig, env: Option<String>) {
        if let Some(url) = self.api_base_url.clone().or(env) {
            chat.api_base_url = Some(url);
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".folio").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".folio").join("config.toml");
    }
    PathBuf::from("config.toml")
}
