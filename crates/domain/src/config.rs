//! Configuration structures
//!
//! Populated by the infra config loader from environment variables or a
//! JSON/TOML file. Secrets (API key, OAuth client secret) only ever come from
//! the environment.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SESSION_IDLE_SECS;

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub openai: OpenAiConfig,
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// HTTP server binding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8000 }
    }
}

/// OpenAI NLU oracle settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key; never written to config files
    #[serde(default, skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

/// Google Calendar adapter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub client_id: String,
    /// OAuth client secret; never written to config files
    #[serde(default, skip_serializing)]
    pub client_secret: String,
    /// Calendar to book against, usually "primary"
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
    /// Path of the persisted OAuth token file
    #[serde(default = "default_token_path")]
    pub token_path: String,
}

fn default_calendar_id() -> String {
    "primary".to_string()
}

fn default_token_path() -> String {
    "token.json".to_string()
}

/// Session store lifecycle settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Sessions idle longer than this are evicted
    pub idle_timeout_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { idle_timeout_secs: DEFAULT_SESSION_IDLE_SECS }
    }
}
