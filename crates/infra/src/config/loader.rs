//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the required variables are missing, falls back to a config file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Secrets (`OPENAI_API_KEY`, `GOOGLE_CLIENT_SECRET`) are only ever read from
//! the environment; when loading from a file they are overlaid afterwards.
//!
//! ## Environment Variables
//! - `OPENAI_API_KEY`: OpenAI API key (required)
//! - `GOOGLE_CLIENT_ID`: Google OAuth client id (required)
//! - `GOOGLE_CLIENT_SECRET`: Google OAuth client secret (required)
//! - `SLOTBOT_HOST`: Bind address (default `127.0.0.1`)
//! - `SLOTBOT_PORT`: Bind port (default `8000`)
//! - `SLOTBOT_OPENAI_MODEL`: Chat model (default `gpt-4o-mini`)
//! - `SLOTBOT_CALENDAR_ID`: Calendar to book against (default `primary`)
//! - `SLOTBOT_TOKEN_PATH`: OAuth token file path (default `token.json`)
//! - `SLOTBOT_SESSION_IDLE_SECS`: Session idle timeout (default `3600`)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./slotbot.json` or `./slotbot.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use slotbot_domain::constants::DEFAULT_SESSION_IDLE_SECS;
use slotbot_domain::{
    CalendarConfig, Config, OpenAiConfig, Result, ServerConfig, SessionConfig, SlotBotError,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `SlotBotError::Config` if configuration cannot be loaded from
/// either source, or the file format is invalid.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// The secret variables must be present; everything else has a default.
///
/// # Errors
/// Returns `SlotBotError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<Config> {
    let api_key = env_var("OPENAI_API_KEY")?;
    let client_id = env_var("GOOGLE_CLIENT_ID")?;
    let client_secret = env_var("GOOGLE_CLIENT_SECRET")?;

    let host = env_or("SLOTBOT_HOST", "127.0.0.1");
    let port = env_parse::<u16>("SLOTBOT_PORT", 8000)?;
    let model = env_or("SLOTBOT_OPENAI_MODEL", "gpt-4o-mini");
    let calendar_id = env_or("SLOTBOT_CALENDAR_ID", "primary");
    let token_path = env_or("SLOTBOT_TOKEN_PATH", "token.json");
    let idle_timeout_secs =
        env_parse::<u64>("SLOTBOT_SESSION_IDLE_SECS", DEFAULT_SESSION_IDLE_SECS)?;

    Ok(Config {
        server: ServerConfig { host, port },
        openai: OpenAiConfig { api_key, model },
        calendar: CalendarConfig { client_id, client_secret, calendar_id, token_path },
        session: SessionConfig { idle_timeout_secs },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files. Supports
/// both JSON and TOML formats (detected by file extension). Secrets are then
/// overlaid from the environment when the file leaves them blank.
///
/// # Errors
/// Returns `SlotBotError::Config` if the file is missing, cannot be found in
/// any probed location, or fails to parse.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SlotBotError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SlotBotError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SlotBotError::Config(format!("Failed to read config file: {}", e)))?;

    let mut config = parse_config(&contents, &config_path)?;
    overlay_secrets(&mut config);
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `SlotBotError::Config` if the format is unsupported or parsing
/// fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SlotBotError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SlotBotError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(SlotBotError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Fill in secrets from the environment when a config file leaves them blank.
/// Config files should never carry secrets; serialization skips them.
fn overlay_secrets(config: &mut Config) {
    if config.openai.api_key.is_empty() {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            config.openai.api_key = key;
        }
    }
    if config.calendar.client_secret.is_empty() {
        if let Ok(secret) = std::env::var("GOOGLE_CLIENT_SECRET") {
            config.calendar.client_secret = secret;
        }
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parent, and the executable's
/// directory for `config.{json,toml}` and `slotbot.{json,toml}`.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("slotbot.json"),
            cwd.join("slotbot.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("slotbot.json"),
                exe_dir.join("slotbot.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `SlotBotError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        SlotBotError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Environment variable with a fallback default.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a numeric environment variable, falling back to `default` when
/// unset.
fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| SlotBotError::Config(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}
