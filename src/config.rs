//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::dto::{SortBy, SortOrder};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub identity: IdentityConfig,

    #[serde(default)]
    pub leaderboard: LeaderboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Bound on establishing the TCP connection alone
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout() -> u64 {
    120 // two model generations per request
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

/// Anonymous identity storage configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityConfig {
    /// Storage file; platform data dir when unset
    pub path: Option<String>,
}

impl IdentityConfig {
    /// Resolved storage file, `None` when no platform data dir exists
    pub fn resolved_path(&self) -> Option<PathBuf> {
        match &self.path {
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::data_local_dir().map(|p| p.join("battler").join("storage.json")),
        }
    }
}

/// Leaderboard view defaults
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderboardConfig {
    #[serde(default)]
    pub sort_by: SortBy,

    #[serde(default)]
    pub order: SortOrder,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("battler").join("config.toml")),
            Some(PathBuf::from("./battler.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("BATTLER_API_URL") {
            self.api.base_url = url;
        }
        if let Some(timeout) = lookup("BATTLER_REQUEST_TIMEOUT") {
            match timeout.parse() {
                Ok(secs) => self.api.request_timeout_secs = secs,
                Err(_) => tracing::warn!("Ignoring invalid BATTLER_REQUEST_TIMEOUT: {}", timeout),
            }
        }

        if let Some(timeout) = lookup("BATTLER_CONNECT_TIMEOUT") {
            match timeout.parse() {
                Ok(secs) => self.api.connect_timeout_secs = secs,
                Err(_) => tracing::warn!("Ignoring invalid BATTLER_CONNECT_TIMEOUT: {}", timeout),
            }
        }

        if let Some(path) = lookup("BATTLER_IDENTITY_PATH") {
            self.identity.path = Some(path);
        }

        if let Some(level) = lookup("BATTLER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("BATTLER_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Battler Configuration
#
# Environment variables override these settings:
# - BATTLER_API_URL
# - BATTLER_REQUEST_TIMEOUT
# - BATTLER_CONNECT_TIMEOUT
# - BATTLER_IDENTITY_PATH
# - BATTLER_LOG_LEVEL
# - BATTLER_LOG_FORMAT

[api]
# Battle backend base URL
base_url = "http://localhost:8000"

# Request timeout in seconds (battles wait on two model generations)
request_timeout_secs = 120

# Connect timeout in seconds; a backend that cannot be reached within it
# counts as unreachable
connect_timeout_secs = 10

[identity]
# File holding the anonymous user id (default: platform data dir)
# path = "~/.local/share/battler/storage.json"

[leaderboard]
# Default sort field: elo_score, vote_count, organization
sort_by = "elo_score"

# Default sort order: asc, desc
order = "desc"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
