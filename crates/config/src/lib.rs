//! Configuration loading, validation, and management for Packed.
//!
//! Loads configuration from `~/.packed/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use packed_core::AuthContext;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The root configuration structure.
///
/// Maps directly to `~/.packed/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the packing-list API (without trailing slash)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer token for authenticated requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Owner identifier sent when creating a list
    #[serde(default = "default_owner_id")]
    pub owner_id: i64,

    /// Per-request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Submission pipeline settings
    #[serde(default)]
    pub submission: SubmissionConfig,
}

fn default_api_url() -> String {
    "http://localhost:8005/api".into()
}
fn default_owner_id() -> i64 {
    1
}
fn default_request_timeout_secs() -> u64 {
    30
}

fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &redact(&self.api_token))
            .field("owner_id", &self.owner_id)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("submission", &self.submission)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Delete a freshly created list when attaching its items fails.
    #[serde(default)]
    pub rollback_orphaned_lists: bool,
}

impl AppConfig {
    /// Load configuration from the default path (~/.packed/config.toml).
    ///
    /// Environment variables override the file:
    /// - `PACKED_API_URL`
    /// - `PACKED_API_TOKEN`
    /// - `PACKED_OWNER_ID`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Apply `PACKED_*` overrides read through `lookup`.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(url) = lookup("PACKED_API_URL") {
            self.api_url = url;
        }

        if let Some(token) = lookup("PACKED_API_TOKEN") {
            self.api_token = Some(token);
        }

        if let Some(owner) = lookup("PACKED_OWNER_ID") {
            self.owner_id = owner.parse().map_err(|_| {
                ConfigError::ValidationError(format!("PACKED_OWNER_ID is not an integer: {owner}"))
            })?;
        }
        Ok(())
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".packed")
    }

    fn normalize(&mut self) {
        self.api_url = self.api_url.trim_end_matches('/').to_string();
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "api_url must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }

        if !(1..=600).contains(&self.request_timeout_secs) {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be between 1 and 600".into(),
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The authentication context for outgoing requests.
    pub fn auth(&self) -> AuthContext {
        AuthContext::from_token(self.api_token.clone())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_token: None,
            owner_id: default_owner_id(),
            request_timeout_secs: default_request_timeout_secs(),
            submission: SubmissionConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
