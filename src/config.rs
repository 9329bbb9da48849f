//! Client Configuration
//!
//! One origin serves both the list endpoint and the create endpoint.
//! Images are resolved against `asset_base_url`, which falls back to
//! `base_url` when unset.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(String),

    #[error("Invalid config JSON: {0}")]
    Parse(String),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Read(_) => "SCHOOLDIR_CONFIG_READ",
            ConfigError::Parse(_) => "SCHOOLDIR_CONFIG_PARSE",
            ConfigError::Invalid { .. } => "SCHOOLDIR_CONFIG_INVALID",
        }
    }
}

/// School directory client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Origin for `/api/schools` (default: the hosted school server)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Origin for school images (default: `base_url`)
    #[serde(default)]
    pub asset_base_url: Option<String>,

    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Delay before the on-success notification, in milliseconds (default: 2000)
    #[serde(default = "default_success_delay_ms")]
    pub success_delay_ms: u64,
}

fn default_base_url() -> String {
    "https://schoolmanagement-server.onrender.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_success_delay_ms() -> u64 {
    2000
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            asset_base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            success_delay_ms: default_success_delay_ms(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at the given origin
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Load configuration from a JSON file and validate it
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;

        let config: ClientConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Check the values that would make every request fail
    pub fn validate(&self) -> ConfigResult<()> {
        check_origin("base_url", &self.base_url)?;

        if let Some(assets) = &self.asset_base_url {
            check_origin("asset_base_url", assets)?;
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "request_timeout_secs",
                reason: "must be > 0".into(),
            });
        }

        Ok(())
    }

    /// Endpoint for listing and creating schools
    pub fn schools_url(&self) -> String {
        format!("{}/api/schools", self.base_url.trim_end_matches('/'))
    }

    /// Origin images are resolved against
    pub fn asset_base(&self) -> &str {
        self.asset_base_url
            .as_deref()
            .unwrap_or(&self.base_url)
            .trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn success_delay(&self) -> Duration {
        Duration::from_millis(self.success_delay_ms)
    }
}

fn check_origin(field: &'static str, value: &str) -> ConfigResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid {
            field,
            reason: "must not be empty".into(),
        });
    }
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            field,
            reason: format!("'{}' is not an http(s) URL", value),
        });
    }
    Ok(())
}
