//! Client settings file

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::McpError;
use crate::logging::LogLevel;
use crate::poller::PollOptions;
use crate::retry::RetryOptions;
use crate::stream::ReconnectPolicy;

/// Environment variable overriding `backend.base_url`
pub const ENV_BASE_URL: &str = "LYNX_MCP_BASE_URL";

/// Environment variable overriding `backend.api_token`
pub const ENV_API_TOKEN: &str = "LYNX_MCP_API_TOKEN";

/// Client settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Backend configuration
    #[serde(default)]
    pub backend: BackendSettings,

    /// Retry configuration for critical operations
    #[serde(default)]
    pub retry: RetrySettings,

    /// Task polling configuration
    #[serde(default)]
    pub poll: PollSettings,

    /// Log stream configuration
    #[serde(default)]
    pub stream: StreamSettings,
}

impl Settings {
    /// Load settings from a JSON file, then apply environment overrides.
    ///
    /// A missing file yields the defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, McpError> {
        let path = path.as_ref();
        let mut settings = match tokio::fs::read_to_string(path).await {
            Ok(contents) => {
                debug!("Loaded settings from {}", path.display());
                serde_json::from_str(&contents)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No settings file at {}, using defaults", path.display());
                Settings::default()
            }
            Err(e) => return Err(e.into()),
        };

        settings.apply_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.backend.base_url = base_url;
        }
        if let Some(token) = lookup(ENV_API_TOKEN).filter(|v| !v.is_empty()) {
            self.backend.api_token = Some(token);
        }
    }
}

/// Backend API settings
#[derive(Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL for the backend API; resource paths start with `/mcp`
    #[serde(default = "default_backend_url")]
    pub base_url: String,

    /// Bearer token sent with every request
    #[serde(default)]
    pub api_token: Option<String>,

    /// Per-request timeout (not applied to push channels)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            api_token: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for BackendSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendSettings")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

/// Retry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    10_000
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl From<&RetrySettings> for RetryOptions {
    fn from(settings: &RetrySettings) -> Self {
        RetryOptions {
            max_retries: settings.max_retries,
            base_delay: Duration::from_millis(settings.base_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
            ..RetryOptions::default()
        }
    }
}

/// Task polling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollSettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_max_attempts() -> u32 {
    60
}

fn default_interval_ms() -> u64 {
    1000
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            interval_ms: default_interval_ms(),
        }
    }
}

impl From<&PollSettings> for PollOptions {
    fn from(settings: &PollSettings) -> Self {
        PollOptions {
            max_attempts: settings.max_attempts,
            interval: Duration::from_millis(settings.interval_ms),
        }
    }
}

/// Log stream settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamSettings {
    /// Keep the channel open for new records
    #[serde(default = "default_true")]
    pub follow: bool,

    #[serde(default)]
    pub reconnect: ReconnectSettings,
}

fn default_true() -> bool {
    true
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            follow: true,
            reconnect: ReconnectSettings::default(),
        }
    }
}

/// Reconnection settings; zero attempts disables reconnection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconnectSettings {
    #[serde(default)]
    pub max_attempts: u32,

    #[serde(default = "default_reconnect_delay_ms")]
    pub delay_ms: u64,
}

fn default_reconnect_delay_ms() -> u64 {
    2000
}

impl Default for ReconnectSettings {
    fn default() -> Self {
        Self {
            max_attempts: 0,
            delay_ms: default_reconnect_delay_ms(),
        }
    }
}

impl From<&ReconnectSettings> for ReconnectPolicy {
    fn from(settings: &ReconnectSettings) -> Self {
        ReconnectPolicy {
            max_attempts: settings.max_attempts,
            delay: Duration::from_millis(settings.delay_ms),
        }
    }
}
