//! Configuration management for the LiteLLM proxy
//!
//! Configuration is loaded once from environment variables (optionally seeded
//! from a `.env` file) and is immutable for the lifetime of the process.

use std::env::{self, VarError};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::Level;

/// Default upstream LiteLLM base URL
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://llm.api.domain.com/v1";
/// Default log file, appended to on every run
pub const DEFAULT_LOG_FILE: &str = "proxy_litellm.log";
/// Default outbound round-trip timeout
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Upstream base URL; the proxied path suffix is appended verbatim
    pub upstream_base_url: String,
    /// Application identity injected as the `app_id` query parameter
    pub app_id: String,
    /// Forwarded verbatim as `Authorization`
    pub ds_key: String,
    /// Forwarded as `X-LiteLLM-Key`, Bearer-prefixed when needed
    pub litellm_api_key: String,

    /// Timeout covering connect, send and receive of the upstream call
    pub upstream_timeout: Duration,

    pub logging: LoggingConfig,
}

/// Log verbosity and destination
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: Level,
    /// Append-only log file; console output is always kept as well
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            app_id: String::new(),
            ds_key: String::new(),
            litellm_api_key: String::new(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name))
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Absent variables take their defaults. A variable that is present but not
    /// valid Unicode is treated as an unreadable environment and fails loading.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let defaults = Self::default();
        let var = |name: &str, default: &str| -> Result<String> {
            match lookup(name) {
                Ok(value) => Ok(value),
                Err(VarError::NotPresent) => Ok(default.to_string()),
                Err(VarError::NotUnicode(_)) => bail!("{} is not valid unicode", name),
            }
        };

        Ok(Self {
            host: var("PROXY_HOST", &defaults.host)?,
            port: var("PROXY_PORT", &defaults.port.to_string())?
                .parse()
                .context("Invalid PROXY_PORT")?,

            upstream_base_url: var("LITELLM_BASE_URL", DEFAULT_UPSTREAM_BASE_URL)?,
            app_id: var("DS_APP_ID", "")?,
            ds_key: var("DS_KEY", "")?,
            litellm_api_key: var("LITELLM_API_KEY", "")?,

            upstream_timeout: Duration::from_secs(
                var(
                    "UPSTREAM_TIMEOUT_SECS",
                    &DEFAULT_UPSTREAM_TIMEOUT_SECS.to_string(),
                )?
                .parse()
                .context("Invalid UPSTREAM_TIMEOUT_SECS")?,
            ),

            logging: LoggingConfig {
                level: parse_log_level(&var("LOG_LEVEL", "INFO")?),
                file: PathBuf::from(var("LOG_FILE", DEFAULT_LOG_FILE)?),
            },
        })
    }
}

/// Map a level name to a tracing level, falling back to INFO for unknown names.
///
/// `WARNING` and `CRITICAL` are accepted alongside the tracing names.
pub fn parse_log_level(name: &str) -> Level {
    match name.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "WARNING" | "WARN" => Level::WARN,
        "ERROR" | "CRITICAL" => Level::ERROR,
        _ => Level::INFO,
    }
}
