//! Portal configuration.
//!
//! Values come from the process environment (a `.env` file is loaded first
//! when present). The CLI may override the backend URL afterwards.

use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;

use crate::error::{PortalError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_API_URL: &str = "ADMISSION_API_URL";
const ENV_TIMEOUT: &str = "ADMISSION_API_TIMEOUT_SECS";
const ENV_LOG_FORMAT: &str = "ADMISSION_LOG_FORMAT";

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(PortalError::Config(format!(
                "{ENV_LOG_FORMAT} must be `pretty` or `json`, got `{other}`"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Base URL of the admission backend, e.g. `http://localhost:8080`.
    pub api_base_url: Url,
    /// Per-request timeout; a hung backend surfaces as a transport error.
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            // Constant is a valid absolute URL.
            api_base_url: Url::parse(DEFAULT_API_URL).expect("default API URL parses"),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_format: LogFormat::Pretty,
        }
    }
}

impl PortalConfig {
    /// Load from the environment, honouring a `.env` file if one exists.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL) {
            config = config.with_base_url(&url)?;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                PortalError::Config(format!("{ENV_TIMEOUT} must be a whole number of seconds, got `{raw}`"))
            })?;
            if secs == 0 {
                return Err(PortalError::Config(format!("{ENV_TIMEOUT} must be greater than zero")));
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(ENV_LOG_FORMAT) {
            config.log_format = raw.parse()?;
        }

        Ok(config)
    }

    /// Replace the backend URL. Only absolute http(s) URLs are accepted.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self> {
        let url = Url::parse(raw.trim())
            .map_err(|e| PortalError::Config(format!("backend URL `{raw}` is invalid: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(PortalError::Config(format!(
                "backend URL `{raw}` must be an absolute http(s) URL"
            )));
        }
        self.api_base_url = url;
        Ok(self)
    }
}
