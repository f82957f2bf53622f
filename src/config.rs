//! Client configuration.

use std::time::Duration;

use reqwest::Url;

use crate::error::{McpError, Result};

/// Base URL used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.journalapp.io/api/v1";

/// Per-request timeout used when no override is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "JOURNAL_API_KEY";
/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "JOURNAL_API_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "JOURNAL_API_TIMEOUT_SECS";

/// Connection settings for the journaling backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Base URL all endpoint paths are appended to
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config with the default base URL and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the API key and parse the base URL.
    pub fn validate(&self) -> Result<Url> {
        if self.api_key.trim().is_empty() {
            return Err(McpError::Config(format!("{} is required", API_KEY_ENV)));
        }

        let url = Url::parse(&self.base_url).map_err(|e| {
            McpError::Config(format!("invalid base URL '{}': {}", self.base_url, e))
        })?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(McpError::Config(format!(
                "invalid base URL '{}': expected an http(s) URL",
                self.base_url
            )));
        }

        if self.timeout.is_zero() {
            return Err(McpError::Config("timeout must be greater than zero".to_string()));
        }

        Ok(url)
    }
}
