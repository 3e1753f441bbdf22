//! Client configuration from environment variables

use std::time::Duration;

use crate::utils::constants::{DEFAULT_API_URL, DEFAULT_API_PREFIX};

/// Where the API lives and how requests are sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Server origin, e.g. `http://127.0.0.1:8000`
    pub api_url: String,
    /// Path prefix of every endpoint, e.g. `/api`
    pub api_prefix: String,
    /// Optional overall timeout per request. `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// - `EXPENSES_API_URL`: server origin (default `http://127.0.0.1:8000`)
    /// - `EXPENSES_API_PREFIX`: endpoint prefix (default `/api`)
    /// - `EXPENSES_HTTP_TIMEOUT_SECS`: request timeout in seconds (unset or `0` = none)
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("EXPENSES_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_prefix: std::env::var("EXPENSES_API_PREFIX")
                .unwrap_or_else(|_| DEFAULT_API_PREFIX.to_string()),
            request_timeout: std::env::var("EXPENSES_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Origin and prefix joined, without a trailing slash
    pub fn base_url(&self) -> String {
        let prefix = self.api_prefix.trim_matches('/');
        let origin = self.api_url.trim_end_matches('/');
        if prefix.is_empty() {
            origin.to_string()
        } else {
            format!("{}/{}", origin, prefix)
        }
    }
}
