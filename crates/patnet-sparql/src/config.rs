//! Configuration for the linked-data client

use serde::{Deserialize, Serialize};

/// Default SPARQL endpoint
pub const DEFAULT_ENDPOINT: &str = "https://data.epo.org/linked-data/query";

/// Default timeout for a single request (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay before the first retry; doubled on each further attempt
pub const DEFAULT_BACKOFF_MS: u64 = 1000;

/// Settings for [`crate::LinkedDataClient`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// SPARQL query endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// Attempts per request (1 disables retrying)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry in milliseconds
    #[serde(default = "default_backoff")]
    pub retry_backoff_ms: u64,

    /// User-Agent header; the entity documents reject unknown agents
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Language tag the title of invention must match
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_backoff() -> u64 {
    DEFAULT_BACKOFF_MS
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_backoff(),
            user_agent: default_user_agent(),
            language: default_language(),
        }
    }
}

impl ClientConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(format!("endpoint must be an http(s) URL, got '{}'", self.endpoint));
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.max_retries == 0 {
            return Err("max_retries must be at least 1".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent cannot be empty".to_string());
        }
        // Interpolated into a string literal of the query
        if self.language.is_empty()
            || !self.language.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(format!("language must be a language tag, got '{}'", self.language));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
