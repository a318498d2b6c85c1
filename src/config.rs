//! Client configuration.
//!
//! The credential is an explicit field of [`GeminiConfig`], injected into
//! session construction, rather than an ambient global read. The
//! environment lookup is one constructor among others so tests can inject
//! a key (or a mock base URL) directly.

use std::env;
use std::time::Duration;

use keyring::Entry;

use crate::error::Error;
use crate::Result;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const KEYRING_SERVICE: &str = "gemini-toolcall";
const ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Connection settings for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Resolve the API key from the OS keyring (`gemini-toolcall` service),
    /// then from `GEMINI_API_KEY` / `GOOGLE_API_KEY`.
    ///
    /// Absence is a fatal [`Error::Configuration`] raised before any
    /// network call is attempted.
    pub fn from_env() -> Result<Self> {
        if let Some(key) = Self::resolve_api_key() {
            return Ok(Self::new(key));
        }
        Err(Error::configuration(format!(
            "no API key found: set {} or store one in the OS keyring",
            ENV_VARS.join(" or ")
        )))
    }

    fn resolve_api_key() -> Option<String> {
        if let Ok(entry) = Entry::new(KEYRING_SERVICE, "api-key") {
            if let Ok(key) = entry.get_password() {
                return Some(key);
            }
        }
        ENV_VARS
            .iter()
            .find_map(|var| env::var(var).ok().filter(|k| !k.is_empty()))
    }

    /// Point the client at a different endpoint (e.g. a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_key_keeps_defaults() {
        let config = GeminiConfig::new("test-key");
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn base_url_override() {
        let config = GeminiConfig::new("k").with_base_url("http://127.0.0.1:9999");
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
    }
}
