//! HTTP transport for the `generateContent` endpoint.
//!
//! One blocking-style exchange per call: POST the request body, surface
//! non-2xx statuses as [`Error::Remote`] with the provider's error message.
//! No retries, no local recovery.

use std::collections::HashMap;

use serde_json::Value;

use crate::config::GeminiConfig;
use crate::error::Error;
use crate::Result;

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// One `models/{model}:generateContent` exchange.
    pub async fn generate_content(&self, model: &str, body: &Value) -> Result<Value> {
        self.post(&format!("/models/{model}:generateContent"), body)
            .await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "sending request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(TransportError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Remote {
                status: status.as_u16(),
                message: extract_error_message(&text),
            });
        }

        let json = response.json().await.map_err(TransportError::Http)?;
        Ok(json)
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Pull `error.message` out of a Gemini error body, falling back to the
/// raw text.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<HashMap<String, Value>>(body)
        .ok()
        .and_then(|m| {
            m.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|v| v.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_provider_error_message() {
        let body = r#"{"error": {"code": 400, "message": "Invalid function calling mode.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(extract_error_message(body), "Invalid function calling mode.");
    }

    #[test]
    fn falls_back_to_raw_body() {
        assert_eq!(extract_error_message("not json"), "not json");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = GeminiConfig::new("k").with_base_url("http://localhost:1234/");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.base_url, "http://localhost:1234");
    }
}
