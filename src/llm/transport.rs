use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::errors::RelayError;

/// Shared HTTP executor for all provider adapters. One JSON POST per call,
/// bounded by a per-request timeout that aborts the in-flight request on
/// expiry. Retry and fallback live above this layer.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
}

impl Transport {
    pub fn new() -> Self {
        Self { client: Client::new() }
    }

    pub async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: &Value,
        timeout: Duration,
    ) -> Result<Value, RelayError> {
        let mut request = self.client.post(url).timeout(timeout).json(body);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                RelayError::Timeout(format!("Request timed out after {}ms", timeout.as_millis()))
            } else {
                RelayError::Network(format!("Request failed: {e}"))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "Non-success response");
            return Err(match status.as_u16() {
                429 => RelayError::RateLimit(format!("HTTP 429: {body_text}")),
                401 | 403 => RelayError::Authentication(format!("HTTP {}: {body_text}", status.as_u16())),
                code => RelayError::Api(format!("HTTP {code}: {body_text}")),
            });
        }

        let raw = response.text().await.map_err(|e| {
            if e.is_timeout() {
                RelayError::Timeout(format!("Response body timed out after {}ms", timeout.as_millis()))
            } else {
                RelayError::Network(format!("Failed to read response body: {e}"))
            }
        })?;

        serde_json::from_str(&raw)
            .map_err(|e| RelayError::Parse(format!("Malformed JSON response: {e}")))
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}
