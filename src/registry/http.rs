//! HTTP utilities for registry API calls

use crate::error::FetchError;
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Maximum length of response body to log on errors
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Per-request timeout; a hung upstream stalls only its own fetch
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        format!(
            "{}... [truncated, {} bytes total]",
            &body[..MAX_LOG_BODY_LENGTH],
            body.len()
        )
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// HTTP client wrapper for registry API calls
#[derive(Clone)]
pub struct RegistryClient {
    client: Client,
}

impl RegistryClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("nucat/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Fetch a JSON document from the registry.
    ///
    /// Issues one GET with no retries. The decoded value is returned without
    /// structural validation; each caller decodes it into its own document
    /// type.
    pub async fn fetch_json(&self, url: &str) -> std::result::Result<Value, FetchError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        if !status.is_success() {
            tracing::error!("registry error: {} - {}", status, sanitize_for_log(&body));
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        serde_json::from_str(&body).map_err(|source| {
            tracing::error!(
                "invalid JSON from {}: {}",
                url,
                sanitize_for_log(&body)
            );
            FetchError::Decode {
                url: url.to_string(),
                source,
            }
        })
    }
}

impl Default for RegistryClient {
    fn default() -> Self {
        Self::new().expect("Failed to create default HTTP client")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.contains("[truncated, 500 bytes total]"));
        assert!(sanitized.len() < body.len());
    }

    #[test]
    fn sanitize_strips_control_characters() {
        let sanitized = sanitize_for_log("ab\x07cd\nef");
        assert_eq!(sanitized, "abcdef");
    }
}
