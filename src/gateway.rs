//! Request gateway — single authenticated JSON call, normalized result.
//!
//! DESIGN
//! ======
//! `send` always resolves to an [`Envelope`] and never returns `Err`: every
//! caller joins the call with a fixed-minimum-duration animation and cannot
//! unwind without duplicating recovery at each call site. Network-level
//! failures become the synthetic connection-error envelope instead.

use std::time::Duration;

use crate::wire::Envelope;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// CSRF header the backend expects when a page token is present.
const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// Backend call seam. Mocked in controller tests.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    /// POST `body` as JSON to `path` and normalize the response.
    async fn send(&self, path: &str, body: serde_json::Value) -> Envelope;
}

// =============================================================================
// HTTP GATEWAY
// =============================================================================

pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
    /// Page-provided CSRF token; omitted from requests when absent.
    csrf_token: Option<String>,
}

impl HttpGateway {
    /// Build a gateway for `base_url` (no trailing slash expected).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::HttpClientBuild`] if the HTTP client cannot
    /// be constructed.
    pub fn new(base_url: String, csrf_token: Option<String>) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| GatewayError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url, csrf_token })
    }
}

#[async_trait::async_trait]
impl Gateway for HttpGateway {
    async fn send(&self, path: &str, body: serde_json::Value) -> Envelope {
        let url = format!("{}{path}", self.base_url);

        let mut request = self.http.post(&url).json(&body);
        if let Some(token) = &self.csrf_token {
            request = request.header(CSRF_HEADER, token);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%path, error = %e, "request failed before a response");
                return Envelope::connection_error();
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(%path, error = %e, "response body read failed");
                return Envelope::connection_error();
            }
        };

        tracing::debug!(%path, status = status.as_u16(), "backend responded");
        Envelope::from_parts(status.is_success(), status.as_u16(), &text)
    }
}
