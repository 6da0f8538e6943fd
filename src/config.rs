//! Application configuration parsed from environment variables.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_MIN_TRANSITION_SECONDS: f64 = 2.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {var}")]
    MissingVar { var: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Portal backend base URL, no trailing slash.
    pub base_url: String,
    /// CSRF token forwarded on every mutating request, when issued.
    pub csrf_token: Option<String>,
    /// Minimum time every loading step stays visible.
    pub min_transition: Duration,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `CERTFLOW_BASE_URL`
    ///
    /// Optional:
    /// - `CERTFLOW_CSRF_TOKEN`: sent as `X-CSRFToken` when present
    /// - `CERTFLOW_MIN_TRANSITION_SECONDS`: default 2.0
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("CERTFLOW_BASE_URL")
            .map_err(|_| ConfigError::MissingVar { var: "CERTFLOW_BASE_URL" })?
            .trim_end_matches('/')
            .to_string();
        let csrf_token = std::env::var("CERTFLOW_CSRF_TOKEN").ok().filter(|t| !t.is_empty());
        let min_transition = transition_floor(
            std::env::var("CERTFLOW_MIN_TRANSITION_SECONDS").ok().as_deref(),
        );

        Ok(Self { base_url, csrf_token, min_transition })
    }
}

/// Parse the transition floor, falling back to the default on absent,
/// malformed or negative values.
fn transition_floor(raw: Option<&str>) -> Duration {
    let secs = raw
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|s| s.is_finite() && *s >= 0.0)
        .unwrap_or(DEFAULT_MIN_TRANSITION_SECONDS);
    Duration::from_secs_f64(secs)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
