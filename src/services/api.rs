//! Shared HTTP client for the cinema backend.
//!
//! Every endpoint answers with the same JSON envelope: `{message, data}` on
//! success, `{error}` on failure. Session credentials ride on a cookie, so
//! the client keeps a cookie store and a single request timeout.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::config::ApiConfig;
use crate::error::BookingError;

/// Response envelope. `data` is kept raw because its shape differs per
/// endpoint (and has drifted across backend versions for the occupancy one).
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_seconds))
    }

    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::builder()
                .timeout(timeout)
                .cookie_store(true)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Maps a read-path response to its envelope, turning 404/401 and other
    /// non-2xx statuses into the taxonomy errors for `resource`.
    pub(crate) async fn read_envelope(
        resp: reqwest::Response,
        resource: &'static str,
    ) -> Result<Envelope, BookingError> {
        let status = resp.status();
        if status.is_success() {
            return resp
                .json::<Envelope>()
                .await
                .map_err(|e| BookingError::MalformedResponse(e.to_string()));
        }
        match status {
            StatusCode::NOT_FOUND => Err(BookingError::NotFound(resource)),
            StatusCode::UNAUTHORIZED => Err(BookingError::AuthRequired),
            _ => {
                let message = Self::error_message(resp)
                    .await
                    .unwrap_or_else(|| format!("unexpected status {status}"));
                Err(BookingError::Fetch { resource, message })
            }
        }
    }

    /// Best-effort read of the `error` field from a failure body.
    pub(crate) async fn error_message(resp: reqwest::Response) -> Option<String> {
        resp.json::<Envelope>().await.ok().and_then(|env| env.error)
    }
}
