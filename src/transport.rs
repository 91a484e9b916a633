//! Outbound JSON POST seam between the client and the remote API.

use crate::credential::Credential;
use crate::error::{InsightError, Result};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Default base URL of the hosted text-analysis API.
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `path` (relative to the base URL) and return the decoded JSON body.
    async fn post_json(&self, path: &str, body: Value) -> Result<Value>;
}

/// reqwest-backed transport with fixed bearer-auth and JSON headers.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
}

impl HttpTransport {
    pub fn new(credential: &Credential, base_url: &str, timeout_ms: u64) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&credential.bearer_header()).map_err(|_| {
            InsightError::Config {
                message: "API credential contains characters not allowed in a header".to_string(),
            }
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| InsightError::Config {
                message: format!("Failed to build reqwest client with timeout: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_ms,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn classify(&self, path: &str, err: reqwest::Error) -> InsightError {
        if err.is_timeout() {
            InsightError::Timeout {
                operation: format!("POST {}", path),
                timeout_ms: self.timeout_ms,
            }
        } else {
            err.into()
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(path, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InsightError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| self.classify(path, e))
    }
}
