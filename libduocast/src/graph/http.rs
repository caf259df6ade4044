//! reqwest-backed Graph API transport

use async_trait::async_trait;
use serde_json::Value;

use super::{GraphResponse, GraphTransport};
use crate::error::{PlatformError, Result};

/// Graph API client over HTTPS
///
/// Holds a single `reqwest::Client` so connections are pooled across the
/// calls of a sequence.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    http_client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport rooted at a versioned base URL, e.g.
    /// `https://graph.facebook.com/v18.0`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl GraphTransport for HttpTransport {
    async fn post(&self, path: &str, body: Value) -> Result<GraphResponse> {
        let url = self.url_for(path);
        tracing::debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| PlatformError::Network(format!("request to {} failed: {}", path, e)))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            PlatformError::Network(format!("reading response from {} failed: {}", path, e))
        })?;

        let body: Value = serde_json::from_str(&text).map_err(|e| {
            PlatformError::MalformedResponse(format!(
                "{} returned HTTP {} with a non-JSON body: {}",
                path, status, e
            ))
        })?;

        tracing::debug!(status, "Response from {}", path);
        Ok(GraphResponse::new(status, body))
    }
}
