//! Graph API transport
//!
//! Every publisher talks to the remote Graph API through the
//! [`GraphTransport`] trait: a single JSON `POST` per call, answered with a
//! decoded JSON body. [`HttpTransport`] is the real client; [`MockTransport`]
//! records calls and replays scripted replies for tests.
//!
//! # Example
//!
//! ```no_run
//! use libduocast::graph::{GraphTransport, HttpTransport};
//!
//! # async fn example() -> libduocast::Result<()> {
//! let transport = HttpTransport::new("https://graph.facebook.com/v18.0");
//! let response = transport
//!     .post("1234/feed", serde_json::json!({ "message": "hi", "access_token": "..." }))
//!     .await?;
//! println!("created {:?}", response.id());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{PlatformError, Result};

pub mod http;
pub mod mock;

pub use http::HttpTransport;
pub use mock::{MockReply, MockTransport, RecordedCall};

/// Sends one JSON request to the Graph API
#[async_trait]
pub trait GraphTransport: Send + Sync {
    /// `POST {base}/{path}` with `body` as JSON
    ///
    /// Returns the decoded response whatever its HTTP status; callers decide
    /// what counts as success.
    ///
    /// # Errors
    ///
    /// - `PlatformError::Network` if the request itself fails
    /// - `PlatformError::MalformedResponse` if the body is not JSON
    async fn post(&self, path: &str, body: Value) -> Result<GraphResponse>;
}

/// Decoded Graph API response
#[derive(Debug, Clone, PartialEq)]
pub struct GraphResponse {
    pub status: u16,
    pub body: Value,
}

impl GraphResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success_status(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `id` field, accepting both string and numeric forms
    pub fn id(&self) -> Option<String> {
        field_as_string(&self.body, "id")
    }

    /// The `post_id` field some Facebook endpoints return
    pub fn post_id(&self) -> Option<String> {
        field_as_string(&self.body, "post_id")
    }

    /// `id`, or `post_id` when `id` is absent
    pub fn published_id(&self) -> Option<String> {
        self.id().or_else(|| self.post_id())
    }

    /// Whether the body carries an `error` object
    pub fn has_error(&self) -> bool {
        self.body.get("error").is_some_and(|e| !e.is_null())
    }

    /// `error.message`, empty if the error object has no message
    pub fn error_message(&self) -> Option<String> {
        if !self.has_error() {
            return None;
        }

        Some(
            self.body["error"]
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        )
    }

    /// Identifier of a container created by an intermediate call
    ///
    /// # Errors
    ///
    /// - `PlatformError::RemoteRejection` if the body carries an error object
    /// - `PlatformError::MalformedResponse` on a non-2xx status without an
    ///   error object, or when no `id` is present
    pub fn into_container_id(self, step: &str) -> Result<String> {
        if let Some(message) = self.error_message() {
            return Err(PlatformError::RemoteRejection(message).into());
        }

        if !self.is_success_status() {
            return Err(PlatformError::MalformedResponse(format!(
                "{} returned HTTP {} without an error object",
                step, self.status
            ))
            .into());
        }

        self.id().ok_or_else(|| {
            PlatformError::MalformedResponse(format!("{} response has no id", step)).into()
        })
    }
}

fn field_as_string(body: &Value, field: &str) -> Option<String> {
    match body.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
