//! Platform publishers
//!
//! A [`Publisher`] turns a normalized [`PostRequest`] into the ordered Graph
//! API calls that publish it on one platform, threading the identifier of
//! each call into the next. Publishers never retry and never undo calls that
//! already succeeded.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use libduocast::config::Config;
//! use libduocast::graph::HttpTransport;
//! use libduocast::platforms::{publisher_for, NoProgress};
//! use libduocast::types::{Platform, PostRequest, PostType};
//!
//! # async fn example() -> libduocast::Result<()> {
//! let config = Arc::new(Config::load()?);
//! let transport = Arc::new(HttpTransport::new(config.graph.base_url.clone()));
//! let publisher = publisher_for(Platform::Facebook, config, transport);
//!
//! let request = PostRequest {
//!     caption: "Hello".to_string(),
//!     hashtags: "#rust".to_string(),
//!     media_urls: vec![],
//!     post_type: PostType::Text,
//! };
//! let response = publisher.publish(&request, &NoProgress).await?;
//! println!("published: {:?}", response.published_id());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{DuocastError, PlatformError, Result};
use crate::graph::{GraphResponse, GraphTransport};
use crate::types::{Platform, PostRequest, PostType};

pub mod facebook;
pub mod instagram;

pub use facebook::FacebookPublisher;
pub use instagram::InstagramPublisher;

/// Receives a short label each time a remote step of a sequence completes
pub trait ProgressReporter: Send + Sync {
    fn step_completed(&self, step: &str);
}

/// Reporter that discards progress
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn step_completed(&self, _step: &str) {}
}

/// Publishing sequencer for one platform
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Platform this publisher targets
    fn platform(&self) -> Platform;

    /// Whether a call sequence exists for this post type
    fn supports(&self, post_type: PostType) -> bool {
        self.platform().supports(post_type)
    }

    /// Run the call sequence for `request`
    ///
    /// Returns the decoded body of the final call unchanged; the caller
    /// classifies it.
    ///
    /// # Errors
    ///
    /// - `PlatformError::UnsupportedPostType` before any remote call when the
    ///   post type has no sequence on this platform
    /// - `PlatformError::RemoteRejection` / `MalformedResponse` when an
    ///   intermediate call yields no identifier
    /// - `PlatformError::Network` when a request fails
    async fn publish(
        &self,
        request: &PostRequest,
        progress: &dyn ProgressReporter,
    ) -> Result<GraphResponse>;
}

/// Build the publisher for a platform
pub fn publisher_for(
    platform: Platform,
    config: Arc<Config>,
    transport: Arc<dyn GraphTransport>,
) -> Box<dyn Publisher> {
    match platform {
        Platform::Facebook => Box::new(FacebookPublisher::new(config, transport)),
        Platform::Instagram => Box::new(InstagramPublisher::new(config, transport)),
    }
}

pub(crate) fn unsupported(platform: Platform, post_type: PostType) -> DuocastError {
    PlatformError::UnsupportedPostType {
        platform,
        post_type,
    }
    .into()
}

pub(crate) fn first_media_url(request: &PostRequest) -> Result<&str> {
    request.first_media_url().ok_or_else(|| {
        DuocastError::InvalidInput(format!(
            "A media URL is required for {} posts",
            request.post_type
        ))
    })
}
