//! Facebook Page publisher
//!
//! Every Facebook post type is a single call against the page:
//! `feed` for text, `photos` for images, `videos` for videos.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use std::sync::Arc;

use super::{first_media_url, unsupported, ProgressReporter, Publisher};
use crate::config::Config;
use crate::error::Result;
use crate::graph::{GraphResponse, GraphTransport};
use crate::types::{Platform, PostRequest, PostType};

pub struct FacebookPublisher {
    config: Arc<Config>,
    transport: Arc<dyn GraphTransport>,
}

impl FacebookPublisher {
    pub fn new(config: Arc<Config>, transport: Arc<dyn GraphTransport>) -> Self {
        Self { config, transport }
    }

    async fn call(&self, edge: &str, mut body: Value) -> Result<GraphResponse> {
        let path = format!("{}/{}", self.config.facebook.page_id, edge);
        body["access_token"] = Value::String(
            self.config.facebook.access_token.expose_secret().to_string(),
        );

        tracing::debug!(platform = "facebook", edge, "Graph call");
        self.transport.post(&path, body).await
    }
}

#[async_trait]
impl Publisher for FacebookPublisher {
    fn platform(&self) -> Platform {
        Platform::Facebook
    }

    async fn publish(
        &self,
        request: &PostRequest,
        progress: &dyn ProgressReporter,
    ) -> Result<GraphResponse> {
        let message = request.combined_caption();

        let (edge, body) = match request.post_type {
            PostType::Text => ("feed", json!({ "message": message })),
            PostType::Image => (
                "photos",
                json!({ "url": first_media_url(request)?, "caption": message }),
            ),
            PostType::Video => (
                "videos",
                json!({ "file_url": first_media_url(request)?, "description": message }),
            ),
            other => return Err(unsupported(Platform::Facebook, other)),
        };

        let response = self.call(edge, body).await?;
        progress.step_completed(&format!("{} request completed", edge));

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DuocastError, PlatformError};
    use crate::graph::MockTransport;
    use crate::platforms::NoProgress;

    fn publisher(transport: &MockTransport) -> FacebookPublisher {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "FACEBOOK_PAGE_ID" => Some("page1".to_string()),
            "FACEBOOK_ACCESS_TOKEN" => Some("fb-token".to_string()),
            _ => None,
        });
        FacebookPublisher::new(Arc::new(config), Arc::new(transport.clone()))
    }

    fn request(post_type: PostType, urls: &[&str]) -> PostRequest {
        PostRequest {
            caption: "Hello".to_string(),
            hashtags: "#test".to_string(),
            media_urls: urls.iter().map(|u| u.to_string()).collect(),
            post_type,
        }
    }

    #[tokio::test]
    async fn test_text_posts_to_feed() {
        let transport = MockTransport::new();
        let response = publisher(&transport)
            .publish(&request(PostType::Text, &[]), &NoProgress)
            .await
            .unwrap();

        assert!(response.id().is_some());
        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, "page1/feed");
        assert_eq!(calls[0].field("message"), Some("Hello\n\n#test"));
        assert_eq!(calls[0].field("access_token"), Some("fb-token"));
    }

    #[tokio::test]
    async fn test_image_posts_to_photos() {
        let transport = MockTransport::new();
        publisher(&transport)
            .publish(
                &request(PostType::Image, &["https://x/a.jpg", "https://x/b.jpg"]),
                &NoProgress,
            )
            .await
            .unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, "page1/photos");
        assert_eq!(calls[0].field("url"), Some("https://x/a.jpg"));
        assert_eq!(calls[0].field("caption"), Some("Hello\n\n#test"));
    }

    #[tokio::test]
    async fn test_video_posts_to_videos() {
        let transport = MockTransport::new();
        publisher(&transport)
            .publish(&request(PostType::Video, &["https://x/a.mp4"]), &NoProgress)
            .await
            .unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, "page1/videos");
        assert_eq!(calls[0].field("file_url"), Some("https://x/a.mp4"));
        assert_eq!(calls[0].field("description"), Some("Hello\n\n#test"));
        assert!(!calls[0].has_field("caption"));
    }

    #[tokio::test]
    async fn test_unsupported_types_issue_no_calls() {
        for post_type in [PostType::Carousel, PostType::Reel, PostType::Story] {
            let transport = MockTransport::new();
            let result = publisher(&transport)
                .publish(&request(post_type, &["https://x/a.jpg"]), &NoProgress)
                .await;

            assert!(matches!(
                result,
                Err(DuocastError::Platform(PlatformError::UnsupportedPostType { .. }))
            ));
            assert_eq!(transport.call_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_final_error_body_is_returned_unchanged() {
        let transport = MockTransport::new().on(
            "feed",
            crate::graph::MockReply::error("(#200) Permissions error"),
        );
        let response = publisher(&transport)
            .publish(&request(PostType::Text, &[]), &NoProgress)
            .await
            .unwrap();

        assert_eq!(
            response.error_message().as_deref(),
            Some("(#200) Permissions error")
        );
    }
}
