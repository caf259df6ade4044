//! Instagram publisher
//!
//! Instagram publishes in two phases: create a media container on
//! `{user}/media`, then publish it through `{user}/media_publish` with the
//! container id as `creation_id`. Carousels add a phase in front: one child
//! container per media URL, created concurrently, which the parent container
//! references.

use async_trait::async_trait;
use futures::future::try_join_all;
use secrecy::ExposeSecret;
use serde_json::{json, Value};
use std::sync::Arc;

use super::{first_media_url, unsupported, ProgressReporter, Publisher};
use crate::config::Config;
use crate::error::Result;
use crate::graph::{GraphResponse, GraphTransport};
use crate::types::{MediaKind, Platform, PostRequest, PostType};

pub struct InstagramPublisher {
    config: Arc<Config>,
    transport: Arc<dyn GraphTransport>,
}

impl InstagramPublisher {
    pub fn new(config: Arc<Config>, transport: Arc<dyn GraphTransport>) -> Self {
        Self { config, transport }
    }

    async fn call(&self, edge: &str, mut body: Value) -> Result<GraphResponse> {
        let path = format!("{}/{}", self.config.instagram.user_id, edge);
        body["access_token"] = Value::String(
            self.config.instagram.access_token.expose_secret().to_string(),
        );

        tracing::debug!(platform = "instagram", edge, "Graph call");
        self.transport.post(&path, body).await
    }

    /// Create a media container and return its id
    async fn create_container(&self, body: Value) -> Result<String> {
        self.call("media", body)
            .await?
            .into_container_id("create media container")
    }

    /// Publish a container; the response is returned as-is
    async fn publish_container(&self, creation_id: &str) -> Result<GraphResponse> {
        self.call("media_publish", json!({ "creation_id": creation_id }))
            .await
    }

    async fn create_carousel_children(
        &self,
        media_urls: &[String],
        progress: &dyn ProgressReporter,
    ) -> Result<Vec<String>> {
        let total = media_urls.len();

        // try_join_all keeps input order and drops the remaining calls as
        // soon as one fails
        try_join_all(media_urls.iter().enumerate().map(|(index, url)| async move {
            let id = self
                .create_container(json!({ "image_url": url, "is_carousel_item": true }))
                .await?;
            progress.step_completed(&format!("carousel item {}/{} created", index + 1, total));
            Ok::<_, crate::DuocastError>(id)
        }))
        .await
    }
}

#[async_trait]
impl Publisher for InstagramPublisher {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    async fn publish(
        &self,
        request: &PostRequest,
        progress: &dyn ProgressReporter,
    ) -> Result<GraphResponse> {
        let container_body = match request.post_type {
            PostType::Image => json!({
                "image_url": first_media_url(request)?,
                "caption": request.combined_caption(),
            }),
            PostType::Carousel => {
                first_media_url(request)?;
                let children = self
                    .create_carousel_children(&request.media_urls, progress)
                    .await?;
                json!({
                    "media_type": "CAROUSEL",
                    "children": children.join(","),
                    "caption": request.combined_caption(),
                })
            }
            PostType::Reel => json!({
                "media_type": "REELS",
                "video_url": first_media_url(request)?,
                "caption": request.combined_caption(),
                "share_to_feed": true,
            }),
            PostType::Story => {
                let url = first_media_url(request)?;
                let mut body = json!({ "media_type": "STORIES" });
                body[MediaKind::classify(url).url_field()] = Value::String(url.to_string());
                body
            }
            other => return Err(unsupported(Platform::Instagram, other)),
        };

        let creation_id = self.create_container(container_body).await?;
        progress.step_completed("media container created");

        let response = self.publish_container(&creation_id).await?;
        progress.step_completed("publish request completed");

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DuocastError, PlatformError};
    use crate::graph::{MockReply, MockTransport};
    use crate::platforms::NoProgress;
    use std::sync::Mutex;
    use std::time::Duration;

    fn publisher(transport: &MockTransport) -> InstagramPublisher {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "INSTAGRAM_USER_ID" => Some("ig1".to_string()),
            "INSTAGRAM_ACCESS_TOKEN" => Some("ig-token".to_string()),
            _ => None,
        });
        InstagramPublisher::new(Arc::new(config), Arc::new(transport.clone()))
    }

    fn request(post_type: PostType, urls: &[&str]) -> PostRequest {
        PostRequest {
            caption: "Hello".to_string(),
            hashtags: "#test".to_string(),
            media_urls: urls.iter().map(|u| u.to_string()).collect(),
            post_type,
        }
    }

    #[derive(Default)]
    struct RecordingProgress(Mutex<Vec<String>>);

    impl ProgressReporter for RecordingProgress {
        fn step_completed(&self, step: &str) {
            self.0.lock().unwrap().push(step.to_string());
        }
    }

    #[tokio::test]
    async fn test_image_creates_then_publishes() {
        let transport = MockTransport::new()
            .on("media", MockReply::id("c1"))
            .on("media_publish", MockReply::id("p1"));

        let response = publisher(&transport)
            .publish(&request(PostType::Image, &["https://x/a.jpg"]), &NoProgress)
            .await
            .unwrap();
        assert_eq!(response.id().as_deref(), Some("p1"));

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].path, "ig1/media");
        assert_eq!(calls[0].field("image_url"), Some("https://x/a.jpg"));
        assert_eq!(calls[0].field("caption"), Some("Hello\n\n#test"));
        assert_eq!(calls[0].field("access_token"), Some("ig-token"));
        assert_eq!(calls[1].path, "ig1/media_publish");
        assert_eq!(calls[1].field("creation_id"), Some("c1"));
    }

    #[tokio::test]
    async fn test_reel_container_fields() {
        let transport = MockTransport::new();
        publisher(&transport)
            .publish(&request(PostType::Reel, &["https://x/a.mp4"]), &NoProgress)
            .await
            .unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].field("media_type"), Some("REELS"));
        assert_eq!(calls[0].field("video_url"), Some("https://x/a.mp4"));
        assert_eq!(calls[0].field("caption"), Some("Hello\n\n#test"));
        assert_eq!(calls[0].body["share_to_feed"], json!(true));
        assert_eq!(calls[1].resource(), "media_publish");
    }

    #[tokio::test]
    async fn test_story_selects_field_by_extension() {
        let transport = MockTransport::new();
        publisher(&transport)
            .publish(&request(PostType::Story, &["https://x/clip.mp4"]), &NoProgress)
            .await
            .unwrap();
        let container = &transport.calls()[0];
        assert_eq!(container.field("media_type"), Some("STORIES"));
        assert_eq!(container.field("video_url"), Some("https://x/clip.mp4"));
        assert!(!container.has_field("image_url"));
        assert!(!container.has_field("caption"));

        let transport = MockTransport::new();
        publisher(&transport)
            .publish(&request(PostType::Story, &["https://x/pic.png"]), &NoProgress)
            .await
            .unwrap();
        let container = &transport.calls()[0];
        assert_eq!(container.field("image_url"), Some("https://x/pic.png"));
        assert!(!container.has_field("video_url"));
        assert!(!container.has_field("caption"));
    }

    #[tokio::test]
    async fn test_carousel_fans_out_then_aggregates() {
        let transport = MockTransport::new()
            .with_delay(Duration::from_millis(20))
            .on_body("image_url", "https://x/1.jpg", MockReply::id("k1"))
            .on_body("image_url", "https://x/2.jpg", MockReply::id("k2"))
            .on_body("image_url", "https://x/3.jpg", MockReply::id("k3"))
            .on_body("media_type", "CAROUSEL", MockReply::id("parent"));

        let progress = RecordingProgress::default();
        publisher(&transport)
            .publish(
                &request(
                    PostType::Carousel,
                    &["https://x/1.jpg", "https://x/2.jpg", "https://x/3.jpg"],
                ),
                &progress,
            )
            .await
            .unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 5);
        for (call, url) in calls[..3]
            .iter()
            .zip(["https://x/1.jpg", "https://x/2.jpg", "https://x/3.jpg"])
        {
            assert_eq!(call.resource(), "media");
            assert_eq!(call.field("image_url"), Some(url));
            assert_eq!(call.body["is_carousel_item"], json!(true));
            assert!(!call.has_field("caption"));
        }
        assert_eq!(transport.max_in_flight(), 3);

        assert_eq!(calls[3].field("media_type"), Some("CAROUSEL"));
        assert_eq!(calls[3].field("children"), Some("k1,k2,k3"));
        assert_eq!(calls[3].field("caption"), Some("Hello\n\n#test"));
        assert_eq!(calls[4].resource(), "media_publish");
        assert_eq!(calls[4].field("creation_id"), Some("parent"));

        let steps = progress.0.lock().unwrap().clone();
        assert_eq!(steps.len(), 5);
        assert_eq!(steps.last().map(String::as_str), Some("publish request completed"));
    }

    #[tokio::test]
    async fn test_carousel_child_failure_stops_sequence() {
        let transport = MockTransport::new()
            .with_delay(Duration::from_millis(10))
            .on_body(
                "image_url",
                "https://x/2.jpg",
                MockReply::NetworkError("connection reset".to_string()),
            );

        let result = publisher(&transport)
            .publish(
                &request(
                    PostType::Carousel,
                    &["https://x/1.jpg", "https://x/2.jpg", "https://x/3.jpg"],
                ),
                &NoProgress,
            )
            .await;

        assert!(matches!(
            result,
            Err(DuocastError::Platform(PlatformError::Network(_)))
        ));
        let calls = transport.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls.iter().all(|c| c.body["is_carousel_item"] == json!(true)));
        assert!(transport.calls_to("media_publish").is_empty());
    }

    #[tokio::test]
    async fn test_container_rejection_skips_publish() {
        let transport = MockTransport::new().on(
            "media",
            MockReply::error("Only photo or video can be accepted as media type."),
        );

        let result = publisher(&transport)
            .publish(&request(PostType::Image, &["https://x/a.txt"]), &NoProgress)
            .await;

        match result {
            Err(DuocastError::Platform(PlatformError::RemoteRejection(msg))) => {
                assert_eq!(msg, "Only photo or video can be accepted as media type.");
            }
            other => panic!("Expected RemoteRejection, got {:?}", other),
        }
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_container_without_id_is_malformed() {
        let transport =
            MockTransport::new().on("media", MockReply::Json(200, json!({ "ok": true })));

        let result = publisher(&transport)
            .publish(&request(PostType::Reel, &["https://x/a.mp4"]), &NoProgress)
            .await;

        assert!(matches!(
            result,
            Err(DuocastError::Platform(PlatformError::MalformedResponse(_)))
        ));
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unsupported_types_issue_no_calls() {
        for post_type in [PostType::Text, PostType::Video] {
            let transport = MockTransport::new();
            let result = publisher(&transport)
                .publish(&request(post_type, &["https://x/a.mp4"]), &NoProgress)
                .await;

            assert!(matches!(
                result,
                Err(DuocastError::Platform(PlatformError::UnsupportedPostType { .. }))
            ));
            assert_eq!(transport.call_count(), 0);
        }
    }
}
