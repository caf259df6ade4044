//! Core types for Duocast

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target social platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Facebook,
}

impl Platform {
    /// All platforms, in the order they are offered to the operator
    pub const ALL: [Platform; 2] = [Platform::Instagram, Platform::Facebook];

    /// Lowercase identifier used in logs and events
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
        }
    }

    /// Capitalized name used in operator-facing messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Instagram => "Instagram",
            Platform::Facebook => "Facebook",
        }
    }

    /// Post types this platform can publish, in form order
    pub fn supported_post_types(&self) -> &'static [PostType] {
        match self {
            Platform::Instagram => &[
                PostType::Image,
                PostType::Carousel,
                PostType::Reel,
                PostType::Story,
            ],
            Platform::Facebook => &[PostType::Text, PostType::Image, PostType::Video],
        }
    }

    pub fn supports(&self, post_type: PostType) -> bool {
        self.supported_post_types().contains(&post_type)
    }

    /// Short blurb shown on the platform picker
    pub fn tagline(&self) -> &'static str {
        match self {
            Platform::Instagram => "Post images, carousels, reels, and stories",
            Platform::Facebook => "Share text, images, and videos",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "instagram" => Ok(Platform::Instagram),
            "facebook" => Ok(Platform::Facebook),
            _ => Err(format!(
                "Invalid platform: '{}'. Valid options: instagram, facebook",
                s
            )),
        }
    }
}

/// Kind of post being published
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Image,
    Video,
    Carousel,
    Reel,
    Story,
    Text,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Image => "image",
            PostType::Video => "video",
            PostType::Carousel => "carousel",
            PostType::Reel => "reel",
            PostType::Story => "story",
            PostType::Text => "text",
        }
    }

    /// Label shown in the post type selector
    pub fn label(&self) -> &'static str {
        match self {
            PostType::Image => "Image",
            PostType::Video => "Video",
            PostType::Carousel => "Carousel",
            PostType::Reel => "Reel",
            PostType::Story => "Story",
            PostType::Text => "Text",
        }
    }

    /// Text posts carry no media
    pub fn requires_media(&self) -> bool {
        !matches!(self, PostType::Text)
    }

    /// Stories are published without caption or hashtags
    pub fn accepts_caption(&self) -> bool {
        !matches!(self, PostType::Story)
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "image" => Ok(PostType::Image),
            "video" => Ok(PostType::Video),
            "carousel" => Ok(PostType::Carousel),
            "reel" => Ok(PostType::Reel),
            "story" => Ok(PostType::Story),
            "text" => Ok(PostType::Text),
            _ => Err(format!(
                "Invalid post type: '{}'. Valid options: image, video, carousel, reel, story, text",
                s
            )),
        }
    }
}

/// Media kind of a story, decided from its URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// URLs ending in `.mp4` are videos, anything else is an image
    pub fn classify(url: &str) -> Self {
        if url.trim().to_ascii_lowercase().ends_with(".mp4") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }

    /// Graph API field carrying a URL of this kind
    pub fn url_field(&self) -> &'static str {
        match self {
            MediaKind::Image => "image_url",
            MediaKind::Video => "video_url",
        }
    }
}

/// Normalized request handed to a publisher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRequest {
    pub caption: String,
    pub hashtags: String,
    pub media_urls: Vec<String>,
    pub post_type: PostType,
}

impl PostRequest {
    /// Caption followed by a blank line and the hashtags
    pub fn combined_caption(&self) -> String {
        format!("{}\n\n{}", self.caption, self.hashtags)
    }

    pub fn first_media_url(&self) -> Option<&str> {
        self.media_urls.first().map(String::as_str)
    }
}

/// Outcome status of an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Success,
    Error,
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadStatus::Success => f.write_str("success"),
            UploadStatus::Error => f.write_str("error"),
        }
    }
}

/// A completed upload kept in the session history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: String,
    pub platform: Platform,
    pub post_type: PostType,
    pub caption: String,
    pub media_url: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Identifier the platform assigned to the published post
    pub remote_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub status: UploadStatus,
}

impl UploadRecord {
    /// Build a success record for a request published at `created_at`
    pub fn success(
        platform: Platform,
        request: &PostRequest,
        remote_id: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let media_url = request.first_media_url().map(str::to_string);

        let thumbnail_url = match request.post_type {
            PostType::Image | PostType::Carousel => media_url.clone(),
            PostType::Story => media_url
                .clone()
                .filter(|url| MediaKind::classify(url) == MediaKind::Image),
            PostType::Video | PostType::Reel | PostType::Text => None,
        };

        Self {
            id: created_at.timestamp_millis().to_string(),
            platform,
            post_type: request.post_type,
            caption: request.caption.clone(),
            media_url,
            thumbnail_url,
            remote_id,
            created_at,
            status: UploadStatus::Success,
        }
    }
}
