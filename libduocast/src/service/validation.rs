//! Upload form validation
//!
//! Checks a form before any remote call is made. Errors block the upload;
//! warnings are shown to the operator but do not.

use super::upload::UploadForm;
use crate::types::{Platform, PostType};

/// Instagram rejects captions longer than this
pub const INSTAGRAM_CAPTION_LIMIT: usize = 2200;
/// Facebook page post limit
pub const FACEBOOK_MESSAGE_LIMIT: usize = 63_206;
/// Instagram carousels take at most this many items
pub const CAROUSEL_MAX_ITEMS: usize = 10;

/// Service for validating upload forms
///
/// # Example
///
/// ```
/// use libduocast::service::upload::UploadForm;
/// use libduocast::service::validation::ValidationService;
/// use libduocast::types::{Platform, PostType};
///
/// let form = UploadForm {
///     platform: Platform::Facebook,
///     caption: "Hello".to_string(),
///     hashtags: "#rust".to_string(),
///     media_urls: String::new(),
///     post_type: PostType::Text,
/// };
///
/// let response = ValidationService::new().validate(&form);
/// assert!(response.valid);
/// ```
#[derive(Clone, Default)]
pub struct ValidationService;

/// Result of validating a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResponse {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResponse {
    /// First blocking error, if any
    pub fn first_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }
}

impl ValidationService {
    pub fn new() -> Self {
        Self
    }

    /// Validate a form
    ///
    /// Errors:
    /// - post type not offered on the platform
    /// - no media URL for a post type that needs media
    /// - empty caption for a post type that carries one
    ///
    /// Warnings:
    /// - caption over the platform limit
    /// - more carousel items than Instagram accepts
    /// - media URLs that are not HTTPS
    /// - extra media URLs that will be ignored
    /// - carousels with a single item
    /// - caption or hashtags on a story (dropped)
    pub fn validate(&self, form: &UploadForm) -> ValidationResponse {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let media_urls = form.normalized_media_urls();

        if !form.platform.supports(form.post_type) {
            errors.push(format!(
                "{} does not support {} posts",
                form.platform, form.post_type
            ));
        }

        if form.post_type.requires_media() {
            self.validate_media(form.post_type, &media_urls, &mut errors, &mut warnings);
        }

        if form.post_type.accepts_caption() {
            self.validate_caption(form, &mut errors, &mut warnings);
        } else if !form.caption.trim().is_empty() || !form.hashtags.trim().is_empty() {
            warnings.push("Stories are published without caption or hashtags".to_string());
        }

        ValidationResponse {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn is_valid(&self, form: &UploadForm) -> bool {
        self.validate(form).valid
    }

    fn validate_media(
        &self,
        post_type: PostType,
        media_urls: &[String],
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) {
        if media_urls.is_empty() {
            errors.push(format!("At least one media URL is required for {} posts", post_type));
            return;
        }

        if media_urls
            .iter()
            .any(|url| !url.to_ascii_lowercase().starts_with("https://"))
        {
            warnings.push("Media URLs must be publicly accessible HTTPS URLs".to_string());
        }

        match post_type {
            PostType::Carousel if media_urls.len() > CAROUSEL_MAX_ITEMS => {
                warnings.push(format!(
                    "Instagram usually accepts at most {} carousel items (got {})",
                    CAROUSEL_MAX_ITEMS,
                    media_urls.len()
                ));
            }
            PostType::Carousel if media_urls.len() < 2 => {
                warnings.push("Carousels usually have at least two items".to_string());
            }
            PostType::Carousel => {}
            _ if media_urls.len() > 1 => {
                warnings.push(format!(
                    "Only the first media URL is used for {} posts",
                    post_type
                ));
            }
            _ => {}
        }
    }

    fn validate_caption(
        &self,
        form: &UploadForm,
        errors: &mut Vec<String>,
        warnings: &mut Vec<String>,
    ) {
        if form.caption.trim().is_empty() {
            errors.push("Caption is required".to_string());
            return;
        }

        let limit = match form.platform {
            Platform::Instagram => INSTAGRAM_CAPTION_LIMIT,
            Platform::Facebook => FACEBOOK_MESSAGE_LIMIT,
        };
        let length = form.to_request().combined_caption().chars().count();
        if length > limit {
            warnings.push(format!(
                "Caption exceeds {}'s {} character limit (current: {} characters)",
                form.platform, limit, length
            ));
        }
    }
}
