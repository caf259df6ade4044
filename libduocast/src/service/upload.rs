//! Upload orchestration
//!
//! Takes a raw [`UploadForm`], normalizes and validates it, runs the
//! platform's publisher and classifies what comes back. This is the only
//! place upload failures are recovered: every failure becomes an
//! [`UploadOutcome::Failure`] carrying an operator-facing message.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use super::events::{BusProgress, Event, EventBus};
use super::history::HistoryLedger;
use super::validation::ValidationService;
use crate::config::Config;
use crate::graph::{GraphResponse, GraphTransport};
use crate::platforms::publisher_for;
use crate::types::{Platform, PostRequest, PostType, UploadRecord};

/// Message used when the final response has neither an id nor an error message
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed";

/// Raw operator input, as typed into the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadForm {
    pub platform: Platform,
    pub caption: String,
    pub hashtags: String,
    /// One media URL per line
    pub media_urls: String,
    pub post_type: PostType,
}

impl UploadForm {
    /// Empty form for a platform, preselecting its first post type
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            caption: String::new(),
            hashtags: String::new(),
            media_urls: String::new(),
            post_type: platform.supported_post_types()[0],
        }
    }

    pub fn normalized_media_urls(&self) -> Vec<String> {
        normalize_media_urls(&self.media_urls)
    }

    /// Normalized request for the publisher
    pub fn to_request(&self) -> PostRequest {
        PostRequest {
            caption: self.caption.clone(),
            hashtags: self.hashtags.clone(),
            media_urls: self.normalized_media_urls(),
            post_type: self.post_type,
        }
    }
}

/// Split newline-delimited URL text into trimmed, non-empty entries
///
/// Order is preserved and the result is stable under re-normalization.
pub fn normalize_media_urls(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Classify the final Graph response
///
/// `Ok(remote_id)` when the body carries `id` or `post_id`. Otherwise the
/// error message from the body, or [`UPLOAD_FAILED_MESSAGE`].
pub fn classify_response(response: &GraphResponse) -> std::result::Result<String, String> {
    if let Some(id) = response.published_id() {
        return Ok(id);
    }

    match response.error_message() {
        Some(message) if !message.trim().is_empty() => Err(message),
        _ => Err(UPLOAD_FAILED_MESSAGE.to_string()),
    }
}

/// Result of an upload attempt
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Success {
        record: UploadRecord,
        message: String,
    },
    Failure {
        message: String,
    },
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            UploadOutcome::Success { message, .. } | UploadOutcome::Failure { message } => message,
        }
    }
}

/// Upload orchestrator
#[derive(Clone)]
pub struct UploadService {
    config: Arc<Config>,
    transport: Arc<dyn GraphTransport>,
    history: HistoryLedger,
    validation: ValidationService,
    event_bus: EventBus,
}

impl UploadService {
    pub fn new(
        config: Arc<Config>,
        transport: Arc<dyn GraphTransport>,
        history: HistoryLedger,
        event_bus: EventBus,
    ) -> Self {
        Self {
            config,
            transport,
            history,
            validation: ValidationService::new(),
            event_bus,
        }
    }

    /// Upload a form to its platform
    ///
    /// Never fails: invalid forms, unsupported post types, remote rejections
    /// and transport errors all come back as [`UploadOutcome::Failure`].
    /// A success record is prepended to the history before returning.
    pub async fn upload(&self, form: UploadForm) -> UploadOutcome {
        let started_at = Utc::now();
        let upload_id = started_at.timestamp_millis().to_string();
        let platform = form.platform;

        let validation = self.validation.validate(&form);
        for warning in &validation.warnings {
            warn!(upload_id = %upload_id, platform = %platform.as_str(), "{}", warning);
        }
        if let Some(error) = validation.first_error() {
            return self.fail(&upload_id, platform, error.to_string());
        }

        let request = form.to_request();
        self.event_bus.emit(Event::UploadStarted {
            upload_id: upload_id.clone(),
            platform,
            post_type: request.post_type,
        });
        info!(
            upload_id = %upload_id,
            platform = %platform.as_str(),
            post_type = %request.post_type,
            media_count = request.media_urls.len(),
            "Starting upload"
        );

        let publisher = publisher_for(platform, self.config.clone(), self.transport.clone());
        let progress = BusProgress {
            event_bus: &self.event_bus,
            upload_id: &upload_id,
            platform,
        };

        let response = match publisher.publish(&request, &progress).await {
            Ok(response) => response,
            Err(e) => return self.fail(&upload_id, platform, e.user_message()),
        };

        match classify_response(&response) {
            Ok(remote_id) => {
                let record = UploadRecord::success(platform, &request, Some(remote_id), started_at);
                self.history.prepend(record.clone());

                let message = format!("Successfully posted to {}!", platform.display_name());
                info!(upload_id = %upload_id, remote_id = ?record.remote_id, "{}", message);

                self.event_bus.emit(Event::UploadSucceeded {
                    upload_id,
                    message: message.clone(),
                    record: record.clone(),
                });
                UploadOutcome::Success { record, message }
            }
            Err(message) => self.fail(&upload_id, platform, message),
        }
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    fn fail(&self, upload_id: &str, platform: Platform, message: String) -> UploadOutcome {
        warn!(upload_id, platform = %platform.as_str(), "Upload failed: {}", message);
        self.event_bus.emit(Event::UploadFailed {
            upload_id: upload_id.to_string(),
            platform,
            error: message.clone(),
        });
        UploadOutcome::Failure { message }
    }
}
