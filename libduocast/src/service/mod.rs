//! Service layer for Duocast
//!
//! Business logic shared by front ends. `DuocastService` is the entry point
//! and hands out the specialized sub-services:
//!
//! - `UploadService`: normalize, validate, publish and classify an upload
//! - `HistoryLedger`: session history of successful uploads
//! - `ValidationService`: form checks ahead of any remote call
//! - `EventBus`: upload lifecycle events
//!
//! # Example
//!
//! ```no_run
//! use libduocast::service::upload::UploadForm;
//! use libduocast::service::DuocastService;
//! use libduocast::types::{Platform, PostType};
//!
//! # async fn example() -> libduocast::Result<()> {
//! let service = DuocastService::new()?;
//!
//! let form = UploadForm {
//!     platform: Platform::Instagram,
//!     caption: "Golden hour".to_string(),
//!     hashtags: "#sunset".to_string(),
//!     media_urls: "https://cdn.example.com/a.jpg".to_string(),
//!     post_type: PostType::Image,
//! };
//!
//! let outcome = service.upload().upload(form).await;
//! println!("{}", outcome.message());
//! # Ok(())
//! # }
//! ```

pub mod events;
pub mod history;
pub mod upload;
pub mod validation;

pub use events::{Event, EventBus, EventReceiver};
pub use history::HistoryLedger;
pub use upload::{UploadForm, UploadOutcome, UploadService};
pub use validation::{ValidationResponse, ValidationService};

use std::sync::Arc;

use crate::config::Config;
use crate::graph::{GraphTransport, HttpTransport};
use crate::Result;

/// Per-subscriber event buffer
const EVENT_BUS_CAPACITY: usize = 100;

/// Main service facade
///
/// All sub-services share the same configuration, transport, ledger and
/// event bus.
pub struct DuocastService {
    config: Arc<Config>,
    upload: UploadService,
    history: HistoryLedger,
    validation: ValidationService,
    event_bus: EventBus,
}

impl DuocastService {
    /// Create a service from the default configuration, talking to the real
    /// Graph API
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or parsed.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self::from_config(config))
    }

    /// Create a service over HTTP with a given configuration
    pub fn from_config(config: Config) -> Self {
        let transport = HttpTransport::new(config.graph.base_url.clone());
        Self::from_parts(config, Arc::new(transport))
    }

    /// Create a service with a custom transport, e.g. `MockTransport`
    pub fn from_parts(config: Config, transport: Arc<dyn GraphTransport>) -> Self {
        let config = Arc::new(config);
        let history = HistoryLedger::new();
        let event_bus = EventBus::new(EVENT_BUS_CAPACITY);
        let upload = UploadService::new(
            Arc::clone(&config),
            transport,
            history.clone(),
            event_bus.clone(),
        );

        Self {
            config,
            upload,
            history,
            validation: ValidationService::new(),
            event_bus,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the upload orchestrator
    pub fn upload(&self) -> &UploadService {
        &self.upload
    }

    /// Access the session history
    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    /// Access form validation, e.g. to show warnings while the operator types
    pub fn validation(&self) -> &ValidationService {
        &self.validation
    }

    /// Subscribe to upload events
    ///
    /// Multiple subscribers are supported; each sees events emitted after it
    /// subscribed.
    pub fn subscribe(&self) -> EventReceiver {
        self.event_bus.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MockTransport;
    use crate::types::{Platform, PostType};

    #[tokio::test]
    async fn test_sub_services_share_history() {
        let transport = MockTransport::new();
        let service = DuocastService::from_parts(Config::default(), Arc::new(transport.clone()));

        let form = UploadForm {
            platform: Platform::Facebook,
            caption: "Hi".to_string(),
            hashtags: String::new(),
            media_urls: String::new(),
            post_type: PostType::Text,
        };
        assert!(service.upload().upload(form).await.is_success());

        assert_eq!(service.history().len(), 1);
        assert_eq!(service.upload().history().len(), 1);
        assert_eq!(transport.call_count(), 1);
    }

    #[test]
    fn test_from_config_uses_configured_base_url() {
        let mut config = Config::default();
        config.apply_overrides(|key| {
            (key == "DUOCAST_GRAPH_BASE_URL").then(|| "http://127.0.0.1:9".to_string())
        });
        let service = DuocastService::from_config(config);
        assert_eq!(service.config().graph.base_url, "http://127.0.0.1:9");
    }
}
