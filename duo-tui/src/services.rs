//! Service layer adapter for the TUI
//!
//! Bridges the async `DuocastService` to the synchronous event loop:
//!
//! - `ServiceHandle` owns the service and a tokio runtime
//! - uploads run as spawned tasks; their outcome arrives as events
//! - events are forwarded from the tokio broadcast bus to a crossbeam
//!   channel the event loop drains without blocking
//!
//! # Example
//!
//! ```no_run
//! use duo_tui::services::ServiceHandle;
//! use libduocast::service::UploadForm;
//! use libduocast::Platform;
//!
//! # fn example() -> duo_tui::error::Result<()> {
//! let services = ServiceHandle::new()?;
//! let events = services.subscribe();
//!
//! let mut form = UploadForm::new(Platform::Facebook);
//! form.caption = "Hello".to_string();
//! services.submit(form);
//!
//! while let Ok(event) = events.try_recv() {
//!     println!("{:?}", event);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver};
use libduocast::service::{DuocastService, Event, UploadForm, ValidationResponse};
use libduocast::{Platform, UploadRecord};
use tokio::sync::broadcast::error::RecvError;

use crate::error::Result;

pub struct ServiceHandle {
    service: Arc<DuocastService>,
    runtime: tokio::runtime::Runtime,
}

impl ServiceHandle {
    /// Create a handle over the default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the tokio
    /// runtime cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_service(DuocastService::new()?)
    }

    /// Create a handle over an existing service
    pub fn with_service(service: DuocastService) -> Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            service: Arc::new(service),
            runtime,
        })
    }

    /// Subscribe to upload events through a crossbeam channel
    ///
    /// Only events emitted after this call are delivered.
    pub fn subscribe(&self) -> Receiver<Event> {
        let (tx, rx) = unbounded();
        let mut event_rx = self.service.subscribe();

        self.runtime.spawn(async move {
            loop {
                match event_rx.recv().await {
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Event receiver lagged, skipped {} events", skipped);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });

        rx
    }

    /// Start an upload in the background
    ///
    /// Progress and the outcome are delivered as events to subscribers.
    pub fn submit(&self, form: UploadForm) {
        let service = Arc::clone(&self.service);
        self.runtime.spawn(async move {
            let outcome = service.upload().upload(form).await;
            tracing::debug!(success = outcome.is_success(), "Upload task finished");
        });
    }

    /// Validate a form without side effects
    pub fn validate(&self, form: &UploadForm) -> ValidationResponse {
        self.service.validation().validate(form)
    }

    /// Snapshot of the session history, newest first
    pub fn history(&self) -> Vec<UploadRecord> {
        self.service.history().list()
    }

    /// Platforms still using placeholder credentials
    pub fn unconfigured_platforms(&self) -> Vec<Platform> {
        Platform::ALL
            .into_iter()
            .filter(|p| !self.service.config().is_configured(*p))
            .collect()
    }
}
