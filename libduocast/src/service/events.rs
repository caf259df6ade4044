//! Upload lifecycle events
//!
//! An in-process broadcast bus. The upload service emits events while a
//! sequence runs; front ends subscribe to turn them into progress lines and
//! notifications.
//!
//! Emitting never blocks: with no subscribers the event is dropped, and a
//! lagging subscriber loses the oldest events first.
//!
//! # Example
//!
//! ```no_run
//! use libduocast::service::events::{Event, EventBus};
//! use libduocast::types::{Platform, PostType};
//!
//! # async fn example() {
//! let event_bus = EventBus::new(100);
//! let mut receiver = event_bus.subscribe();
//!
//! event_bus.emit(Event::UploadStarted {
//!     upload_id: "1760779800000".to_string(),
//!     platform: Platform::Instagram,
//!     post_type: PostType::Carousel,
//! });
//!
//! if let Ok(event) = receiver.recv().await {
//!     println!("Received: {:?}", event);
//! }
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::platforms::ProgressReporter;
use crate::types::{Platform, PostType, UploadRecord};

/// Event receiver type alias
pub type EventReceiver = broadcast::Receiver<Event>;

/// Broadcast bus for upload events
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events per subscriber
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events emitted from now on
    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers
    pub fn emit(&self, event: Event) {
        // Err only means nobody is listening
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Events emitted during an upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Upload accepted and the first remote call is about to be issued
    UploadStarted {
        upload_id: String,
        platform: Platform,
        post_type: PostType,
    },

    /// One remote step of the sequence completed
    StepCompleted {
        upload_id: String,
        platform: Platform,
        step: String,
    },

    /// The post was published; `record` was added to the history
    UploadSucceeded {
        upload_id: String,
        message: String,
        record: UploadRecord,
    },

    /// The upload failed; nothing was added to the history
    UploadFailed {
        upload_id: String,
        platform: Platform,
        error: String,
    },
}

impl Event {
    pub fn upload_id(&self) -> &str {
        match self {
            Event::UploadStarted { upload_id, .. }
            | Event::StepCompleted { upload_id, .. }
            | Event::UploadSucceeded { upload_id, .. }
            | Event::UploadFailed { upload_id, .. } => upload_id,
        }
    }
}

/// Forwards publisher progress onto the bus as `StepCompleted`
pub(crate) struct BusProgress<'a> {
    pub event_bus: &'a EventBus,
    pub upload_id: &'a str,
    pub platform: Platform,
}

impl ProgressReporter for BusProgress<'_> {
    fn step_completed(&self, step: &str) {
        tracing::debug!(upload_id = self.upload_id, step, "Upload step completed");
        self.event_bus.emit(Event::StepCompleted {
            upload_id: self.upload_id.to_string(),
            platform: self.platform,
            step: step.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_event_emission_and_subscription() {
        let event_bus = EventBus::new(10);
        let mut receiver = event_bus.subscribe();

        event_bus.emit(Event::UploadStarted {
            upload_id: "test123".to_string(),
            platform: Platform::Facebook,
            post_type: PostType::Text,
        });

        match receiver.recv().await.unwrap() {
            Event::UploadStarted {
                upload_id,
                platform,
                post_type,
            } => {
                assert_eq!(upload_id, "test123");
                assert_eq!(platform, Platform::Facebook);
                assert_eq!(post_type, PostType::Text);
            }
            _ => panic!("Wrong event type received"),
        }
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let event_bus = EventBus::new(10);
        let mut receiver1 = event_bus.subscribe();
        let mut receiver2 = event_bus.subscribe();

        event_bus.emit(Event::StepCompleted {
            upload_id: "u1".to_string(),
            platform: Platform::Instagram,
            step: "media container created".to_string(),
        });

        assert_eq!(receiver1.recv().await.unwrap().upload_id(), "u1");
        assert_eq!(receiver2.recv().await.unwrap().upload_id(), "u1");
    }

    #[tokio::test]
    async fn test_no_subscribers() {
        let event_bus = EventBus::new(10);

        event_bus.emit(Event::UploadFailed {
            upload_id: "u2".to_string(),
            platform: Platform::Instagram,
            error: "x".to_string(),
        });

        assert_eq!(event_bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_bus_progress_emits_step_events() {
        let event_bus = EventBus::new(10);
        let mut receiver = event_bus.subscribe();

        let progress = BusProgress {
            event_bus: &event_bus,
            upload_id: "u3",
            platform: Platform::Instagram,
        };
        progress.step_completed("carousel item 1/2 created");

        match receiver.recv().await.unwrap() {
            Event::StepCompleted { step, platform, .. } => {
                assert_eq!(step, "carousel item 1/2 created");
                assert_eq!(platform, Platform::Instagram);
            }
            other => panic!("Expected StepCompleted, got {:?}", other),
        }
    }

    #[test]
    fn test_event_serialization() {
        let event = Event::UploadFailed {
            upload_id: "serial_test".to_string(),
            platform: Platform::Facebook,
            error: "Network timeout".to_string(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("upload_failed"));
        assert!(json.contains("\"platform\":\"facebook\""));

        let deserialized: Event = serde_json::from_str(&json).unwrap();
        match deserialized {
            Event::UploadFailed { upload_id, error, .. } => {
                assert_eq!(upload_id, "serial_test");
                assert_eq!(error, "Network timeout");
            }
            _ => panic!("Deserialization failed"),
        }
    }
}
