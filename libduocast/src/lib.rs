//! Duocast - publish to Instagram and Facebook through the Graph API
//!
//! This library holds the publishing sequences for both platforms, the
//! upload orchestrator and session history, and the configuration and
//! logging shared by front ends.

pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod platforms;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{DuocastError, Result};
pub use service::DuocastService;
pub use types::{Platform, PostRequest, PostType, UploadRecord, UploadStatus};
