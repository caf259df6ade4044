//! Error types for Duocast

use thiserror::Error;

use crate::types::{Platform, PostType};

pub type Result<T> = std::result::Result<T, DuocastError>;

/// Fallback shown to the operator when an error carries no message
pub const FALLBACK_FAILURE_MESSAGE: &str = "Failed to upload post";

#[derive(Error, Debug)]
pub enum DuocastError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DuocastError {
    /// Message suitable for a toast in front of the operator
    ///
    /// Remote rejections surface the message the Graph API supplied, without
    /// our own prefixes. Everything else uses its display form.
    pub fn user_message(&self) -> String {
        let message = match self {
            DuocastError::Platform(PlatformError::RemoteRejection(msg)) => msg.clone(),
            DuocastError::Platform(err) => err.to_string(),
            DuocastError::InvalidInput(msg) => msg.clone(),
            DuocastError::Config(err) => err.to_string(),
        };

        if message.trim().is_empty() {
            FALLBACK_FAILURE_MESSAGE.to_string()
        } else {
            message
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Error, Debug, Clone)]
pub enum PlatformError {
    #[error("Unsupported post type for {platform}: {post_type}")]
    UnsupportedPostType {
        platform: Platform,
        post_type: PostType,
    },

    #[error("Remote rejected the request: {0}")]
    RemoteRejection(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_post_type_formatting() {
        let error = PlatformError::UnsupportedPostType {
            platform: Platform::Facebook,
            post_type: PostType::Reel,
        };
        assert_eq!(error.to_string(), "Unsupported post type for Facebook: reel");
    }

    #[test]
    fn test_user_message_uses_remote_message_verbatim() {
        let error: DuocastError =
            PlatformError::RemoteRejection("Invalid OAuth access token.".to_string()).into();
        assert_eq!(error.user_message(), "Invalid OAuth access token.");
    }

    #[test]
    fn test_user_message_for_network_error() {
        let error: DuocastError = PlatformError::Network("dns lookup failed".to_string()).into();
        assert_eq!(error.user_message(), "Network error: dns lookup failed");
    }

    #[test]
    fn test_user_message_falls_back_when_empty() {
        let error: DuocastError = PlatformError::RemoteRejection("  ".to_string()).into();
        assert_eq!(error.user_message(), FALLBACK_FAILURE_MESSAGE);

        let error = DuocastError::InvalidInput(String::new());
        assert_eq!(error.user_message(), FALLBACK_FAILURE_MESSAGE);
    }

    #[test]
    fn test_error_message_formatting_invalid_input() {
        let error = DuocastError::InvalidInput("Media URL is required".to_string());
        assert_eq!(format!("{}", error), "Invalid input: Media URL is required");
    }

    #[test]
    fn test_error_message_formatting_config() {
        let config_error = ConfigError::MissingField("config directory".to_string());
        let error = DuocastError::Config(config_error);
        assert_eq!(
            format!("{}", error),
            "Configuration error: Missing required field: config directory"
        );
    }

    #[test]
    fn test_error_conversion_from_platform_error() {
        let platform_error = PlatformError::MalformedResponse("no id".to_string());
        let duocast_error: DuocastError = platform_error.into();

        match duocast_error {
            DuocastError::Platform(PlatformError::MalformedResponse(_)) => {}
            _ => panic!("Expected DuocastError::Platform"),
        }
    }

    #[test]
    fn test_platform_error_clone() {
        let original = PlatformError::Network("Connection failed".to_string());
        let cloned = original.clone();

        assert_eq!(format!("{}", original), format!("{}", cloned));
    }
}
