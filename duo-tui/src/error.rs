//! Error types for duo-tui
//!
//! Wraps service layer errors and terminal I/O errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Service error: {0}")]
    Service(#[from] libduocast::DuocastError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Result type for TUI operations
pub type Result<T> = std::result::Result<T, TuiError>;
