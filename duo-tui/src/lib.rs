//! duo-tui library
//!
//! Exports the app, rendering and service bridge for the binary and tests.

pub mod app;
pub mod error;
pub mod services;
pub mod terminal;
pub mod ui;

pub use app::{reduce, Action, AppState, Screen};
pub use error::{Result, TuiError};
