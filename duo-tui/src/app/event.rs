//! Event handling infrastructure
//!
//! Polls terminal events and turns upload events from the service layer
//! into actions, so the event loop sees a single action stream.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use libduocast::service::Event;

use crate::app::Action;

/// Terminal events that can be dispatched
#[derive(Debug, Clone)]
pub enum TuiEvent {
    Key(KeyEvent),

    Resize(u16, u16),

    /// Nothing happened within one tick
    Tick,
}

impl From<TuiEvent> for Action {
    fn from(event: TuiEvent) -> Self {
        match event {
            TuiEvent::Key(key) => Action::Key(key),
            TuiEvent::Resize(w, h) => Action::Resize(w, h),
            TuiEvent::Tick => Action::Tick,
        }
    }
}

/// Map an upload event to the action that reflects it in the UI
pub fn service_event_to_action(event: Event) -> Action {
    match event {
        Event::UploadStarted { .. } => Action::UploadStarted,
        Event::StepCompleted { step, .. } => Action::UploadProgress(step),
        Event::UploadSucceeded {
            message, record, ..
        } => Action::UploadSucceeded { message, record },
        Event::UploadFailed { error, .. } => Action::UploadFailed { message: error },
    }
}

/// Event handler that polls for terminal events
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event, blocking up to one tick
    pub fn next(&self) -> std::io::Result<TuiEvent> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                // Windows reports releases too
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    Ok(TuiEvent::Key(key))
                }
                CrosstermEvent::Resize(w, h) => Ok(TuiEvent::Resize(w, h)),
                _ => Ok(TuiEvent::Tick),
            }
        } else {
            Ok(TuiEvent::Tick)
        }
    }
}
