//! Actions for the reducer pattern
//!
//! Every state transition is triggered by an action. The reducer (see
//! `reducer.rs`) applies them to state.

use crossterm::event::KeyEvent;
use libduocast::{Platform, UploadRecord};

use super::state::{FormField, ToastKind};

#[derive(Debug, Clone)]
pub enum Action {
    // === UI Events ===
    Key(KeyEvent),

    /// Periodic tick; ages toasts
    Tick,

    Resize(u16, u16),

    // === Navigation ===
    Quit,

    ShowHelp,

    HideHelp,

    /// Highlight a platform card on the home screen
    SelectPlatform(Platform),

    /// Open the upload modal for a platform with an empty form
    OpenUpload(Platform),

    /// Close the upload modal, discarding the form
    CloseUpload,

    // === Form ===
    FocusNext,

    FocusPrev,

    NextPostType,

    PrevPostType,

    /// A text field's content changed
    FieldChanged { field: FormField, value: String },

    /// Validation warnings for the current input
    FormWarnings(Vec<String>),

    /// Operator asked to post
    SubmitRequested,

    // === Upload lifecycle ===
    UploadStarted,

    /// A remote step of the upload completed
    UploadProgress(String),

    UploadSucceeded { message: String, record: UploadRecord },

    UploadFailed { message: String },

    // === Toasts ===
    ShowToast { message: String, kind: ToastKind },

    DismissToast,
}

/// Screen identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Platform cards and history
    Home,

    /// Upload modal over the home screen
    Upload,
}
