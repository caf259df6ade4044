//! Application state
//!
//! Plain data. All state transitions happen through the reducer (see
//! `reducer.rs`).

use libduocast::service::UploadForm;
use libduocast::{Platform, PostType, UploadRecord};

use super::actions::Screen;

/// Ticks a toast stays on screen unless dismissed
pub const DEFAULT_TOAST_TICKS: u16 = 40;

/// Root application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub should_quit: bool,

    pub current_screen: Screen,

    pub help_visible: bool,

    /// Platform card highlighted on the home screen
    pub selected_platform: Platform,

    /// Platforms still using placeholder credentials
    pub unconfigured: Vec<Platform>,

    /// Upload modal state; reset every time the modal opens
    pub form: FormState,

    /// Session history, newest first
    pub history: Vec<UploadRecord>,

    /// Oldest first; the newest is drawn on top
    pub toasts: Vec<Toast>,

    pub config: UiConfig,
}

/// Fields of the upload modal, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    PostType,
    MediaUrls,
    Caption,
    Hashtags,
    Submit,
}

impl FormField {
    /// Whether the field is edited through a text area
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FormField::MediaUrls | FormField::Caption | FormField::Hashtags
        )
    }
}

/// Upload modal state
#[derive(Debug, Clone)]
pub struct FormState {
    pub platform: Platform,
    pub post_type: PostType,
    pub focus: FormField,
    pub caption: String,
    pub hashtags: String,
    pub media_urls: String,

    /// Set by the reducer when the operator submits a valid-looking form;
    /// the event loop starts the upload and clears it
    pub submit_requested: bool,

    /// Upload in flight
    pub submitting: bool,

    /// Completed remote steps of the upload in flight
    pub progress: Vec<String>,

    /// Validation warnings for the current input
    pub warnings: Vec<String>,
}

impl FormState {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            post_type: platform.supported_post_types()[0],
            focus: FormField::PostType,
            caption: String::new(),
            hashtags: String::new(),
            media_urls: String::new(),
            submit_requested: false,
            submitting: false,
            progress: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Fields shown for the selected post type, in focus order
    ///
    /// Media URLs are hidden for text posts; caption and hashtags are hidden
    /// for stories.
    pub fn visible_fields(&self) -> Vec<FormField> {
        let mut fields = vec![FormField::PostType];
        if self.post_type.requires_media() {
            fields.push(FormField::MediaUrls);
        }
        if self.post_type.accepts_caption() {
            fields.push(FormField::Caption);
            fields.push(FormField::Hashtags);
        }
        fields.push(FormField::Submit);
        fields
    }

    pub fn is_visible(&self, field: FormField) -> bool {
        self.visible_fields().contains(&field)
    }

    /// Form as handed to the upload service
    pub fn to_upload_form(&self) -> UploadForm {
        UploadForm {
            platform: self.platform,
            caption: self.caption.clone(),
            hashtags: self.hashtags.clone(),
            media_urls: self.media_urls.clone(),
            post_type: self.post_type,
        }
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::MediaUrls => &self.media_urls,
            FormField::Caption => &self.caption,
            FormField::Hashtags => &self.hashtags,
            FormField::PostType | FormField::Submit => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub ticks_remaining: u16,
}

/// UI configuration
#[derive(Debug, Clone)]
pub struct UiConfig {
    pub colors_enabled: bool,

    /// Tick rate in milliseconds
    pub tick_rate_ms: u64,

    pub toast_ticks: u16,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            should_quit: false,
            current_screen: Screen::Home,
            help_visible: false,
            selected_platform: Platform::Instagram,
            unconfigured: Vec::new(),
            form: FormState::new(Platform::Instagram),
            history: Vec::new(),
            toasts: Vec::new(),
            config: UiConfig::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        let colors_enabled =
            std::env::var("NO_COLOR").is_err() && std::env::var("DUOCAST_TUI_NO_COLOR").is_err();

        let tick_rate_ms = std::env::var("DUOCAST_TUI_TICK_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        Self {
            colors_enabled,
            tick_rate_ms,
            toast_ticks: DEFAULT_TOAST_TICKS,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a submit may start: modal open and nothing in flight
    pub fn can_submit(&self) -> bool {
        self.current_screen == Screen::Upload
            && !self.form.submitting
            && !self.form.submit_requested
    }

    /// Toast currently shown, if any
    pub fn active_toast(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn is_configured(&self, platform: Platform) -> bool {
        !self.unconfigured.contains(&platform)
    }
}
