//! Pure reducer function for state transitions
//!
//! `(State, Action) -> State`. No I/O happens here: starting an upload is
//! signalled through `FormState::submit_requested` and carried out by the
//! event loop.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use libduocast::Platform;

use super::actions::{Action, Screen};
use super::state::{AppState, FormField, FormState, Toast, ToastKind};

/// Pure reducer function
///
/// # Purity Guarantees
///
/// - No network requests
/// - No file I/O
/// - Deterministic (same inputs -> same output)
pub fn reduce(state: AppState, action: Action) -> AppState {
    match action {
        // === UI Events ===
        Action::Key(key) => handle_key(state, key),
        Action::Tick => age_toasts(state),
        Action::Resize(_, _) => state,

        // === Navigation ===
        Action::Quit => AppState {
            should_quit: true,
            ..state
        },

        Action::ShowHelp => AppState {
            help_visible: true,
            ..state
        },

        Action::HideHelp => AppState {
            help_visible: false,
            ..state
        },

        Action::SelectPlatform(platform) => AppState {
            selected_platform: platform,
            ..state
        },

        Action::OpenUpload(platform) => AppState {
            current_screen: Screen::Upload,
            selected_platform: platform,
            form: FormState::new(platform),
            ..state
        },

        Action::CloseUpload if state.form.submitting => state,

        Action::CloseUpload => AppState {
            current_screen: Screen::Home,
            form: FormState::new(state.form.platform),
            ..state
        },

        // === Form ===
        Action::FocusNext => move_focus(state, 1),

        Action::FocusPrev => move_focus(state, -1),

        Action::NextPostType => cycle_post_type(state, 1),

        Action::PrevPostType => cycle_post_type(state, -1),

        Action::FieldChanged { field, value } => {
            let mut form = state.form;
            match field {
                FormField::MediaUrls => form.media_urls = value,
                FormField::Caption => form.caption = value,
                FormField::Hashtags => form.hashtags = value,
                FormField::PostType | FormField::Submit => {}
            }
            AppState { form, ..state }
        }

        Action::FormWarnings(warnings) => AppState {
            form: FormState {
                warnings,
                ..state.form
            },
            ..state
        },

        Action::SubmitRequested if state.can_submit() => AppState {
            form: FormState {
                submit_requested: true,
                ..state.form
            },
            ..state
        },

        Action::SubmitRequested => state,

        // === Upload lifecycle ===
        Action::UploadStarted => AppState {
            form: FormState {
                submit_requested: false,
                submitting: true,
                progress: Vec::new(),
                ..state.form
            },
            ..state
        },

        Action::UploadProgress(step) => {
            let mut form = state.form;
            form.progress.push(step);
            AppState { form, ..state }
        }

        Action::UploadSucceeded { message, record } => {
            let mut history = state.history;
            history.insert(0, record);

            let state = AppState {
                current_screen: Screen::Home,
                form: FormState::new(state.form.platform),
                history,
                ..state
            };
            push_toast(state, message, ToastKind::Success)
        }

        Action::UploadFailed { message } => {
            let state = AppState {
                form: FormState {
                    submit_requested: false,
                    submitting: false,
                    progress: Vec::new(),
                    ..state.form
                },
                ..state
            };
            push_toast(state, message, ToastKind::Error)
        }

        // === Toasts ===
        Action::ShowToast { message, kind } => push_toast(state, message, kind),

        Action::DismissToast => {
            let mut toasts = state.toasts;
            toasts.pop();
            AppState { toasts, ..state }
        }
    }
}

fn push_toast(state: AppState, message: String, kind: ToastKind) -> AppState {
    let mut toasts = state.toasts;
    toasts.push(Toast {
        message,
        kind,
        ticks_remaining: state.config.toast_ticks,
    });
    AppState { toasts, ..state }
}

fn age_toasts(state: AppState) -> AppState {
    let toasts = state
        .toasts
        .into_iter()
        .filter_map(|toast| {
            let ticks_remaining = toast.ticks_remaining.saturating_sub(1);
            (ticks_remaining > 0).then_some(Toast {
                ticks_remaining,
                ..toast
            })
        })
        .collect();
    AppState { toasts, ..state }
}

fn move_focus(state: AppState, step: isize) -> AppState {
    let fields = state.form.visible_fields();
    let current = fields
        .iter()
        .position(|f| *f == state.form.focus)
        .unwrap_or(0) as isize;
    let len = fields.len() as isize;
    let focus = fields[(current + step).rem_euclid(len) as usize];

    AppState {
        form: FormState {
            focus,
            ..state.form
        },
        ..state
    }
}

fn cycle_post_type(state: AppState, step: isize) -> AppState {
    if state.form.submitting {
        return state;
    }

    let options = state.form.platform.supported_post_types();
    let current = options
        .iter()
        .position(|t| *t == state.form.post_type)
        .unwrap_or(0) as isize;
    let len = options.len() as isize;
    let post_type = options[(current + step).rem_euclid(len) as usize];

    AppState {
        form: FormState {
            post_type,
            warnings: Vec::new(),
            ..state.form
        },
        ..state
    }
}

/// Map keys to actions. This is where keybindings are defined.
fn handle_key(state: AppState, key: KeyEvent) -> AppState {
    // Global keybindings
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            return reduce(state, Action::Quit);
        }

        (KeyCode::F(1), _) => {
            let action = if state.help_visible {
                Action::HideHelp
            } else {
                Action::ShowHelp
            };
            return reduce(state, action);
        }

        (KeyCode::Esc, _) if state.help_visible => {
            return reduce(state, Action::HideHelp);
        }

        (KeyCode::Esc, _) if state.active_toast().is_some() => {
            return reduce(state, Action::DismissToast);
        }

        _ => {}
    }

    if state.help_visible {
        return state;
    }

    match state.current_screen {
        Screen::Home => handle_home_key(state, key),
        Screen::Upload => handle_upload_key(state, key),
    }
}

fn handle_home_key(state: AppState, key: KeyEvent) -> AppState {
    let other = match state.selected_platform {
        Platform::Instagram => Platform::Facebook,
        Platform::Facebook => Platform::Instagram,
    };

    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => reduce(state, Action::Quit),

        (KeyCode::Left, _) => reduce(state, Action::SelectPlatform(Platform::Instagram)),
        (KeyCode::Right, _) => reduce(state, Action::SelectPlatform(Platform::Facebook)),
        (KeyCode::Tab, _) | (KeyCode::BackTab, _) => reduce(state, Action::SelectPlatform(other)),

        (KeyCode::Enter, _) => {
            let platform = state.selected_platform;
            reduce(state, Action::OpenUpload(platform))
        }
        (KeyCode::Char('i'), KeyModifiers::NONE) => {
            reduce(state, Action::OpenUpload(Platform::Instagram))
        }
        (KeyCode::Char('f'), KeyModifiers::NONE) => {
            reduce(state, Action::OpenUpload(Platform::Facebook))
        }

        _ => state,
    }
}

fn handle_upload_key(state: AppState, key: KeyEvent) -> AppState {
    let focus = state.form.focus;

    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => reduce(state, Action::CloseUpload),

        (KeyCode::Char('s'), KeyModifiers::CONTROL) => reduce(state, Action::SubmitRequested),

        (KeyCode::Tab, _) | (KeyCode::Down, _) => reduce(state, Action::FocusNext),
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => reduce(state, Action::FocusPrev),

        (KeyCode::Left, _) if focus == FormField::PostType => {
            reduce(state, Action::PrevPostType)
        }
        (KeyCode::Right, _) if focus == FormField::PostType => {
            reduce(state, Action::NextPostType)
        }

        (KeyCode::Enter, _) if focus == FormField::Submit => {
            reduce(state, Action::SubmitRequested)
        }
        (KeyCode::Enter, _) => reduce(state, Action::FocusNext),

        _ => state,
    }
}
