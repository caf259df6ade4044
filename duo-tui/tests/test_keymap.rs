//! Test keybinding mappings to actions
//!
//! Drives the reducer with synthetic key events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use duo_tui::app::{reduce, Action, AppState, FormField, Screen, ToastKind};
use libduocast::{Platform, PostType};

fn key(code: KeyCode) -> Action {
    Action::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(c: char) -> Action {
    Action::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

fn open(platform: Platform) -> AppState {
    reduce(AppState::new(), Action::OpenUpload(platform))
}

#[test]
fn test_q_quits_from_home() {
    let state = reduce(AppState::new(), key(KeyCode::Char('q')));
    assert!(state.should_quit);
}

#[test]
fn test_q_does_not_quit_in_upload_form() {
    let state = reduce(open(Platform::Instagram), key(KeyCode::Char('q')));
    assert!(!state.should_quit);
}

#[test]
fn test_ctrl_c_quits_anywhere() {
    let state = reduce(open(Platform::Facebook), ctrl('c'));
    assert!(state.should_quit);
}

#[test]
fn test_f1_toggles_help() {
    let state = reduce(AppState::new(), key(KeyCode::F(1)));
    assert!(state.help_visible);

    let state = reduce(state, key(KeyCode::F(1)));
    assert!(!state.help_visible);
}

#[test]
fn test_esc_hides_help_before_closing_modal() {
    let state = reduce(open(Platform::Instagram), key(KeyCode::F(1)));
    let state = reduce(state, key(KeyCode::Esc));
    assert!(!state.help_visible);
    assert_eq!(state.current_screen, Screen::Upload);
}

#[test]
fn test_arrows_and_tab_select_platform() {
    let state = reduce(AppState::new(), key(KeyCode::Right));
    assert_eq!(state.selected_platform, Platform::Facebook);

    let state = reduce(state, key(KeyCode::Left));
    assert_eq!(state.selected_platform, Platform::Instagram);

    let state = reduce(state, key(KeyCode::Tab));
    assert_eq!(state.selected_platform, Platform::Facebook);
}

#[test]
fn test_enter_opens_selected_platform() {
    let state = reduce(AppState::new(), key(KeyCode::Right));
    let state = reduce(state, key(KeyCode::Enter));

    assert_eq!(state.current_screen, Screen::Upload);
    assert_eq!(state.form.platform, Platform::Facebook);
    assert_eq!(state.form.post_type, PostType::Text);
}

#[test]
fn test_shortcut_letters_open_platforms() {
    let state = reduce(AppState::new(), key(KeyCode::Char('f')));
    assert_eq!(state.form.platform, Platform::Facebook);

    let state = reduce(AppState::new(), key(KeyCode::Char('i')));
    assert_eq!(state.form.platform, Platform::Instagram);
    assert_eq!(state.form.post_type, PostType::Image);
}

#[test]
fn test_esc_closes_modal() {
    let state = reduce(open(Platform::Facebook), key(KeyCode::Esc));
    assert_eq!(state.current_screen, Screen::Home);
}

#[test]
fn test_left_right_change_post_type_on_selector_only() {
    let state = reduce(open(Platform::Facebook), key(KeyCode::Right));
    assert_eq!(state.form.post_type, PostType::Image);

    let state = reduce(state, key(KeyCode::Tab));
    assert_eq!(state.form.focus, FormField::MediaUrls);
    let state = reduce(state, key(KeyCode::Right));
    assert_eq!(state.form.post_type, PostType::Image);
}

#[test]
fn test_post_type_selector_wraps() {
    let state = reduce(open(Platform::Facebook), key(KeyCode::Left));
    assert_eq!(state.form.post_type, PostType::Video);
}

#[test]
fn test_tab_cycles_visible_fields() {
    let mut state = open(Platform::Instagram);
    let mut order = vec![state.form.focus];
    for _ in 0..4 {
        state = reduce(state, key(KeyCode::Tab));
        order.push(state.form.focus);
    }
    assert_eq!(
        order,
        vec![
            FormField::PostType,
            FormField::MediaUrls,
            FormField::Caption,
            FormField::Hashtags,
            FormField::Submit,
        ]
    );

    let state = reduce(state, key(KeyCode::Tab));
    assert_eq!(state.form.focus, FormField::PostType);

    let state = reduce(state, key(KeyCode::BackTab));
    assert_eq!(state.form.focus, FormField::Submit);
}

#[test]
fn test_ctrl_s_requests_submit() {
    let state = reduce(open(Platform::Facebook), ctrl('s'));
    assert!(state.form.submit_requested);
}

#[test]
fn test_enter_on_submit_requests_submit() {
    let state = reduce(open(Platform::Facebook), key(KeyCode::BackTab));
    assert_eq!(state.form.focus, FormField::Submit);

    let state = reduce(state, key(KeyCode::Enter));
    assert!(state.form.submit_requested);
}

#[test]
fn test_submit_ignored_on_home() {
    let state = reduce(AppState::new(), ctrl('s'));
    assert!(!state.form.submit_requested);
}

#[test]
fn test_esc_dismisses_toast_first() {
    let state = reduce(
        open(Platform::Instagram),
        Action::ShowToast {
            message: "Upload failed".to_string(),
            kind: ToastKind::Error,
        },
    );

    let state = reduce(state, key(KeyCode::Esc));
    assert!(state.toasts.is_empty());
    assert_eq!(state.current_screen, Screen::Upload);

    let state = reduce(state, key(KeyCode::Esc));
    assert_eq!(state.current_screen, Screen::Home);
}
