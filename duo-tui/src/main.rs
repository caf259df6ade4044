//! duo-tui - Terminal UI for Duocast
//!
//! Pick a platform, fill in the upload form and publish to Instagram or
//! Facebook, with progress, notifications and a session history.

use anyhow::Context;
use crossbeam_channel::Receiver;
use duo_tui::{
    app::{event::service_event_to_action, event::EventHandler, reduce, Action, AppState, Screen},
    error::Result,
    services::ServiceHandle,
    terminal::{install_panic_hook, TerminalGuard, Tui},
    ui::{self, form::FormEditors, form::routes_to_editor},
};
use libduocast::config::resolve_data_path;
use libduocast::logging::{self, LoggingConfig};
use libduocast::service::Event;

const TUI_LOG_FILE: &str = "duo-tui.log";

fn main() -> anyhow::Result<()> {
    // The terminal belongs to the UI, so logs go to a file
    let mut log_config: LoggingConfig = logging::config_from_env();
    if log_config.log_file.is_none() {
        let data_dir = resolve_data_path().context("Failed to resolve data directory")?;
        log_config = log_config.with_log_file(data_dir.join(TUI_LOG_FILE));
    }
    if let Err(e) = log_config.init() {
        eprintln!("Warning: file logging disabled: {}", e);
    }

    let services = ServiceHandle::new().context("Failed to initialize Duocast")?;

    install_panic_hook();
    let mut guard = TerminalGuard::enter().context("Failed to set up terminal")?;
    run_app(guard.terminal(), &services)?;
    Ok(())
}

fn init_state(services: &ServiceHandle) -> AppState {
    let mut state = AppState::new();
    state.unconfigured = services.unconfigured_platforms();
    state.history = services.history();
    state
}

fn run_app(terminal: &mut Tui, services: &ServiceHandle) -> Result<()> {
    let mut state = init_state(services);
    let events: Receiver<Event> = services.subscribe();
    let mut editors = FormEditors::new();
    let event_handler = EventHandler::new(state.config.tick_rate_ms);

    tracing::info!(unconfigured = ?state.unconfigured, "duo-tui started");

    loop {
        editors.sync(&state);
        terminal.draw(|frame| ui::render(frame, &state, &editors))?;

        let previous_screen = state.current_screen;
        let previous_type = state.form.post_type;

        let action = match event_handler.next()? {
            duo_tui::app::event::TuiEvent::Key(key) if routes_to_editor(&state, &key) => {
                let field = state.form.focus;
                match editors.input(field, key) {
                    Some(value) => Action::FieldChanged { field, value },
                    None => Action::Key(key),
                }
            }
            other => other.into(),
        };
        let field_edited = matches!(action, Action::FieldChanged { .. });
        state = reduce(state, action);

        // Upload events from the service layer
        while let Ok(event) = events.try_recv() {
            state = reduce(state, service_event_to_action(event));
        }

        // Fresh editors whenever the modal opens or closes
        if state.current_screen != previous_screen {
            editors = FormEditors::new();
        }

        if state.current_screen == Screen::Upload
            && (field_edited || state.form.post_type != previous_type)
        {
            let warnings = services.validate(&state.form.to_upload_form()).warnings;
            state = reduce(state, Action::FormWarnings(warnings));
        }

        if state.form.submit_requested {
            tracing::debug!(
                platform = %state.form.platform.as_str(),
                post_type = %state.form.post_type,
                "Submitting upload"
            );
            services.submit(state.form.to_upload_form());
            state = reduce(state, Action::UploadStarted);
        }

        if state.should_quit {
            break;
        }
    }

    tracing::info!("duo-tui exiting");
    Ok(())
}
