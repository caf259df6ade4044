//! UI rendering
//!
//! Render functions draw state into a frame and never modify it.

pub mod form;
pub mod history;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use libduocast::Platform;

use crate::app::{AppState, Screen, ToastKind};
use form::FormEditors;
use history::platform_color;

/// Render the application UI
pub fn render(frame: &mut Frame, state: &AppState, editors: &FormEditors) {
    let area = frame.area();

    render_home(frame, area, state);

    if state.current_screen == Screen::Upload {
        form::render_upload_modal(frame, area, state, editors);
    }

    if state.help_visible {
        render_help_overlay(frame, area, state.config.colors_enabled);
    }

    render_toast(frame, area, state);
}

fn render_home(frame: &mut Frame, area: Rect, state: &AppState) {
    let colors = state.config.colors_enabled;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(6), // Platform cards
            Constraint::Min(5),    // History
            Constraint::Length(1), // Hints
        ])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Duocast",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Publish your content to Instagram and Facebook",
            fg(colors, Color::Gray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[0]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    for (platform, card_area) in Platform::ALL.into_iter().zip(cards.iter()) {
        render_platform_card(frame, *card_area, state, platform);
    }

    history::render_history(frame, chunks[2], &state.history, colors);

    let hints = Paragraph::new(Span::styled(
        "←/→: Select | Enter: Upload | i/f: Instagram/Facebook | F1: Help | q: Quit",
        fg(colors, Color::Gray),
    ));
    frame.render_widget(hints, chunks[3]);
}

fn render_platform_card(frame: &mut Frame, area: Rect, state: &AppState, platform: Platform) {
    let selected = state.selected_platform == platform && state.current_screen == Screen::Home;
    let colors = state.config.colors_enabled;
    let color = platform_color(platform);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(if selected {
            fg(colors, color)
        } else {
            fg(colors, Color::DarkGray)
        });

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Upload to {}", platform.display_name()),
            fg(colors, color).add_modifier(Modifier::BOLD),
        )),
        Line::from(platform.tagline()),
    ];
    if !state.is_configured(platform) {
        lines.push(Line::from(Span::styled(
            "Credentials not configured",
            fg(colors, Color::Yellow),
        )));
    }

    let card = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(card, area);
}

fn render_toast(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(toast) = state.active_toast() else {
        return;
    };

    let (title, color) = match toast.kind {
        ToastKind::Success => (" Success ", Color::Green),
        ToastKind::Error => (" Error ", Color::Red),
    };

    let width = area.width.min(50);
    let toast_area = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y,
        width,
        height: area.height.min(4),
    };

    let widget = Paragraph::new(toast.message.as_str())
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(fg(state.config.colors_enabled, color)),
        )
        .style(fg(state.config.colors_enabled, color))
        .wrap(Wrap { trim: true });

    frame.render_widget(Clear, toast_area);
    frame.render_widget(widget, toast_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, colors: bool) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Home:"),
        Line::from("  ←/→ Tab  - Select platform"),
        Line::from("  Enter    - Open upload form"),
        Line::from("  i / f    - Upload to Instagram / Facebook"),
        Line::from("  q        - Quit"),
        Line::from(""),
        Line::from("Upload form:"),
        Line::from("  Tab      - Next field"),
        Line::from("  ←/→      - Change post type"),
        Line::from("  Ctrl+S   - Post"),
        Line::from("  Esc      - Cancel"),
        Line::from(""),
        Line::from("Anywhere:"),
        Line::from("  F1       - Toggle help"),
        Line::from("  Esc      - Dismiss notification"),
        Line::from("  Ctrl+C   - Quit"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(fg(colors, Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

/// Foreground style, left plain when colors are disabled
pub(crate) fn fg(colors: bool, color: Color) -> Style {
    if colors {
        Style::default().fg(color)
    } else {
        Style::default()
    }
}

/// Style for the selected item: a colored background, or reverse video
/// when colors are disabled
pub(crate) fn highlight(colors: bool, color: Color) -> Style {
    if colors {
        Style::default().fg(Color::Black).bg(color)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    }
}

/// Centered rectangle taking a percentage of `r`
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
