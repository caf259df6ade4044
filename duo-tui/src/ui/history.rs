//! Upload history panel

use chrono::{DateTime, Local, TimeZone};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use libduocast::{Platform, UploadRecord, UploadStatus};

use super::fg;

const CAPTION_PREVIEW_CHARS: usize = 80;

/// Short local timestamp, e.g. `Oct 18, 09:30`
pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format("%b %d, %H:%M").to_string()
}

/// Caption cut to a single preview line
pub fn caption_preview(caption: &str) -> String {
    let first_line = caption.lines().next().unwrap_or_default().trim();
    if first_line.is_empty() {
        return "(no caption)".to_string();
    }

    let mut preview: String = first_line.chars().take(CAPTION_PREVIEW_CHARS).collect();
    if first_line.chars().count() > CAPTION_PREVIEW_CHARS || caption.lines().count() > 1 {
        preview.push('…');
    }
    preview
}

pub fn platform_color(platform: Platform) -> Color {
    match platform {
        Platform::Instagram => Color::Magenta,
        Platform::Facebook => Color::Blue,
    }
}

fn record_lines(record: &UploadRecord, colors: bool) -> Vec<Line<'static>> {
    let status_style = match record.status {
        UploadStatus::Success => fg(colors, Color::Green),
        UploadStatus::Error => fg(colors, Color::Red),
    };
    let local = record.created_at.with_timezone(&Local);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{:<9}", record.platform.display_name()),
                fg(colors, platform_color(record.platform)).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{:<9}", record.post_type.as_str().to_uppercase()),
                fg(colors, Color::Gray),
            ),
            Span::styled(format!("{:<8}", record.status), status_style),
            Span::styled(format_timestamp(&local), fg(colors, Color::DarkGray)),
        ]),
        Line::from(format!("  {}", caption_preview(&record.caption))),
    ];

    if let Some(url) = record.thumbnail_url.as_ref().or(record.media_url.as_ref()) {
        lines.push(Line::from(Span::styled(
            format!("  {}", url),
            fg(colors, Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    lines
}

pub fn render_history(frame: &mut Frame, area: Rect, history: &[UploadRecord], colors: bool) {
    let block = Block::default()
        .title(" Upload History ")
        .borders(Borders::ALL);

    if history.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No posts yet",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Your upload history will appear here",
                fg(colors, Color::Gray),
            )),
        ])
        .block(block)
        .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let lines: Vec<Line> = history
        .iter()
        .flat_map(|record| record_lines(record, colors))
        .collect();
    let panel = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_timestamp() {
        let at = Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        assert_eq!(format_timestamp(&at), "Oct 18, 09:30");
    }

    #[test]
    fn test_caption_preview() {
        assert_eq!(caption_preview(""), "(no caption)");
        assert_eq!(caption_preview("Short"), "Short");
        assert_eq!(caption_preview("First\nSecond"), "First…");

        let long = "x".repeat(CAPTION_PREVIEW_CHARS + 5);
        let preview = caption_preview(&long);
        assert_eq!(preview.chars().count(), CAPTION_PREVIEW_CHARS + 1);
        assert!(preview.ends_with('…'));
    }
}
