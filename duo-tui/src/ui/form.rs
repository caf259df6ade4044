//! Upload modal with tui-textarea fields
//!
//! Text areas are stateful widgets, so they live next to `AppState` in the
//! event loop rather than inside it. Every edit is mirrored into state
//! through `Action::FieldChanged`.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_textarea::TextArea;

use libduocast::PostType;

use super::{centered_rect, fg, highlight};
use super::history::platform_color;
use crate::app::{AppState, FormField, Screen};

/// Editors for the text fields of the upload modal
pub struct FormEditors<'a> {
    media_urls: TextArea<'a>,
    caption: TextArea<'a>,
    hashtags: TextArea<'a>,
}

impl Default for FormEditors<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> FormEditors<'a> {
    pub fn new() -> Self {
        let mut media_urls = TextArea::default();
        media_urls.set_placeholder_text("https://example.com/image.jpg");

        let mut caption = TextArea::default();
        caption.set_placeholder_text("Write your caption here...");

        let mut hashtags = TextArea::default();
        hashtags.set_placeholder_text("#socialmedia #api #test");

        Self {
            media_urls,
            caption,
            hashtags,
        }
    }

    fn editor_mut(&mut self, field: FormField) -> Option<&mut TextArea<'a>> {
        match field {
            FormField::MediaUrls => Some(&mut self.media_urls),
            FormField::Caption => Some(&mut self.caption),
            FormField::Hashtags => Some(&mut self.hashtags),
            FormField::PostType | FormField::Submit => None,
        }
    }

    /// Feed a key to a field's editor and return the field's new content
    pub fn input(&mut self, field: FormField, key: KeyEvent) -> Option<String> {
        let editor = self.editor_mut(field)?;
        editor.input(key);
        Some(editor.lines().join("\n"))
    }

    pub fn content(&self, field: FormField) -> String {
        match field {
            FormField::MediaUrls => self.media_urls.lines().join("\n"),
            FormField::Caption => self.caption.lines().join("\n"),
            FormField::Hashtags => self.hashtags.lines().join("\n"),
            FormField::PostType | FormField::Submit => String::new(),
        }
    }

    /// Restyle editors for the focused field and post type
    pub fn sync(&mut self, state: &AppState) {
        let form = &state.form;
        let colors = state.config.colors_enabled;
        let media_placeholder = if form.post_type == PostType::Carousel {
            "https://example.com/image1.jpg\nhttps://example.com/image2.jpg"
        } else {
            "https://example.com/image.jpg"
        };
        self.media_urls.set_placeholder_text(media_placeholder);

        let media_title = if form.post_type == PostType::Carousel {
            " Media URL(s) (one per line) "
        } else {
            " Media URL(s) "
        };

        for (field, title) in [
            (FormField::MediaUrls, media_title),
            (FormField::Caption, " Caption "),
            (FormField::Hashtags, " Hashtags (optional) "),
        ] {
            let focused = form.focus == field && !form.submitting;
            if let Some(editor) = self.editor_mut(field) {
                editor.set_block(field_block(title, focused, colors));
                editor.set_placeholder_style(fg(colors, Color::DarkGray));
                editor.set_cursor_style(if focused {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                });
                editor.set_cursor_line_style(Style::default());
            }
        }
    }
}

/// Whether a key edits the focused text field instead of driving the form
pub fn routes_to_editor(state: &AppState, key: &KeyEvent) -> bool {
    let form = &state.form;
    if state.current_screen != Screen::Upload
        || state.help_visible
        || form.submitting
        || !form.focus.is_text()
    {
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Esc, _)
        | (KeyCode::Tab, _)
        | (KeyCode::BackTab, _)
        | (KeyCode::F(_), _)
        | (KeyCode::Char('s'), KeyModifiers::CONTROL)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => false,
        // Hashtags are a single line
        (KeyCode::Enter, _) => form.focus != FormField::Hashtags,
        _ => true,
    }
}

fn field_block(title: &str, focused: bool, colors: bool) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(if focused {
            fg(colors, Color::Cyan)
        } else {
            fg(colors, Color::DarkGray)
        })
}

fn render_post_type_selector(frame: &mut Frame, area: Rect, state: &AppState) {
    let form = &state.form;
    let colors = state.config.colors_enabled;
    let focused = form.focus == FormField::PostType && !form.submitting;

    let mut spans = Vec::new();
    for post_type in form.platform.supported_post_types() {
        let style = if *post_type == form.post_type {
            highlight(colors, platform_color(form.platform)).add_modifier(Modifier::BOLD)
        } else {
            fg(colors, Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", post_type.label()), style));
        spans.push(Span::raw(" "));
    }

    let selector = Paragraph::new(Line::from(spans)).block(field_block(" Post Type (←/→) ", focused, colors));
    frame.render_widget(selector, area);
}

fn render_actions(frame: &mut Frame, area: Rect, state: &AppState) {
    let form = &state.form;
    let colors = state.config.colors_enabled;

    let lines = if form.submitting {
        let mut lines = vec![Line::from(Span::styled(
            "Posting...",
            fg(colors, Color::Yellow).add_modifier(Modifier::BOLD),
        ))];
        lines.extend(
            form.progress
                .iter()
                .map(|step| Line::from(Span::styled(format!("✓ {}", step), fg(colors, Color::Green)))),
        );
        lines
    } else {
        let submit_style = if form.focus == FormField::Submit {
            highlight(colors, Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            fg(colors, Color::Cyan).add_modifier(Modifier::BOLD)
        };
        vec![Line::from(vec![
            Span::styled(
                format!(" Post to {} ", form.platform.display_name()),
                submit_style,
            ),
            Span::raw("   "),
            Span::styled("Ctrl+S: Post | Tab: Next field | Esc: Cancel", fg(colors, Color::Gray)),
        ])]
    };

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

/// Render the upload modal over whatever is on screen
pub fn render_upload_modal(frame: &mut Frame, area: Rect, state: &AppState, editors: &FormEditors) {
    let form = &state.form;
    let colors = state.config.colors_enabled;
    let popup = centered_rect(70, 90, area);

    let block = Block::default()
        .title(format!(" Upload to {} ", form.platform.display_name()))
        .borders(Borders::ALL)
        .border_style(fg(colors, platform_color(form.platform)));
    let inner = block.inner(popup);

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    let mut constraints = vec![Constraint::Length(3)];
    if form.is_visible(FormField::MediaUrls) {
        let rows = if form.post_type == PostType::Carousel { 6 } else { 4 };
        constraints.push(Constraint::Length(rows));
        constraints.push(Constraint::Length(1));
    }
    if form.is_visible(FormField::Caption) {
        constraints.push(Constraint::Min(4));
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(form.warnings.len() as u16));
    constraints.push(Constraint::Length(if form.submitting {
        1 + form.progress.len() as u16
    } else {
        1
    }));
    if !form.is_visible(FormField::Caption) {
        constraints.push(Constraint::Min(0));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let mut next = 0;
    let mut take = || {
        let rect = chunks[next];
        next += 1;
        rect
    };

    render_post_type_selector(frame, take(), state);

    if form.is_visible(FormField::MediaUrls) {
        frame.render_widget(&editors.media_urls, take());
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Must be publicly accessible HTTPS URLs",
                fg(colors, Color::DarkGray),
            )),
            take(),
        );
    }

    if form.is_visible(FormField::Caption) {
        frame.render_widget(&editors.caption, take());
        frame.render_widget(&editors.hashtags, take());
    }

    let warnings: Vec<Line> = form
        .warnings
        .iter()
        .map(|w| Line::from(Span::styled(format!("! {}", w), fg(colors, Color::Yellow))))
        .collect();
    frame.render_widget(Paragraph::new(warnings), take());

    render_actions(frame, take(), state);
}
