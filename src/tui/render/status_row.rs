use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, Mode};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = Vec::new();
    if let Some(ref message) = app.status_message {
        spans.push(Span::styled(
            format!(" ! {}", message),
            Style::default().fg(app.theme.red).bg(bg),
        ));
    } else if app.store.loading() {
        spans.push(Span::styled(
            " Saving...",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    } else if app.in_flight > 0 {
        spans.push(Span::styled(
            " Syncing...",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let hint = match app.mode() {
        Mode::Navigate => "a add  e edit  space toggle  d delete  r reload  ? help  q quit ",
        Mode::Edit => "Enter/Ctrl+S save  Tab switch  Esc cancel ",
        Mode::Confirm => "y delete  n cancel ",
    };
    let content_width: usize = spans.iter().map(|s| s.content.width()).sum();
    let hint_width = hint.width();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
