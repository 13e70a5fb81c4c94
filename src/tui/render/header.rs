use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::tui::app::App;

/// Title, API location and task counts
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let title_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let tasks = app.store.tasks();
    let done = tasks.iter().filter(|t| t.completed).count();
    let counts = format!("{}/{} done ", done, tasks.len());

    let title = " Task Manager";
    let mut first = vec![Span::styled(title, title_style)];
    let used = title.width() + counts.width();
    if used < width {
        first.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
        first.push(Span::styled(counts, dim_style));
    }

    let lines = vec![
        Line::from(first),
        Line::from(Span::styled(
            format!(" Organize your tasks efficiently \u{00B7} {}", app.api_url),
            dim_style,
        )),
        Line::from(Span::styled("\u{2500}".repeat(width), dim_style)),
    ];

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn header_shows_counts_and_url() {
        let app = app_with_tasks(sample_tasks());
        let output = render_to_string(TERM_W, 3, |frame, area| {
            render_header(frame, &app, area);
        });
        let first = output.lines().next().unwrap();
        assert!(first.starts_with(" Task Manager"));
        assert!(first.ends_with("1/3 done"));
        assert!(output.contains("http://localhost:5000/api"));
    }
}
