use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::centered_rect_fixed;

/// Render the delete confirmation popup
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(id) = app.store.pending_delete() else {
        return;
    };

    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.red)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let bright_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let name = app
        .store
        .find(id)
        .map(|t| format!("\"{}\"", t.title))
        .unwrap_or_else(|| format!("task {}", id));

    let lines = vec![
        Line::from(Span::styled(" Delete Task", header_style)),
        Line::from(""),
        Line::from(Span::styled(
            "  Are you sure you want to delete this task?",
            text_style,
        )),
        Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled(name, bright_style),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y", dim_style),
            Span::styled(" delete  ", text_style),
            Span::styled("n", dim_style),
            Span::styled(" cancel", text_style),
        ]),
    ];

    let popup_w: u16 = 50.min(area.width.saturating_sub(2));
    let popup_h = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.red).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        overlay_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskId;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn nothing_without_pending_delete() {
        let app = app_with_tasks(sample_tasks());
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_popup(frame, &app, area);
        });
        assert_eq!(output, "");
    }

    #[test]
    fn names_the_task() {
        let mut app = app_with_tasks(sample_tasks());
        app.store.request_remove(TaskId::Number(1));
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_popup(frame, &app, area);
        });
        assert!(output.contains("Delete Task"));
        assert!(output.contains("\"Buy milk\""));
    }
}
