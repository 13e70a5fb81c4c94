use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph};

use crate::model::Task;
use crate::tui::app::App;
use crate::tui::theme::Theme;

const EMPTY_MESSAGE: &str = "No tasks yet. Create your first task!";

/// Render the task list, or the empty state
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;

    if app.store.tasks().is_empty() {
        let dim_style = Style::default().fg(app.theme.dim).bg(bg);
        // Vertically center the message
        let top = area.height.saturating_sub(1) / 2;
        let mut lines: Vec<Line> = (0..top).map(|_| Line::from("")).collect();
        lines.push(Line::from(Span::styled(EMPTY_MESSAGE, dim_style)));
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().bg(bg));
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .store
        .tasks()
        .iter()
        .map(|task| ListItem::new(task_lines(task, &app.theme)))
        .collect();

    let list = List::new(items)
        .style(Style::default().bg(bg))
        .highlight_style(Style::default().bg(app.theme.selection_bg));

    app.list_state.select(Some(app.cursor));
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Checkbox + title, then description lines and the creation date
fn task_lines<'a>(task: &'a Task, theme: &Theme) -> Vec<Line<'a>> {
    let checkbox = if task.completed { "[x]" } else { "[ ]" };
    let checkbox_style = Style::default()
        .fg(theme.checkbox_color(task.completed))
        .add_modifier(Modifier::BOLD);

    let (title_style, desc_style) = if task.completed {
        (
            Style::default()
                .fg(theme.dim)
                .add_modifier(Modifier::CROSSED_OUT),
            Style::default()
                .fg(theme.dim)
                .add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        (
            Style::default()
                .fg(theme.text_bright)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(theme.text),
        )
    };
    let date_style = Style::default().fg(theme.dim);

    let mut lines = vec![Line::from(vec![
        Span::raw(" "),
        Span::styled(checkbox, checkbox_style),
        Span::raw(" "),
        Span::styled(task.title.as_str(), title_style),
    ])];
    for desc_line in task.description.lines() {
        lines.push(Line::from(vec![
            Span::raw("     "),
            Span::styled(desc_line, desc_style),
        ]));
    }
    lines.push(Line::from(Span::styled(
        format!("     Created: {}", task.created_display()),
        date_style,
    )));
    lines
}
