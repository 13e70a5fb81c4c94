use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, EditField};

use super::centered_rect_fixed;

/// Label for the submit action, as the button would read
pub fn submit_label(app: &App) -> &'static str {
    if app.store.loading() {
        "Saving..."
    } else if app.store.editing().is_some() {
        "Update"
    } else {
        "Create"
    }
}

/// Render the new/edit task modal
pub fn render_editor_modal(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let text_color = app.theme.text;
    let bright = app.theme.text_bright;
    let dim = app.theme.dim;
    let highlight = app.theme.highlight;

    let header_style = Style::default()
        .fg(highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(text_color).bg(bg);
    let focused_label_style = Style::default()
        .fg(bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(bright).bg(bg);
    let dim_style = Style::default().fg(dim).bg(bg);
    let cursor_style = Style::default().fg(highlight).bg(bg);

    let draft = app.store.draft();
    let label_for = |field: EditField| {
        if app.field == field {
            focused_label_style
        } else {
            label_style
        }
    };
    let cursor_for = |field: EditField| {
        if app.field == field {
            Span::styled("\u{258C}", cursor_style)
        } else {
            Span::raw("")
        }
    };

    let title = if app.store.editing().is_some() {
        " Edit Task"
    } else {
        " New Task"
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(title, header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "  Title *",
        label_for(EditField::Title),
    )));
    let title_text = if draft.title.is_empty() && app.field != EditField::Title {
        Span::styled("Enter task title", dim_style)
    } else {
        Span::styled(draft.title.as_str(), value_style)
    };
    lines.push(Line::from(vec![
        Span::styled("  ", label_style),
        title_text,
        cursor_for(EditField::Title),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "  Description",
        label_for(EditField::Description),
    )));
    let desc_lines: Vec<&str> = if draft.description.is_empty() {
        vec![""]
    } else {
        // split('\n') keeps a trailing empty line so the cursor follows Enter
        draft.description.split('\n').collect()
    };
    let last = desc_lines.len() - 1;
    for (i, text) in desc_lines.into_iter().enumerate() {
        let mut spans = vec![Span::styled("  ", label_style)];
        if text.is_empty() && last == 0 && app.field != EditField::Description {
            spans.push(Span::styled("Enter task description", dim_style));
        } else {
            spans.push(Span::styled(text, value_style));
        }
        if i == last {
            spans.push(cursor_for(EditField::Description));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));

    // Submit is disabled while saving or with a blank title
    let can_submit = !app.store.loading() && draft.is_submittable();
    let submit_style = if can_submit {
        Style::default()
            .fg(highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        dim_style
    };
    lines.push(Line::from(vec![
        Span::styled("  Esc", dim_style),
        Span::styled(" cancel  ", label_style),
        Span::styled("Tab", dim_style),
        Span::styled(" switch  ", label_style),
        Span::styled("Enter", dim_style),
        Span::styled(" ", label_style),
        Span::styled(submit_label(app), submit_style),
    ]));

    let popup_w: u16 = 60.min(area.width.saturating_sub(2));
    let popup_h = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(highlight).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));

    frame.render_widget(paragraph, overlay_area);
}
