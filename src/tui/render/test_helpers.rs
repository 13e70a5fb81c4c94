use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{Config, Task, TaskId};
use crate::store::Outcome;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole screen
pub fn render_app(app: &mut App) -> String {
    render_to_string(TERM_W, TERM_H, |frame, _area| {
        super::render(frame, app);
    })
}

/// Three tasks, the last one completed. Timestamps carry no offset so they
/// display the same in every timezone.
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task {
            id: TaskId::Number(1),
            title: "Buy milk".into(),
            description: String::new(),
            completed: false,
            created_at: "2024-01-01T09:30:00".into(),
            updated_at: None,
        },
        Task {
            id: TaskId::Number(2),
            title: "Walk the dog".into(),
            description: "Around the block".into(),
            completed: false,
            created_at: "2024-01-02T08:00:00.000001".into(),
            updated_at: None,
        },
        Task {
            id: TaskId::Number(3),
            title: "File taxes".into(),
            description: String::new(),
            completed: true,
            created_at: "2024-01-03T12:00:00".into(),
            updated_at: Some("2024-01-04T12:00:00".into()),
        },
    ]
}

/// An App whose store has already loaded `tasks`
pub fn app_with_tasks(tasks: Vec<Task>) -> App {
    let mut app = App::new(&Config::default());
    app.store
        .apply(Outcome::Loaded(Ok(tasks)))
        .expect("loaded outcome applies");
    app
}
