use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, EditField};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    let count = app.store.tasks().len();
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        // Cursor movement
        KeyCode::Char('j') | KeyCode::Down => {
            if app.cursor + 1 < count {
                app.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.cursor = count.saturating_sub(1),

        KeyCode::Char('a') => {
            app.store.open_editor(None);
            app.field = EditField::Title;
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(task) = app.selected_task().cloned() {
                app.store.open_editor(Some(&task));
                app.field = EditField::Title;
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('x') => {
            if let Some(task) = app.selected_task() {
                let request = app.store.begin_toggle(task);
                app.queue(request);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.selected_task().map(|t| t.id.clone()) {
                app.store.request_remove(id);
            }
        }
        KeyCode::Char('r') => {
            let request = app.store.begin_load();
            app.queue(request);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    use crate::model::{TaskDraft, TaskId};
    use crate::store::Request;
    use crate::tui::app::Mode;
    use crate::tui::input::handle_key;
    use crate::tui::input::test_keys::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn cursor_stays_in_bounds() {
        let mut app = app_with_tasks(sample_tasks());
        handle_key(&mut app, ch('k'));
        assert_eq!(app.cursor, 0);
        for _ in 0..10 {
            handle_key(&mut app, press(KeyCode::Down));
        }
        assert_eq!(app.cursor, 2);
        handle_key(&mut app, ch('g'));
        assert_eq!(app.cursor, 0);
        handle_key(&mut app, ch('G'));
        assert_eq!(app.cursor, 2);
    }

    #[test]
    fn add_opens_blank_editor() {
        let mut app = app_with_tasks(sample_tasks());
        handle_key(&mut app, ch('a'));
        assert_eq!(app.mode(), Mode::Edit);
        assert!(app.store.editing().is_none());
        assert_eq!(app.store.draft(), &TaskDraft::default());
    }

    #[test]
    fn edit_seeds_editor_from_selection() {
        let mut app = app_with_tasks(sample_tasks());
        handle_key(&mut app, ch('j'));
        handle_key(&mut app, ch('e'));
        assert_eq!(app.store.editing().map(|t| &t.id), Some(&TaskId::Number(2)));
        assert_eq!(app.store.draft().title, "Walk the dog");
    }

    #[test]
    fn edit_on_empty_list_does_nothing() {
        let mut app = app_with_tasks(vec![]);
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.mode(), Mode::Navigate);
    }

    #[test]
    fn space_queues_toggle_without_touching_tasks() {
        let mut app = app_with_tasks(sample_tasks());
        let before = app.store.tasks().to_vec();
        handle_key(&mut app, ch(' '));

        let mut flipped = before[0].clone();
        flipped.completed = true;
        assert_eq!(app.queued(), &[Request::Toggle(flipped)]);
        assert_eq!(app.store.tasks(), before.as_slice());
    }

    #[test]
    fn delete_asks_for_confirmation_first() {
        let mut app = app_with_tasks(sample_tasks());
        handle_key(&mut app, ch('d'));
        assert_eq!(app.mode(), Mode::Confirm);
        assert_eq!(app.store.pending_delete(), Some(&TaskId::Number(1)));
        assert!(app.queued().is_empty());
    }

    #[test]
    fn r_queues_reload() {
        let mut app = app_with_tasks(sample_tasks());
        handle_key(&mut app, ch('r'));
        assert_eq!(app.queued(), &[Request::Load]);
    }

    #[test]
    fn q_quits() {
        let mut app = app_with_tasks(sample_tasks());
        handle_key(&mut app, ch('q'));
        assert!(app.should_quit);
    }
}
