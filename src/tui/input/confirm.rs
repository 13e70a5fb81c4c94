use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    let confirmed = match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => true,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
        _ => return,
    };
    if let Some(request) = app.store.resolve_remove(confirmed) {
        app.queue(request);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;

    use crate::model::TaskId;
    use crate::store::{Outcome, Request};
    use crate::tui::app::Mode;
    use crate::tui::input::handle_key;
    use crate::tui::input::test_keys::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn declining_sends_nothing() {
        let mut app = app_with_tasks(sample_tasks());
        handle_key(&mut app, ch('d'));
        handle_key(&mut app, ch('n'));
        assert_eq!(app.mode(), Mode::Navigate);
        assert!(app.queued().is_empty());
        assert_eq!(app.store.tasks().len(), 3);
    }

    #[test]
    fn esc_declines() {
        let mut app = app_with_tasks(sample_tasks());
        handle_key(&mut app, ch('d'));
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(app.queued().is_empty());
    }

    #[test]
    fn other_keys_keep_asking() {
        let mut app = app_with_tasks(sample_tasks());
        handle_key(&mut app, ch('d'));
        handle_key(&mut app, ch('j'));
        assert_eq!(app.mode(), Mode::Confirm);
    }

    #[test]
    fn confirming_queues_delete_and_waits_for_api() {
        let mut app = app_with_tasks(sample_tasks());
        handle_key(&mut app, ch('j'));
        handle_key(&mut app, ch('d'));
        handle_key(&mut app, ch('y'));
        assert_eq!(app.queued(), &[Request::Delete(TaskId::Number(2))]);
        assert_eq!(app.store.tasks().len(), 3);

        app.apply(Outcome::Deleted {
            id: TaskId::Number(2),
            result: Ok(()),
        });
        let ids: Vec<_> = app.store.tasks().iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids, vec![TaskId::Number(1), TaskId::Number(3)]);
    }
}
