use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_segmentation::UnicodeSegmentation;

use crate::tui::app::{App, EditField};

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => {
            app.store.close_editor();
            app.field = EditField::Title;
        }
        (_, KeyCode::Tab) | (_, KeyCode::BackTab) => {
            app.field = app.field.toggle();
        }
        // Submit: Enter in the title field, Ctrl+S anywhere
        (KeyModifiers::CONTROL, KeyCode::Char('s')) => submit(app),
        (_, KeyCode::Enter) if app.field == EditField::Title => submit(app),
        (_, KeyCode::Enter) => field_mut(app).push('\n'),
        (_, KeyCode::Backspace) => {
            let text = field_mut(app);
            if let Some((idx, _)) = text.grapheme_indices(true).next_back() {
                text.truncate(idx);
            }
        }
        (m, KeyCode::Char(c)) if !m.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            field_mut(app).push(c);
        }
        _ => {}
    }
}

fn field_mut(app: &mut App) -> &mut String {
    let draft = app.store.draft_mut();
    match app.field {
        EditField::Title => &mut draft.title,
        EditField::Description => &mut draft.description,
    }
}

/// Disabled while a submit is in flight or the title is blank
fn submit(app: &mut App) {
    if app.store.loading() {
        return;
    }
    if let Some(request) = app.store.begin_submit() {
        app.queue(request);
    }
}
