use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::task_ops::{self, ValidationError};
use crate::tui::app::{AddField, App, Mode};
use crate::util::unicode::pop_grapheme;

use super::is_ctrl;

pub(super) fn handle_add(app: &mut App, key: KeyEvent) {
    if is_ctrl(&key, 'c') {
        cancel(app);
        return;
    }
    if is_ctrl(&key, 'u') {
        app.form.active_mut().clear();
        return;
    }

    match key.code {
        KeyCode::Esc => cancel(app),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => app.form.switch_field(),
        KeyCode::Enter => submit(app),
        KeyCode::Backspace => pop_grapheme(app.form.active_mut()),
        KeyCode::Char(c) => app.form.active_mut().push(c),
        _ => {}
    }
}

fn cancel(app: &mut App) {
    app.form.clear();
    app.mode = Mode::Navigate;
}

/// Create a task from the form. The form stays open and is emptied on
/// success; on rejection the input stays and focus moves to the bad field.
fn submit(app: &mut App) {
    // text is checked before the date, as the controller does
    if app.form.text.trim().is_empty() {
        app.controller.show_notice(ValidationError::EmptyText.to_string());
        app.form.field = AddField::Text;
        return;
    }

    let date = match task_ops::parse_due_date(&app.form.date, app.controller.today()) {
        Ok(date) => date,
        Err(e) => {
            app.controller.show_notice(e.to_string());
            app.form.field = AddField::Date;
            return;
        }
    };

    match app.controller.add(&app.form.text, date) {
        Ok(task) => {
            app.form.clear();
            app.select_task(task.id);
        }
        Err(ValidationError::EmptyText) => app.form.field = AddField::Text,
        Err(_) => app.form.field = AddField::Date,
    }
}
