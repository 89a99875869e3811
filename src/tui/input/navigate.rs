use crossterm::event::{KeyCode, KeyEvent};

use crate::model::task::Filter;
use crate::tui::app::{App, Mode};

use super::is_ctrl;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    if is_ctrl(&key, 'c') {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.cursor = app.visible_count().saturating_sub(1);
        }

        KeyCode::Char(' ') | KeyCode::Char('x') => {
            if let Some(id) = app.selected_id() {
                app.controller.toggle_complete(id);
                app.clamp_cursor();
            }
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = app.selected_id() {
                app.controller.edit(id);
            }
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.selected_id() {
                app.controller.delete(id);
                app.clamp_cursor();
            }
        }
        KeyCode::Char('D') => {
            if app.controller.delete_all() {
                app.cursor = 0;
            }
        }

        KeyCode::Char('a') | KeyCode::Char('n') => {
            app.form.clear();
            app.mode = Mode::Add;
        }

        KeyCode::Char(c @ '1'..='3') => {
            let index = (c as usize) - ('1' as usize);
            set_filter(app, Filter::ALL[index]);
        }
        KeyCode::Tab => {
            let next = app.controller.filter().next();
            set_filter(app, next);
        }
        _ => {}
    }
}

fn move_cursor(app: &mut App, delta: isize) {
    let count = app.visible_count();
    if count == 0 {
        app.cursor = 0;
        return;
    }
    app.cursor = app.cursor.saturating_add_signed(delta).min(count - 1);
}

fn set_filter(app: &mut App, filter: Filter) {
    if app.controller.filter() != filter {
        app.controller.set_filter(filter);
        app.cursor = 0;
    }
}
