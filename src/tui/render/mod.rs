pub mod add_form;
pub mod header;
pub mod helpers;
pub mod list_view;
pub mod prompt_popup;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::ops::view::TaskListView;

use super::app::{App, Mode};
use super::theme::Theme;

/// Header, list, optional add form, status row
fn split(area: Rect, form_height: u16) -> [Rect; 4] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + filter tabs, separator
            Constraint::Min(1),    // task list
            Constraint::Length(form_height),
            Constraint::Length(1), // status row
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2], chunks[3]]
}

fn fill_background(frame: &mut Frame, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme.background)), area);
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    fill_background(frame, &app.theme);

    let form_height = if app.mode == Mode::Add {
        add_form::FORM_HEIGHT
    } else {
        0
    };
    let [header_area, list_area, form_area, status_area] = split(frame.area(), form_height);

    let view = app.controller.view();
    let tasks = app.controller.tasks();
    let done = tasks.iter().filter(|t| t.completed).count();
    header::render_header(
        frame,
        header_area,
        view.filter,
        Some((tasks.len(), done)),
        &app.theme,
    );

    let selected = match app.mode {
        Mode::Navigate => Some(app.cursor),
        Mode::Add => None,
    };
    list_view::render_list(frame, list_area, &view, selected, &app.theme);

    if app.mode == Mode::Add {
        add_form::render_add_form(frame, form_area, &app.form, &app.theme);
    }

    status_row::render_status_row(frame, app, &view, status_area);
}

/// The list without selection or status, drawn behind modal prompts
pub fn render_backdrop(frame: &mut Frame, view: &TaskListView, theme: &Theme) {
    fill_background(frame, theme);
    let [header_area, list_area, _, _] = split(frame.area(), 0);
    header::render_header(frame, header_area, view.filter, None, theme);
    list_view::render_list(frame, list_area, view, None, theme);
}
