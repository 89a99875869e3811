use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::view::{TaskAction, TaskListView};
use crate::tui::app::{App, Mode};
use crate::util::unicode::truncate_to_width;

use super::helpers::{push_right_aligned, spans_width};

/// Render the status row (bottom of screen): the live notice if there is
/// one, otherwise key hints for the current mode.
pub fn render_status_row(frame: &mut Frame, app: &App, view: &TaskListView, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = if let Some(notice) = app.controller.notice() {
        Line::from(Span::styled(
            truncate_to_width(&format!(" {}", notice), width),
            Style::default().fg(app.theme.red).bg(bg),
        ))
    } else if !app.show_key_hints {
        Line::default()
    } else {
        let (left, right) = match app.mode {
            Mode::Add => (
                vec![("tab", "switch field"), ("enter", "add"), ("esc", "done")],
                vec![],
            ),
            Mode::Navigate => match view.rows().get(app.cursor) {
                Some(row) => (
                    row.actions
                        .iter()
                        .map(|a| (action_key(*a), a.hint(row.status)))
                        .collect(),
                    vec![("a", "add"), ("tab", "filter"), ("q", "quit")],
                ),
                None => (vec![("a", "add"), ("tab", "filter"), ("q", "quit")], vec![]),
            },
        };
        let mut spans = hint_spans(app, &left);
        if spans_width(&spans) > width {
            spans = vec![Span::styled(
                truncate_to_width(&spans.iter().map(|s| &*s.content).collect::<String>(), width),
                Style::default().fg(app.theme.dim).bg(bg),
            )];
        } else if !right.is_empty() {
            let mut right = hint_spans(app, &right);
            right.push(Span::styled(" ", Style::default().bg(bg)));
            push_right_aligned(&mut spans, right, width);
        }
        Line::from(spans)
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn action_key(action: TaskAction) -> &'static str {
    match action {
        TaskAction::Toggle(_) => "space",
        TaskAction::Edit(_) => "e",
        TaskAction::Delete(_) => "d",
    }
}

fn hint_spans(app: &App, hints: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    let bg = app.theme.background;
    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(" ", Style::default().bg(bg)));
        spans.push(Span::styled(*key, Style::default().fg(app.theme.highlight).bg(bg)));
        spans.push(Span::styled(
            format!(" {} ", label),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }
    spans
}
