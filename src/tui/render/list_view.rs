use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::view::{StatusBadge, TaskListView, TaskRow, ViewBody};
use crate::tui::theme::Theme;
use crate::util::unicode::fit_to_width;

const MARKER_W: usize = 2;
const CHECKBOX_W: usize = 4;
const DUE_W: usize = 12;
const BADGE_W: usize = 10;

/// Render the task rows, or the placeholder when there are none.
/// `selected` is a row index; `None` draws no cursor.
pub fn render_list(
    frame: &mut Frame,
    area: Rect,
    view: &TaskListView,
    selected: Option<usize>,
    theme: &Theme,
) {
    let bg = theme.background;
    let rows = match &view.body {
        ViewBody::Placeholder(text) => {
            let lines = vec![
                Line::default(),
                Line::from(Span::styled(
                    format!("  {}", text),
                    Style::default()
                        .fg(theme.dim)
                        .bg(bg)
                        .add_modifier(Modifier::ITALIC),
                )),
            ];
            frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
            return;
        }
        ViewBody::Rows(rows) => rows,
    };

    // Keep the selected row on screen
    let height = area.height as usize;
    let offset = match selected {
        Some(sel) if height > 0 && sel >= height => sel + 1 - height,
        _ => 0,
    };

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(i, row)| row_line(row, selected == Some(i), area.width as usize, theme))
        .collect();

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}

fn row_line(row: &TaskRow, is_selected: bool, width: usize, theme: &Theme) -> Line<'static> {
    let bg = if is_selected {
        theme.selection_bg
    } else {
        theme.background
    };
    let base = Style::default().bg(bg);
    let completed = row.status == StatusBadge::Completed;

    let marker = if is_selected { "\u{25B8} " } else { "  " };
    let (checkbox, check_color) = if completed {
        ("[x] ", theme.green)
    } else {
        ("[ ] ", theme.text)
    };
    let due_color = if completed { theme.dim } else { theme.yellow };
    let text_style = if completed {
        base.fg(theme.dim).add_modifier(Modifier::CROSSED_OUT)
    } else {
        base.fg(theme.text_bright)
    };
    let badge_color = if completed { theme.green } else { theme.yellow };

    let actions: String = row
        .actions
        .iter()
        .map(|a| format!(" {}", a.glyph(row.status)))
        .collect();
    let fixed = MARKER_W + CHECKBOX_W + DUE_W + 2 + BADGE_W + actions.chars().count();
    let text_w = width.saturating_sub(fixed);

    Line::from(vec![
        Span::styled(marker, base.fg(theme.highlight)),
        Span::styled(checkbox, base.fg(check_color)),
        Span::styled(
            format!("{}  ", fit_to_width(&row.due_label, DUE_W)),
            base.fg(due_color),
        ),
        Span::styled(fit_to_width(&row.text, text_w), text_style),
        Span::styled(
            format!(" {:>width$}", row.status.label(), width = BADGE_W - 1),
            base.fg(badge_color),
        ),
        Span::styled(actions, base.fg(theme.dim)),
    ])
    .style(base)
}
