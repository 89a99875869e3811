use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{AddField, AddForm};
use crate::tui::theme::Theme;
use crate::util::unicode;

use super::helpers::push_right_aligned;

/// Separator plus one line per field
pub const FORM_HEIGHT: u16 = 3;

const DATE_HINT: &str = "YYYY-MM-DD, today or tomorrow ";

pub fn render_add_form(frame: &mut Frame, area: Rect, form: &AddForm, theme: &Theme) {
    let bg = theme.background;
    let width = area.width as usize;

    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(theme.dim).bg(bg),
    ));
    let text_line = field_line(" Task  ", &form.text, form.field == AddField::Text, width, theme);

    let mut date_spans = field_spans(" Due   ", &form.date, form.field == AddField::Date, width, theme);
    push_right_aligned(
        &mut date_spans,
        vec![Span::styled(DATE_HINT, Style::default().fg(theme.dim).bg(bg))],
        width,
    );

    let paragraph = Paragraph::new(vec![separator, text_line, Line::from(date_spans)])
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn field_line(label: &'static str, value: &str, active: bool, width: usize, theme: &Theme) -> Line<'static> {
    Line::from(field_spans(label, value, active, width, theme))
}

fn field_spans(
    label: &'static str,
    value: &str,
    active: bool,
    width: usize,
    theme: &Theme,
) -> Vec<Span<'static>> {
    let bg = theme.background;
    let label_style = if active {
        Style::default()
            .fg(theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.dim).bg(bg)
    };

    // Show the end of long input, where typing happens
    let room = width.saturating_sub(label.len() + 1);
    let mut spans = vec![
        Span::styled(label, label_style),
        Span::styled(
            unicode::tail_to_width(value, room).to_string(),
            Style::default().fg(theme.text_bright).bg(bg),
        ),
    ];
    if active {
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(theme.highlight).bg(bg),
        ));
    }
    spans
}
