use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::Filter;
use crate::tui::theme::Theme;

use super::helpers::push_right_aligned;

/// Title and filter tabs, with a separator line below.
/// `counts` is (total, completed) and is omitted behind modal prompts.
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    active: Filter,
    counts: Option<(usize, usize)>,
    theme: &Theme,
) {
    let bg = theme.background;
    let width = area.width as usize;

    let mut spans = vec![
        Span::styled(
            " tickoff",
            Style::default()
                .fg(theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", Style::default().bg(bg)),
    ];

    for (i, filter) in Filter::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" ", Style::default().bg(bg)));
        }
        let style = if filter == active {
            Style::default()
                .fg(theme.text_bright)
                .bg(theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text).bg(bg)
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, filter.label()), style));
    }

    if let Some((total, done)) = counts {
        let noun = if total == 1 { "task" } else { "tasks" };
        let summary = Span::styled(
            format!("{} {}, {} done ", total, noun, done),
            Style::default().fg(theme.dim).bg(bg),
        );
        push_right_aligned(&mut spans, vec![summary], width);
    }

    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(theme.dim).bg(bg),
    ));

    let paragraph = Paragraph::new(vec![Line::from(spans), separator]).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
