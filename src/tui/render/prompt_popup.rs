use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::prompt::{PromptKind, PromptState};
use crate::tui::theme::Theme;
use crate::util::unicode;

use super::helpers::centered_rect_fixed;

/// Render a modal prompt centered over whatever is on screen
pub fn render_prompt(frame: &mut Frame, state: &PromptState, theme: &Theme) {
    let area = frame.area();
    let popup_w: u16 = 56.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let bg = theme.background;
    let text_style = Style::default().fg(theme.text).bg(bg);
    let bright_style = Style::default().fg(theme.text_bright).bg(bg);
    let dim_style = Style::default().fg(theme.dim).bg(bg);

    let mut lines = vec![Line::from(Span::styled(
        unicode::truncate_to_width(&format!(" {}", state.message), inner_w),
        bright_style,
    ))];

    let (title, hint) = match state.kind {
        PromptKind::Confirm => (" Confirm ", " y yes  n no"),
        PromptKind::Text => {
            // Leave room for the leading space and the cursor
            let shown = unicode::tail_to_width(&state.input, inner_w.saturating_sub(2));
            lines.push(Line::from(vec![
                Span::styled(format!(" {}", shown), text_style),
                Span::styled("\u{258C}", Style::default().fg(theme.highlight).bg(bg)),
            ]));
            (" Edit ", " enter save  esc cancel")
        }
    };
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(hint, dim_style)));

    let popup_h = ((lines.len() as u16) + 2).min(area.height);
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(theme.highlight).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}
