use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::util::unicode;

/// Total display width of a run of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Right-align `right` after `left` within `width`, dropping it if it does not fit
pub(super) fn push_right_aligned<'a>(spans: &mut Vec<Span<'a>>, right: Vec<Span<'a>>, width: usize) {
    let used = spans_width(spans);
    let right_width = spans_width(&right);
    if used + right_width + 1 > width {
        return;
    }
    spans.push(Span::raw(" ".repeat(width - used - right_width)));
    spans.extend(right);
}
