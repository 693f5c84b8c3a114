//! Rendering helpers shared by the widget and app tests.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// Text of `buf`, one line per row, with trailing blanks dropped so
/// snapshots stay stable.
#[must_use]
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        let start = out.len();
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell((x, y)) {
                out.push_str(cell.symbol());
            }
        }
        let kept = out[start..].trim_end_matches(' ').len();
        out.truncate(start + kept);
        out.push('\n');
    }
    out
}

/// Renders into a blank `width` x `height` buffer and returns its text.
#[must_use]
pub(crate) fn render_to_string(
    width: u16,
    height: u16,
    render: impl FnOnce(Rect, &mut Buffer),
) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    render(area, &mut buf);
    buffer_to_string(&buf)
}

#[cfg(test)]
mod tests {
    use ratatui::style::Style;

    use super::*;

    #[test]
    fn rows_lose_trailing_blanks() {
        let output = render_to_string(6, 2, |area, buf| {
            buf.set_string(area.x, area.y, "ab", Style::default());
            buf.set_string(area.x + 4, area.y + 1, "c", Style::default());
        });
        assert_eq!(output, "ab\n    c\n");
    }

    #[test]
    fn offset_buffers_read_their_own_area() {
        let mut buf = Buffer::empty(Rect::new(3, 2, 4, 1));
        buf.set_string(3, 2, "card", Style::default());
        assert_eq!(buffer_to_string(&buf), "card\n");
    }
}
