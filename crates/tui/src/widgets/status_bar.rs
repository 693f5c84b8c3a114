//! Footer line: the live announcement or key hints, and the drag phase.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use snapboard_dnd::DragPhase;

const HINTS: &str = "←→↑↓ move  Enter pick up/drop  Esc cancel  r reset  Ctrl+C quit";

/// Renders the status bar.
///
/// An announcement replaces the key hints while it is live.
pub fn render_status_bar(
    announcement: Option<&str>,
    phase: DragPhase,
    area: Rect,
    buf: &mut Buffer,
) {
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(12)]).areas(area);

    let message = match announcement {
        Some(text) => Line::from(Span::styled(text, Style::default().fg(Color::Yellow))),
        None => Line::from(Span::styled(HINTS, Style::default().fg(Color::DarkGray))),
    };
    Paragraph::new(message).render(left, buf);

    let phase_style = match phase {
        DragPhase::Idle => Style::default().fg(Color::DarkGray),
        DragPhase::Dragging => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        DragPhase::Dropping => Style::default().fg(Color::Green),
        DragPhase::Cancelling => Style::default().fg(Color::Red),
    };
    Paragraph::new(Span::styled(phase.as_str(), phase_style))
        .alignment(Alignment::Right)
        .render(right, buf);
}
