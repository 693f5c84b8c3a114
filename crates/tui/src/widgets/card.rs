//! Task card rendering.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};
use snapboard_protocol::{Priority, Task};

/// How a card is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardStyle {
    #[default]
    Normal,
    /// Has keyboard focus.
    Selected,
    /// Being dragged while still in the flow.
    Lifted,
    /// The floating clone following the pointer.
    Ghost,
}

/// Returns the color used for a priority label.
#[must_use]
pub const fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::DarkGray,
        Priority::Medium => Color::Blue,
        Priority::High => Color::Yellow,
        Priority::Urgent => Color::Red,
    }
}

/// Renders a task card: title on the first line, priority on the second.
pub fn render_card(task: &Task, style: CardStyle, area: Rect, buf: &mut Buffer) {
    let (border_type, border_style) = match style {
        CardStyle::Normal => (BorderType::Rounded, Style::default()),
        CardStyle::Selected => (BorderType::Thick, Style::default().fg(Color::Cyan)),
        CardStyle::Lifted => (
            BorderType::Rounded,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
        ),
        CardStyle::Ghost => (BorderType::Double, Style::default().fg(Color::Yellow)),
    };

    if style == CardStyle::Ghost {
        Clear.render(area, buf);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);
    let inner = block.inner(area);
    block.render(area, buf);

    let mut title_style = Style::default().add_modifier(Modifier::BOLD);
    if style == CardStyle::Lifted {
        title_style = title_style.fg(Color::DarkGray).add_modifier(Modifier::DIM);
    }
    let lines = vec![
        Line::from(Span::styled(task.title.as_str(), title_style)),
        Line::from(Span::styled(
            task.priority.label(),
            Style::default().fg(priority_color(task.priority)),
        )),
    ];
    Paragraph::new(lines).render(inner, buf);
}

/// Renders the placeholder marking where the dragged card will land.
pub fn render_placeholder(area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    block.render(area, buf);
    Paragraph::new("drop here")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .render(inner, buf);
}
