//! Board rendering: the four columns, their cards, and the drag overlays.

use ratatui::{
    buffer::Buffer,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Widget},
};
use snapboard_protocol::TaskStatus;

use crate::layout::units_to_cells;
use crate::state::AppState;
use crate::surface::{BoardSurface, FlowEntry, Overlay};
use crate::widgets::card::{CardStyle, render_card, render_placeholder};

/// Renders the board into the surface's area.
///
/// `drag_target` is the column the dragged card would land in; it is
/// highlighted over the keyboard selection.
pub fn render_board(
    surface: &BoardSurface,
    selection: &AppState,
    drag_target: Option<TaskStatus>,
    buf: &mut Buffer,
) {
    for column in TaskStatus::all() {
        render_column(surface, column, selection, drag_target, buf);
    }
    render_ghosts(surface, buf);
}

fn render_column(
    surface: &BoardSurface,
    column: TaskStatus,
    selection: &AppState,
    drag_target: Option<TaskStatus>,
    buf: &mut Buffer,
) {
    let area = surface.column_cells(column);
    let focused = selection.selected_column == column;
    let border_style = if drag_target == Some(column) {
        Style::default().fg(Color::Yellow)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let count = surface.board().tasks(column).len();
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", column.display_name()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("({count}) "), Style::default().fg(Color::DarkGray)),
    ]);
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style)
        .title(title)
        .render(area, buf);

    let list = surface.list_cells(column);
    let selected = selection
        .selected_task(surface.board())
        .filter(|_| focused)
        .map(|task| task.id);
    for entry in surface.flow(column) {
        let Some(cells) = units_to_cells(entry.rect(), list) else {
            continue;
        };
        match entry {
            FlowEntry::Card {
                task_id, lifted, ..
            } => {
                let Some(task) = surface.board().get_task(task_id) else {
                    continue;
                };
                let style = if lifted {
                    CardStyle::Lifted
                } else if selected == Some(task_id) {
                    CardStyle::Selected
                } else {
                    CardStyle::Normal
                };
                render_card(task, style, cells, buf);
            }
            FlowEntry::Placeholder { node, .. } => {
                let visible = surface.overlays().any(|(n, overlay)| {
                    n == node
                        && matches!(overlay, Overlay::Placeholder { visual, .. }
                            if visual.is_none_or(|v| v.opacity > 0.0))
                });
                if visible {
                    render_placeholder(cells, buf);
                }
            }
        }
    }
}

fn render_ghosts(surface: &BoardSurface, buf: &mut Buffer) {
    for (_, overlay) in surface.overlays() {
        let Overlay::Ghost {
            task_id,
            rect,
            visual,
            ..
        } = overlay
        else {
            continue;
        };
        let rect = visual.and_then(|v| v.rect).unwrap_or(*rect);
        if let Some(task) = surface.board().get_task(*task_id)
            && let Some(cells) = units_to_cells(rect, surface.area())
        {
            render_card(task, CardStyle::Ghost, cells, buf);
        }
    }
}
