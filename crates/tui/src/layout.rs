//! Centralized layout measurements for the TUI.
//!
//! This module defines shared constants for layout dimensions used across
//! multiple rendering components, and the scale between terminal cells and
//! the geometry units the drag engine works in.

use snapboard_dnd::Rect as UnitRect;

/// Height of the header bar in rows.
///
/// The header displays the application title and the drag phase.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the status bar in rows.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of each task card in rows.
///
/// This includes the border (2 rows) and content (2 rows for title and priority).
pub const TASK_CARD_HEIGHT: u16 = 4;

/// Minimum terminal height for useful rendering.
///
/// Below this height, we display a "terminal too small" message.
/// A column needs its border (2 rows), one card (4 rows) and the status bar.
pub const MIN_HEIGHT: u16 = 8;

/// Minimum terminal height for rendering with header.
///
/// When terminal height is between `MIN_HEIGHT` and `MIN_HEIGHT_WITH_HEADER`,
/// we hide the header to reclaim 3 rows of content space.
pub const MIN_HEIGHT_WITH_HEADER: u16 = MIN_HEIGHT + HEADER_HEIGHT;

/// Minimum terminal width for useful rendering.
///
/// The board has 4 columns; each column needs at least 10 characters
/// for borders and truncated titles to be readable.
pub const MIN_WIDTH: u16 = 40;

/// Geometry units per terminal column.
pub const CELL_WIDTH: f64 = 8.0;

/// Geometry units per terminal row.
pub const CELL_HEIGHT: f64 = 16.0;

/// Converts a cell rectangle into geometry units.
#[must_use]
pub fn cells_to_units(area: ratatui::layout::Rect) -> UnitRect {
    UnitRect::new(
        f64::from(area.x) * CELL_WIDTH,
        f64::from(area.y) * CELL_HEIGHT,
        f64::from(area.width) * CELL_WIDTH,
        f64::from(area.height) * CELL_HEIGHT,
    )
}

/// Converts a rectangle in geometry units to cells, clipped to `clip`.
///
/// Returns `None` when nothing of the rectangle is visible.
#[must_use]
pub fn units_to_cells(
    rect: UnitRect,
    clip: ratatui::layout::Rect,
) -> Option<ratatui::layout::Rect> {
    let left = (rect.left() / CELL_WIDTH).round() as i64;
    let top = (rect.top() / CELL_HEIGHT).round() as i64;
    let right = (rect.right() / CELL_WIDTH).round() as i64;
    let bottom = (rect.bottom() / CELL_HEIGHT).round() as i64;

    let left = left.max(i64::from(clip.left()));
    let top = top.max(i64::from(clip.top()));
    let right = right.min(i64::from(clip.right()));
    let bottom = bottom.min(i64::from(clip.bottom()));
    if right <= left || bottom <= top {
        return None;
    }

    Some(ratatui::layout::Rect::new(
        u16::try_from(left).ok()?,
        u16::try_from(top).ok()?,
        u16::try_from(right - left).ok()?,
        u16::try_from(bottom - top).ok()?,
    ))
}

/// Geometry-unit position of the centre of a terminal cell.
#[must_use]
pub fn cell_center(column: u16, row: u16) -> snapboard_dnd::Point {
    snapboard_dnd::Point::new(
        (f64::from(column) + 0.5) * CELL_WIDTH,
        (f64::from(row) + 0.5) * CELL_HEIGHT,
    )
}
