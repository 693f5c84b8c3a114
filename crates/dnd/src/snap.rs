//! Resolving a pointer position to a (column, slot) pair.
//!
//! Resolution is two-stage: the column whose horizontal centre is nearest to
//! the pointer qualifies only if it lies strictly within the configured
//! tolerance; inside that column the slot with the nearest vertical centre
//! wins, with no vertical ceiling. Ties keep the first candidate in visual
//! order.

use snapboard_config::TargetsConfig;
use snapboard_protocol::TaskStatus;

use crate::geometry::{ColumnSnapInfo, Rect};

/// Outcome of a snap resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionInfo {
    /// Column within tolerance, if any.
    pub column: Option<TaskStatus>,
    /// Slot index inside `column`, if any.
    pub index: Option<usize>,
    /// Bounds of the chosen slot; zero when invalid.
    pub slot: Rect,
}

impl PositionInfo {
    /// A resolution that found no column.
    #[must_use]
    pub const fn invalid() -> Self {
        Self {
            column: None,
            index: None,
            slot: Rect::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    /// Returns `true` when both a column and a slot were found.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.column.is_some() && self.index.is_some()
    }

    /// The (column, index) pair of a valid resolution.
    #[must_use]
    pub fn target(&self) -> Option<(TaskStatus, usize)> {
        self.column.zip(self.index)
    }
}

/// Resolves `(x, y)` against a geometry snapshot.
///
/// # Examples
///
/// ```
/// use snapboard_config::TargetsConfig;
/// use snapboard_dnd::snap::resolve;
///
/// let result = resolve(100.0, 100.0, &[], &TargetsConfig::default());
/// assert!(!result.is_valid());
/// ```
#[must_use]
pub fn resolve(
    x: f64,
    y: f64,
    columns: &[ColumnSnapInfo],
    targets: &TargetsConfig,
) -> PositionInfo {
    let mut closest: Option<&ColumnSnapInfo> = None;
    let mut min_distance = f64::INFINITY;
    for column in columns {
        let distance = (x - column.center_x).abs();
        let within = !targets.enabled || distance < targets.tolerance;
        if distance < min_distance && within {
            min_distance = distance;
            closest = Some(column);
        }
    }

    let Some(column) = closest else {
        return PositionInfo::invalid();
    };

    let mut best = None;
    let mut min_slot_distance = f64::INFINITY;
    for slot in &column.slots {
        let distance = (y - slot.center_y).abs();
        if distance < min_slot_distance {
            min_slot_distance = distance;
            best = Some(slot);
        }
    }

    match best {
        Some(slot) => PositionInfo {
            column: Some(column.id),
            index: Some(slot.index),
            slot: slot.bounds,
        },
        None => PositionInfo {
            column: Some(column.id),
            ..PositionInfo::invalid()
        },
    }
}
