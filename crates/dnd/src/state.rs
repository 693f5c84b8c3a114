//! Drag session state.

use std::time::Instant;

use snapboard_protocol::{Task, TaskStatus};

use crate::geometry::Point;

/// Where a drag session is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// No session.
    #[default]
    Idle,
    /// The pointer or keyboard is moving a card.
    Dragging,
    /// The drop settle is playing.
    Dropping,
    /// The cancel settle is playing.
    Cancelling,
}

impl DragPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Dropping => "dropping",
            Self::Cancelling => "cancelling",
        }
    }
}

impl std::fmt::Display for DragPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the current drag session.
///
/// Published through [`DragEngine::subscribe`](crate::DragEngine::subscribe)
/// on every change. When `phase` is [`DragPhase::Idle`] every other field is
/// cleared.
///
/// # Examples
///
/// ```
/// use snapboard_dnd::{DragPhase, DragState};
///
/// let state = DragState::idle();
/// assert_eq!(state.phase, DragPhase::Idle);
/// assert!(!state.is_dragging());
/// assert!(state.dragged_task.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragState {
    pub phase: DragPhase,
    pub dragged_task: Option<Task>,
    pub source_column: Option<TaskStatus>,
    pub source_index: Option<usize>,
    /// Column under the pointer, if within tolerance.
    pub target_column: Option<TaskStatus>,
    /// Slot index inside `target_column`, counted without the dragged card.
    pub target_index: Option<usize>,
    pub current_position: Point,
    /// Pointer position relative to the dragged card's top-left corner.
    pub pointer_offset: Point,
    pub start_time: Option<Instant>,
}

impl DragState {
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Returns `true` only during [`DragPhase::Dragging`].
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == DragPhase::Dragging
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == DragPhase::Idle
    }

    /// The (column, index) pair a drop would land on.
    #[must_use]
    pub fn target(&self) -> Option<(TaskStatus, usize)> {
        self.target_column.zip(self.target_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_clears_everything() {
        let state = DragState::idle();
        assert!(state.is_idle());
        assert_eq!(state.source_column, None);
        assert_eq!(state.target(), None);
        assert_eq!(state.start_time, None);
    }

    #[test]
    fn target_needs_both_parts() {
        let mut state = DragState {
            phase: DragPhase::Dragging,
            target_column: Some(TaskStatus::Done),
            ..DragState::idle()
        };
        assert!(state.is_dragging());
        assert_eq!(state.target(), None);
        state.target_index = Some(2);
        assert_eq!(state.target(), Some((TaskStatus::Done, 2)));
    }

    #[test]
    fn phase_display() {
        assert_eq!(DragPhase::Cancelling.to_string(), "cancelling");
    }
}
