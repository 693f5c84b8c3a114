//! Error types for the drag-and-drop engine.

use thiserror::Error;

use crate::geometry::NodeId;
use crate::state::DragPhase;

/// Misuse the engine can report when asked.
///
/// Regular drag failures never surface as errors; they end the session with
/// a cancel event instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DndError {
    /// A session is already running.
    #[error("cannot start a drag while the engine is {0}")]
    AlreadyDragging(DragPhase),

    /// The element to drag is not attached to the surface.
    #[error("element {0} is not attached to the surface")]
    ElementDetached(NodeId),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, DndError>;
