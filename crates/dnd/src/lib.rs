//! Drag-and-drop positioning engine for snapboard.
//!
//! The engine moves cards between the columns of a board. It tracks the
//! pointer (or the keyboard), snaps the dragged card to a discrete
//! (column, slot) target, shows a floating ghost and a placeholder, scrolls
//! the view near its edges, and reports the lifecycle as events. The host
//! applies a drop to its own data.
//!
//! The engine never touches a renderer directly. A host implements three
//! capability traits:
//!
//! - [`MeasurableSurface`]: where columns, lists and cards are
//! - [`Scene`]: creating, moving and styling the ghost, placeholder and
//!   live region
//! - [`Scroller`]: the viewport and scrolling
//!
//! # Overview
//!
//! - [`engine`]: The [`DragEngine`] state machine
//! - [`input`]: Pointer and keyboard gestures
//! - [`geometry`]: Geometry snapshots and slot calculation
//! - [`snap`]: Resolving a pointer position to a target
//! - [`visual`]: Ghost and placeholder management
//! - [`animation`]: Tweens and settle sequences
//! - [`autoscroll`]: Edge auto-scroll
//! - [`announce`]: Screen-reader announcements
//! - [`events`]: Lifecycle events and callbacks
//! - [`state`]: The published drag state
//! - [`clock`]: Time sources
//! - [`error`]: Error types
//!
//! # Examples
//!
//! ```
//! use snapboard_config::DndConfig;
//! use snapboard_dnd::{DragEngine, InputAdapter};
//!
//! let mut engine = DragEngine::new(DndConfig::default());
//! let input = InputAdapter::new();
//! assert!(engine.drain_events().is_empty());
//! assert!(!input.is_pointer_active());
//! ```

pub mod animation;
pub mod announce;
pub mod autoscroll;
pub mod clock;
pub mod engine;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod snap;
pub mod state;
pub mod visual;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use animation::Visual;
pub use autoscroll::Scroller;
pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{DragEngine, DragSurface};
pub use error::{DndError, Result};
pub use events::{
    CancelEvent, CancelReason, DndEvent, DragEnterEvent, DragEvent, DragEvents, DragLeaveEvent,
    DragOverEvent, DragStartEvent, DropEvent,
};
pub use geometry::{CardBox, ColumnSnapInfo, MeasurableSurface, NodeId, Point, Rect, SlotInfo};
pub use input::{DragKey, Grab, InputAdapter, InputOutcome, PointerId, PointerInput};
pub use snap::PositionInfo;
pub use state::{DragPhase, DragState};
pub use visual::{PlaceholderStyle, Scene};
