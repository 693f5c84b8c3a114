//! Shared protocol types for the snapboard application.
//!
//! This crate defines the data the drag-and-drop engine and the terminal host
//! agree on: tasks, the fixed set of statuses that identify columns, the
//! board that keeps task positions contiguous, and input messages.
//!
//! # Overview
//!
//! - [`task`]: Task identifiers, statuses, priorities and the `Task` struct
//! - [`board`]: Columns and the `Board` with move/renumber operations
//! - [`message`]: TUI event messages
//! - [`dummy`]: Sample board for demos and tests
//! - [`error`]: Error types for board operations
//!
//! # Examples
//!
//! Applying the result of a drop:
//!
//! ```
//! use snapboard_protocol::{Board, Task, TaskStatus};
//!
//! let mut board = Board::new();
//! let a = board.add_task(Task::new("A"));
//! let _b = board.add_task(Task::new("B"));
//! let _c = board.add_task(Task::new("C").with_status(TaskStatus::InProgress));
//!
//! board.move_task(a, TaskStatus::InProgress, 1).unwrap();
//! assert_eq!(board.locate(a), Some((TaskStatus::InProgress, 1)));
//! assert!(board.positions_are_contiguous());
//! ```

pub mod board;
pub mod dummy;
pub mod error;
pub mod message;
pub mod task;

// Re-export primary types at crate root for convenience
pub use board::{Board, Column};
pub use error::{ProtocolError, Result};
pub use message::{Message, PointerAction};
pub use task::{Priority, Task, TaskId, TaskStatus};
