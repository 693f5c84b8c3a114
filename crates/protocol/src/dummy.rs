//! Sample data for demonstration and tests.
//!
//! # Examples
//!
//! ```
//! use snapboard_protocol::dummy::dummy_board;
//!
//! let board = dummy_board();
//! assert_eq!(board.total_tasks(), 8);
//! assert!(board.positions_are_contiguous());
//! ```

use crate::board::Board;
use crate::task::{Priority, Task, TaskStatus};

/// Generates a sample board with tasks spread over all four columns.
///
/// - **To Do**: 3 tasks
/// - **In Progress**: 2 tasks
/// - **In Review**: 1 task
/// - **Done**: 2 tasks
#[must_use]
pub fn dummy_board() -> Board {
    let tasks = [
        (
            "Set up dev environment",
            "Install toolchain and editor plugins",
            TaskStatus::Todo,
            Priority::Medium,
        ),
        (
            "Design database schema",
            "Users, projects and memberships",
            TaskStatus::Todo,
            Priority::High,
        ),
        ("Read API docs", "Go through the REST endpoints", TaskStatus::Todo, Priority::Low),
        (
            "Authentication",
            "Session tokens and refresh flow",
            TaskStatus::InProgress,
            Priority::Urgent,
        ),
        ("Card components", "Cards, badges and modals", TaskStatus::InProgress, Priority::Medium),
        (
            "Keyboard shortcuts",
            "Review the accessibility pass",
            TaskStatus::InReview,
            Priority::High,
        ),
        ("Project scaffolding", "Workspace and CI", TaskStatus::Done, Priority::Medium),
        ("Drag and drop", "Snap cards between columns", TaskStatus::Done, Priority::High),
    ];

    let mut board = Board::new();
    for (title, description, status, priority) in tasks {
        board.add_task(
            Task::new(title)
                .with_description(description)
                .with_status(status)
                .with_priority(priority),
        );
    }
    board
}
