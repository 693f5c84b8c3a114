//! Task-related types for the board.
//!
//! This module defines the task identifier, the fixed set of statuses that
//! double as column identifiers, task priorities, and the task itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a task.
///
/// Uses UUID v4 for globally unique identification.
pub type TaskId = uuid::Uuid;

/// The workflow status of a task.
///
/// Every status is also the identifier of exactly one board column. The
/// declaration order is the visual order of the columns.
///
/// # Examples
///
/// ```
/// use snapboard_protocol::TaskStatus;
///
/// let status = TaskStatus::InProgress;
/// assert_eq!(status.display_name(), "In Progress");
/// assert_eq!(status.as_str(), "in_progress");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work not started yet.
    #[default]
    Todo,
    /// Work being done.
    InProgress,
    /// Work awaiting review.
    InReview,
    /// Finished work.
    Done,
}

impl TaskStatus {
    /// Returns all statuses in column order.
    ///
    /// # Examples
    ///
    /// ```
    /// use snapboard_protocol::TaskStatus;
    ///
    /// let all = TaskStatus::all();
    /// assert_eq!(all.len(), 4);
    /// assert_eq!(all[0], TaskStatus::Todo);
    /// ```
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Todo, Self::InProgress, Self::InReview, Self::Done]
    }

    /// Returns a human-readable column title.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::InReview => "In Review",
            Self::Done => "Done",
        }
    }

    /// Returns the stable identifier used in serialized data.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::InReview => "in_review",
            Self::Done => "done",
        }
    }

    /// Returns the column index of this status (0-3).
    ///
    /// # Examples
    ///
    /// ```
    /// use snapboard_protocol::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Todo.index(), 0);
    /// assert_eq!(TaskStatus::Done.index(), 3);
    /// ```
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::InProgress => 1,
            Self::InReview => 2,
            Self::Done => 3,
        }
    }

    /// Creates a status from its column index.
    ///
    /// Returns `None` if the index is out of range (>= 4).
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Todo),
            1 => Some(Self::InProgress),
            2 => Some(Self::InReview),
            3 => Some(Self::Done),
            _ => None,
        }
    }

    /// Returns the status of the column to the right, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Returns the status of the column to the left, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self.index().checked_sub(1) {
            Some(idx) => Self::from_index(idx),
            None => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How urgent a task is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal priority.
    #[default]
    Medium,
    /// Should be picked up soon.
    High,
    /// Drop everything.
    Urgent,
}

impl Priority {
    /// Returns a short label for display on cards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

/// A task on the board.
///
/// `status` names the column the task lives in and `position` is its
/// zero-based rank inside that column. The [`Board`](crate::Board) keeps
/// positions contiguous; the drag engine never mutates either field.
///
/// # Examples
///
/// ```
/// use snapboard_protocol::{Priority, Task, TaskStatus};
///
/// let task = Task::new("Write release notes");
/// assert_eq!(task.status, TaskStatus::Todo);
/// assert_eq!(task.priority, Priority::Medium);
/// assert_eq!(task.position, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for this task.
    pub id: TaskId,
    /// Short summary of the task.
    pub title: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The column this task belongs to.
    pub status: TaskStatus,
    /// How urgent the task is.
    #[serde(default)]
    pub priority: Priority,
    /// Zero-based rank within the column.
    pub position: usize,
    /// When this task was created.
    pub created_at: DateTime<Utc>,
    /// When this task was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in the `Todo` column with medium priority.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_id(TaskId::new_v4(), title)
    }

    /// Creates a new task with a specific ID.
    ///
    /// Useful for testing or when recreating tasks from an external service.
    ///
    /// # Examples
    ///
    /// ```
    /// use snapboard_protocol::{Task, TaskId};
    ///
    /// let id = TaskId::new_v4();
    /// let task = Task::with_id(id, "Test task");
    /// assert_eq!(task.id, id);
    /// ```
    #[must_use]
    pub fn with_id(id: TaskId, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            description: None,
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            position: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the position.
    #[must_use]
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    /// Places the task at a new status and position and refreshes `updated_at`.
    pub fn place(&mut self, status: TaskStatus, position: usize) {
        self.status = status;
        self.position = position;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_all_in_column_order() {
        let all = TaskStatus::all();
        for (i, status) in all.iter().enumerate() {
            assert_eq!(status.index(), i);
            assert_eq!(TaskStatus::from_index(i), Some(*status));
        }
        assert_eq!(TaskStatus::from_index(4), None);
    }

    #[test]
    fn status_navigation() {
        assert_eq!(TaskStatus::Todo.next(), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::Done.next(), None);
        assert_eq!(TaskStatus::InReview.previous(), Some(TaskStatus::InProgress));
        assert_eq!(TaskStatus::Todo.previous(), None);
    }

    #[test]
    fn status_json_format() {
        let json = serde_json::to_string(&TaskStatus::InReview).expect("serialize");
        assert_eq!(json, r#""in_review""#);
        assert_eq!(TaskStatus::InReview.to_string(), "in_review");
    }

    #[test]
    fn priority_default_is_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
        let json = serde_json::to_string(&Priority::Urgent).expect("serialize");
        assert_eq!(json, r#""urgent""#);
    }

    #[test]
    fn task_builders() {
        let task = Task::new("Title")
            .with_description("Body")
            .with_status(TaskStatus::Done)
            .with_priority(Priority::High)
            .with_position(3);

        assert_eq!(task.description.as_deref(), Some("Body"));
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.position, 3);
    }

    #[test]
    fn task_place_updates_timestamp() {
        let mut task = Task::new("Test");
        let original_updated = task.updated_at;

        std::thread::sleep(std::time::Duration::from_millis(10));

        task.place(TaskStatus::InProgress, 2);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.position, 2);
        assert!(task.updated_at > original_updated);
    }

    #[test]
    fn task_without_description_omits_field() {
        let task = Task::new("Test");
        let json = serde_json::to_string(&task).expect("serialize");
        assert!(!json.contains("description"));

        let parsed: Task = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, task);
    }
}
