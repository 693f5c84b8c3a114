//! Board and column types.
//!
//! The board holds one [`Column`] per [`TaskStatus`]. Each column keeps its
//! tasks ordered by `position`, and every mutation renumbers the affected
//! columns so positions stay a contiguous `0..len` sequence.

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};
use crate::task::{Task, TaskId, TaskStatus};

/// A single column of the board.
///
/// # Examples
///
/// ```
/// use snapboard_protocol::{Column, TaskStatus};
///
/// let column = Column::new(TaskStatus::Todo);
/// assert!(column.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// The status every task in this column carries.
    pub status: TaskStatus,
    /// Tasks ordered by position.
    pub tasks: Vec<Task>,
}

impl Column {
    /// Creates an empty column.
    #[must_use]
    pub const fn new(status: TaskStatus) -> Self {
        Self {
            status,
            tasks: Vec::new(),
        }
    }

    /// Returns the number of tasks in this column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if the column has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the index of a task within this column.
    #[must_use]
    pub fn index_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Returns `true` if positions are exactly `0..len` in order.
    #[must_use]
    pub fn positions_are_contiguous(&self) -> bool {
        self.tasks
            .iter()
            .enumerate()
            .all(|(i, t)| t.position == i && t.status == self.status)
    }

    fn renumber(&mut self) {
        let status = self.status;
        for (i, task) in self.tasks.iter_mut().enumerate() {
            if task.position != i || task.status != status {
                task.place(status, i);
            }
        }
    }
}

/// A board with one column per status.
///
/// # Examples
///
/// ```
/// use snapboard_protocol::{Board, Task, TaskStatus};
///
/// let mut board = Board::new();
/// let a = board.add_task(Task::new("A"));
/// let b = board.add_task(Task::new("B"));
///
/// board.move_task(a, TaskStatus::InProgress, 0).unwrap();
/// assert_eq!(board.get_task(b).unwrap().position, 0);
/// assert_eq!(board.get_task(a).unwrap().status, TaskStatus::InProgress);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// The columns, indexed by [`TaskStatus::index`].
    pub columns: [Column; 4],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            columns: TaskStatus::all().map(Column::new),
        }
    }

    /// Builds a board from a flat task list.
    ///
    /// Tasks are grouped by status and ordered by their existing position
    /// (ties keep input order), then renumbered contiguously.
    #[must_use]
    pub fn from_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let mut board = Self::new();
        for task in tasks {
            board.columns[task.status.index()].tasks.push(task);
        }
        for column in &mut board.columns {
            column.tasks.sort_by_key(|t| t.position);
            column.renumber();
        }
        board
    }

    /// Returns the column for a status.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &Column {
        &self.columns[status.index()]
    }

    /// Returns the tasks of a column in position order.
    #[must_use]
    pub fn tasks(&self, status: TaskStatus) -> &[Task] {
        &self.column(status).tasks
    }

    /// Appends a task to the end of its status column.
    ///
    /// The task's position is overwritten with the column length. Returns the
    /// task ID.
    pub fn add_task(&mut self, mut task: Task) -> TaskId {
        let column = &mut self.columns[task.status.index()];
        task.position = column.len();
        let id = task.id;
        column.tasks.push(task);
        id
    }

    /// Finds a task by ID across all columns.
    #[must_use]
    pub fn get_task(&self, id: TaskId) -> Option<&Task> {
        self.columns
            .iter()
            .find_map(|c| c.tasks.iter().find(|t| t.id == id))
    }

    /// Finds a task by ID across all columns, mutably.
    ///
    /// Callers must not change `status` or `position` through this reference;
    /// use [`Board::move_task`] instead.
    #[must_use]
    pub fn get_task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.columns
            .iter_mut()
            .find_map(|c| c.tasks.iter_mut().find(|t| t.id == id))
    }

    /// Returns the column and index of a task.
    #[must_use]
    pub fn locate(&self, id: TaskId) -> Option<(TaskStatus, usize)> {
        self.columns
            .iter()
            .find_map(|c| c.index_of(id).map(|i| (c.status, i)))
    }

    /// Moves a task to `target_index` of the `target` column.
    ///
    /// The index refers to the target column with the moved task already
    /// removed, so it becomes the task's final position. Indices past the end
    /// append. Both affected columns are renumbered.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::TaskNotFound`] if no task has the given ID.
    pub fn move_task(
        &mut self,
        id: TaskId,
        target: TaskStatus,
        target_index: usize,
    ) -> Result<&Task> {
        let (source, index) = self.locate(id).ok_or(ProtocolError::TaskNotFound(id))?;

        let task = self.columns[source.index()].tasks.remove(index);
        let column = &mut self.columns[target.index()];
        let at = target_index.min(column.len());
        column.tasks.insert(at, task);

        self.columns[source.index()].renumber();
        self.columns[target.index()].renumber();

        Ok(&self.columns[target.index()].tasks[at])
    }

    /// Removes a task from the board and renumbers its column.
    pub fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        let (status, index) = self.locate(id)?;
        let column = &mut self.columns[status.index()];
        let task = column.tasks.remove(index);
        column.renumber();
        Some(task)
    }

    /// Returns the total number of tasks.
    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Returns `true` if every column has contiguous positions.
    #[must_use]
    pub fn positions_are_contiguous(&self) -> bool {
        self.columns.iter().all(Column::positions_are_contiguous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(board: &Board, status: TaskStatus) -> Vec<(&str, usize)> {
        board
            .tasks(status)
            .iter()
            .map(|t| (t.title.as_str(), t.position))
            .collect()
    }

    #[test]
    fn new_board_has_four_empty_columns() {
        let board = Board::new();
        for (i, column) in board.columns.iter().enumerate() {
            assert_eq!(column.status.index(), i);
            assert!(column.is_empty());
        }
    }

    #[test]
    fn add_task_assigns_trailing_position() {
        let mut board = Board::new();
        board.add_task(Task::new("A").with_position(7));
        board.add_task(Task::new("B"));
        assert_eq!(titles(&board, TaskStatus::Todo), vec![("A", 0), ("B", 1)]);
    }

    #[test]
    fn from_tasks_sorts_and_renumbers() {
        let board = Board::from_tasks([
            Task::new("C").with_position(9),
            Task::new("A").with_position(1),
            Task::new("X").with_status(TaskStatus::Done).with_position(4),
            Task::new("B").with_position(3),
        ]);

        assert_eq!(
            titles(&board, TaskStatus::Todo),
            vec![("A", 0), ("B", 1), ("C", 2)]
        );
        assert_eq!(titles(&board, TaskStatus::Done), vec![("X", 0)]);
        assert!(board.positions_are_contiguous());
    }

    #[test]
    fn reorder_within_column() {
        let mut board = Board::new();
        let a = board.add_task(Task::new("A"));
        board.add_task(Task::new("B"));
        board.add_task(Task::new("C"));

        board.move_task(a, TaskStatus::Todo, 2).unwrap();
        assert_eq!(
            titles(&board, TaskStatus::Todo),
            vec![("B", 0), ("C", 1), ("A", 2)]
        );
    }

    #[test]
    fn move_across_columns() {
        let mut board = Board::new();
        board.add_task(Task::new("A"));
        let b = board.add_task(Task::new("B"));
        board.add_task(Task::new("C").with_status(TaskStatus::InProgress));

        let moved = board.move_task(b, TaskStatus::InProgress, 0).unwrap();
        assert_eq!(moved.status, TaskStatus::InProgress);

        assert_eq!(titles(&board, TaskStatus::Todo), vec![("A", 0)]);
        assert_eq!(
            titles(&board, TaskStatus::InProgress),
            vec![("B", 0), ("C", 1)]
        );
    }

    #[test]
    fn move_past_end_appends() {
        let mut board = Board::new();
        let a = board.add_task(Task::new("A"));
        board.add_task(Task::new("B").with_status(TaskStatus::Done));

        board.move_task(a, TaskStatus::Done, 42).unwrap();
        assert_eq!(titles(&board, TaskStatus::Done), vec![("B", 0), ("A", 1)]);
    }

    #[test]
    fn move_unknown_task_fails() {
        let mut board = Board::new();
        let err = board
            .move_task(TaskId::new_v4(), TaskStatus::Done, 0)
            .unwrap_err();
        assert!(matches!(err, ProtocolError::TaskNotFound(_)));
    }

    #[test]
    fn remove_task_renumbers() {
        let mut board = Board::new();
        let a = board.add_task(Task::new("A"));
        board.add_task(Task::new("B"));

        assert!(board.remove_task(a).is_some());
        assert_eq!(titles(&board, TaskStatus::Todo), vec![("B", 0)]);
        assert!(board.remove_task(a).is_none());
    }

    #[test]
    fn locate_reports_column_and_index() {
        let mut board = Board::new();
        board.add_task(Task::new("A").with_status(TaskStatus::InReview));
        let b = board.add_task(Task::new("B").with_status(TaskStatus::InReview));
        assert_eq!(board.locate(b), Some((TaskStatus::InReview, 1)));
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_status() -> impl Strategy<Value = TaskStatus> {
        (0usize..4).prop_map(|i| TaskStatus::from_index(i).expect("index in range"))
    }

    proptest! {
        /// Any sequence of moves keeps every column contiguous and never loses a task.
        #[test]
        fn moves_preserve_contiguity(
            initial in proptest::collection::vec(arb_status(), 1..12),
            moves in proptest::collection::vec(
                (any::<prop::sample::Index>(), arb_status(), 0usize..15),
                0..20,
            ),
        ) {
            let mut board = Board::new();
            let ids: Vec<TaskId> = initial
                .iter()
                .enumerate()
                .map(|(i, status)| board.add_task(Task::new(format!("T{i}")).with_status(*status)))
                .collect();

            for (pick, target, index) in moves {
                let id = ids[pick.index(ids.len())];
                board.move_task(id, target, index).expect("task exists");
                prop_assert!(board.positions_are_contiguous());
            }

            prop_assert_eq!(board.total_tasks(), ids.len());
        }
    }
}
