//! Application state management.
//!
//! This module defines the keyboard selection the TUI keeps on top of the
//! board: which column is focused and which card in it.

use snapboard_protocol::{Board, Task, TaskId, TaskStatus};

/// The keyboard selection.
///
/// The board itself lives in the [`BoardSurface`](crate::BoardSurface); the
/// navigation methods take it by reference so the selection can be clamped
/// to what is actually there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppState {
    /// The focused column.
    pub selected_column: TaskStatus,
    /// Index of the selected card within the focused column, if any.
    pub selected_task: Option<usize>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Creates a selection focused on the first column with no card selected.
    ///
    /// # Examples
    ///
    /// ```
    /// use snapboard_protocol::TaskStatus;
    /// use snapboard_tui::AppState;
    ///
    /// let state = AppState::new();
    /// assert_eq!(state.selected_column, TaskStatus::Todo);
    /// assert!(state.selected_task.is_none());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected_column: TaskStatus::Todo,
            selected_task: None,
        }
    }

    /// Moves the column selection to the left, wrapping around if needed.
    pub fn navigate_left(&mut self, board: &Board) {
        self.selected_column = self
            .selected_column
            .previous()
            .unwrap_or(TaskStatus::Done);
        self.clamp_task_selection(board);
    }

    /// Moves the column selection to the right, wrapping around if needed.
    pub fn navigate_right(&mut self, board: &Board) {
        self.selected_column = self.selected_column.next().unwrap_or(TaskStatus::Todo);
        self.clamp_task_selection(board);
    }

    /// Moves the card selection up within the focused column.
    pub fn navigate_up(&mut self, board: &Board) {
        let len = board.tasks(self.selected_column).len();
        if len == 0 {
            self.selected_task = None;
            return;
        }

        self.selected_task = match self.selected_task {
            Some(idx) if idx > 0 => Some(idx - 1),
            // Wrap to bottom
            Some(_) => Some(len - 1),
            None => Some(0),
        };
    }

    /// Moves the card selection down within the focused column.
    pub fn navigate_down(&mut self, board: &Board) {
        let len = board.tasks(self.selected_column).len();
        if len == 0 {
            self.selected_task = None;
            return;
        }

        self.selected_task = match self.selected_task {
            Some(idx) if idx + 1 < len => Some(idx + 1),
            // Wrap to top, or select the first card
            _ => Some(0),
        };
    }

    /// Returns the selected task, if any.
    #[must_use]
    pub fn selected_task<'a>(&self, board: &'a Board) -> Option<&'a Task> {
        board.tasks(self.selected_column).get(self.selected_task?)
    }

    /// Moves the selection onto `id` wherever it is now.
    ///
    /// Returns `false` if the task is not on the board.
    pub fn follow_task(&mut self, board: &Board, id: TaskId) -> bool {
        match board.locate(id) {
            Some((column, index)) => {
                self.selected_column = column;
                self.selected_task = Some(index);
                true
            }
            None => false,
        }
    }

    /// Clears the current card selection.
    pub fn clear_selection(&mut self) {
        self.selected_task = None;
    }

    /// Ensures the card selection is valid for the focused column.
    pub fn clamp_task_selection(&mut self, board: &Board) {
        let len = board.tasks(self.selected_column).len();
        if len == 0 {
            self.selected_task = None;
        } else if let Some(idx) = self.selected_task
            && idx >= len
        {
            self.selected_task = Some(len - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use snapboard_protocol::dummy::dummy_board;

    use super::*;

    #[test]
    fn navigate_left_wraps_around() {
        let board = Board::new();
        let mut state = AppState::new();

        state.navigate_left(&board);
        assert_eq!(state.selected_column, TaskStatus::Done);

        state.navigate_left(&board);
        assert_eq!(state.selected_column, TaskStatus::InReview);
    }

    #[test]
    fn navigate_right_wraps_around() {
        let board = Board::new();
        let mut state = AppState::new();
        state.selected_column = TaskStatus::Done;

        state.navigate_right(&board);
        assert_eq!(state.selected_column, TaskStatus::Todo);
    }

    #[test]
    fn navigate_up_down_in_empty_column() {
        let board = Board::new();
        let mut state = AppState::new();

        state.navigate_down(&board);
        assert_eq!(state.selected_task, None);
        state.navigate_up(&board);
        assert_eq!(state.selected_task, None);
    }

    #[test]
    fn navigate_up_down_with_tasks() {
        let board = dummy_board();
        let mut state = AppState::new();

        state.navigate_down(&board);
        assert_eq!(state.selected_task, Some(0));
        state.navigate_down(&board);
        state.navigate_down(&board);
        assert_eq!(state.selected_task, Some(2));
        state.navigate_down(&board);
        assert_eq!(state.selected_task, Some(0));
        state.navigate_up(&board);
        assert_eq!(state.selected_task, Some(2));
    }

    #[test]
    fn changing_column_clamps_selection() {
        let board = dummy_board();
        let mut state = AppState::new();
        state.selected_task = Some(2);

        state.navigate_right(&board);
        assert_eq!(state.selected_column, TaskStatus::InProgress);
        assert_eq!(state.selected_task, Some(1));
    }

    #[test]
    fn selected_task_reads_from_board() {
        let board = dummy_board();
        let mut state = AppState::new();
        assert!(state.selected_task(&board).is_none());

        state.navigate_down(&board);
        assert_eq!(
            state.selected_task(&board).map(|t| t.title.as_str()),
            Some("Set up dev environment")
        );
    }

    #[test]
    fn follow_task_tracks_a_moved_card() {
        let mut board = dummy_board();
        let id = board.tasks(TaskStatus::Todo)[0].id;
        board.move_task(id, TaskStatus::Done, 1).expect("move");

        let mut state = AppState::new();
        assert!(state.follow_task(&board, id));
        assert_eq!(state.selected_column, TaskStatus::Done);
        assert_eq!(state.selected_task, Some(1));
        assert!(!state.follow_task(&board, TaskId::nil()));
    }
}
