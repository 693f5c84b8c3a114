//! TUI message types for event handling.
//!
//! This module defines the message enum produced by the terminal input
//! handler and consumed by the board application.

use serde::{Deserialize, Serialize};

/// Phase of a mouse gesture reported by the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerAction {
    /// Primary button pressed.
    Press,
    /// Pointer moved with the primary button held.
    Drag,
    /// Primary button released.
    Release,
}

/// Messages that represent user actions in the TUI.
///
/// # Examples
///
/// ```
/// use snapboard_protocol::Message;
///
/// assert!(Message::NavigateUp.is_navigation());
/// assert!(Message::Quit.is_terminating());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Move focus (or a held card) left.
    NavigateLeft,
    /// Move focus (or a held card) right.
    NavigateRight,
    /// Move focus (or a held card) up.
    NavigateUp,
    /// Move focus (or a held card) down.
    NavigateDown,
    /// Pick up the focused card, or drop the held one.
    Select,
    /// Cancel the current drag.
    Escape,
    /// Restore the sample board.
    Reset,
    /// Quit the application.
    Quit,
    /// Mouse gesture at terminal coordinates (column, row).
    Pointer {
        /// What the pointer did.
        action: PointerAction,
        /// Column (x coordinate).
        column: u16,
        /// Row (y coordinate).
        row: u16,
    },
    /// The terminal was resized.
    Resize,
}

impl Message {
    /// Returns `true` if this message is a navigation action.
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::NavigateLeft | Self::NavigateRight | Self::NavigateUp | Self::NavigateDown
        )
    }

    /// Returns `true` if this message should terminate the application.
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }
}
