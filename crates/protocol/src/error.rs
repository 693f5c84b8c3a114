//! Error types for the snapboard-protocol crate.

use thiserror::Error;

use crate::task::TaskId;

/// Errors that can occur when mutating a board.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A task with the given ID was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
