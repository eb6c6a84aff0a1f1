//! Error types for board operations.
//!
//! Validation and lookup failures are local and recoverable: the board is
//! left exactly as it was and the caller decides how to surface the message.

use std::path::PathBuf;

use crate::task::TaskId;

/// Errors that can occur while operating on the task board.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// A required field of a new or edited task was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A comment contained no visible text.
    #[error("comment text cannot be empty")]
    EmptyComment,

    /// A subtask title contained no visible text.
    #[error("subtask title cannot be empty")]
    EmptySubtask,

    /// No task carries the requested id.
    #[error("task {0} not found")]
    NotFound(TaskId),

    /// The task exists but has no subtask with the requested id.
    #[error("subtask {subtask} not found on task {task}")]
    SubtaskNotFound { task: TaskId, subtask: String },

    /// Two tasks in a loaded collection share an id.
    #[error("duplicate task id {0}")]
    DuplicateId(TaskId),

    /// A progress value was not a whole number.
    #[error("invalid progress '{0}', expected a whole number from 0 to 100")]
    InvalidProgress(String),

    /// A report month selector was not of the form `YYYY-MM`.
    #[error("invalid report month '{0}', expected YYYY-MM")]
    InvalidMonth(String),

    /// A date argument was not of the form `YYYY-MM-DD`.
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Failed to read a seed fixture.
    #[error("failed to read seed file at {path}: {source}")]
    ReadSeed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a seed fixture.
    #[error("failed to parse seed file: {0}")]
    ParseSeed(#[from] serde_json::Error),

    /// Failed to write a CSV report.
    #[error("failed to write report to {path}: {source}")]
    WriteReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A specialized Result type for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;
