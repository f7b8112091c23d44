//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The title is empty after trimming.
    #[error("Title is required")]
    EmptyTitle,

    /// The trimmed title is longer than the store accepts.
    #[error("Title must be at most {max} characters, got {length}")]
    TitleTooLong {
        /// Number of characters supplied.
        length: usize,
        /// Largest accepted number of characters.
        max: usize,
    },

    /// The task identifier is not an integer.
    #[error("invalid task id '{0}', expected an integer")]
    InvalidTaskId(String),
}
