//! Errors raised by the task domain and the store.

use thiserror::Error;

use super::ids::TaskId;

/// A task invariant was violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task title cannot be empty")]
    EmptyTitle,

    #[error("unknown priority {0:?} (expected High, Medium or Low)")]
    UnknownPriority(String),
}

/// Failure of a store operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("task with id {0} does not exist")]
    NotFound(TaskId),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl TaskError {
    /// The offending id, for `NotFound`.
    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            TaskError::NotFound(id) => Some(*id),
            TaskError::Validation(_) => None,
        }
    }
}
