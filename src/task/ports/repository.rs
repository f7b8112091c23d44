//! Repository port for task persistence.

use crate::task::domain::{NewTask, Task, TaskId, TaskPatch};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every method maps to a single store statement. Implementations do not
/// retry.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every task, most recently created first.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Inserts a new incomplete task and returns it with its assigned
    /// identifier.
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Applies the fields present in `patch` to the task with `id`.
    ///
    /// Returns `None` when no task has the identifier.
    async fn update_by_id(
        &self,
        id: TaskId,
        patch: &TaskPatch,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Permanently removes the task with `id`, returning its prior contents.
    ///
    /// Returns `None` when no task has the identifier.
    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted task data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps persisted-data decoding or validation failures.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
