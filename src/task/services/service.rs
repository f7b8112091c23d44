//! Service layer for the four task operations.

use super::validation::{ValidationErrors, validate_create, validate_update};
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    pub(super) title: String,
    pub(super) description: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the raw, untrimmed title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Request payload for a partial task update.
///
/// Unset fields are left unchanged in storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    pub(super) title: Option<String>,
    pub(super) description: Option<String>,
    pub(super) completed: Option<bool>,
}

impl UpdateTaskRequest {
    /// Creates a request that changes no field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the completion flag.
    #[must_use]
    pub const fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Request validation failed; storage was not touched.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// No task has the requested identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Holds no per-request state; the repository is the only owner of task
/// data.
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns every task, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store fails.
    pub async fn list(&self) -> TaskServiceResult<Vec<Task>> {
        Ok(self.repository.list_all().await?)
    }

    /// Validates and stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for an invalid title or
    /// [`TaskServiceError::Repository`] when the store fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let new_task = validate_create(request, self.clock.utc())?;
        let task = self.repository.insert(&new_task).await?;
        tracing::debug!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Applies a partial update to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for invalid supplied fields,
    /// [`TaskServiceError::NotFound`] when no task has `id`, or
    /// [`TaskServiceError::Repository`] when the store fails.
    pub async fn update(
        &self,
        id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<Task> {
        let patch = validate_update(request, self.clock.utc())?;
        let task = self
            .repository
            .update_by_id(id, &patch)
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;
        tracing::debug!(task_id = %id, "task updated");
        Ok(task)
    }

    /// Permanently deletes a task, returning its prior contents.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has `id`, or
    /// [`TaskServiceError::Repository`] when the store fails.
    pub async fn delete(&self, id: TaskId) -> TaskServiceResult<Task> {
        let task = self
            .repository
            .delete_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))?;
        tracing::debug!(task_id = %id, "task deleted");
        Ok(task)
    }
}
