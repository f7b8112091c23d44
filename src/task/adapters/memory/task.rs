//! In-memory task repository.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskId, TaskPatch},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers start at 1 and are never reused, matching a database sequence.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state.tasks.values().cloned().collect();
        tasks.sort_by(|left, right| {
            right
                .created_at()
                .cmp(&left.created_at())
                .then_with(|| right.id().cmp(&left.id()))
        });
        Ok(tasks)
    }

    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        state.last_id += 1;
        let id = TaskId::new(state.last_id);

        let created = Task::from_persisted(PersistedTaskData {
            id,
            title: task.title().clone(),
            description: task.description().map(str::to_owned),
            completed: false,
            created_at: task.created_at(),
            updated_at: task.created_at(),
        });
        state.tasks.insert(id, created.clone());
        Ok(created)
    }

    async fn update_by_id(
        &self,
        id: TaskId,
        patch: &TaskPatch,
    ) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.write()?;
        let Some(task) = state.tasks.get_mut(&id) else {
            return Ok(None);
        };
        task.apply_patch(patch);
        Ok(Some(task.clone()))
    }

    async fn delete_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.write()?;
        Ok(state.tasks.remove(&id))
    }
}
