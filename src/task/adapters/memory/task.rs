//! In-memory repository for task tests and storage-less deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{PersistedTaskData, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_poisoned(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_poisoned)?;
        if tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::Duplicate(task.id()));
        }
        tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn get(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        let tasks = self.state.read().map_err(lock_poisoned)?;
        tasks
            .get(&id)
            .cloned()
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        let tasks = self.state.read().map_err(lock_poisoned)?;
        let mut all: Vec<Task> = tasks.values().cloned().collect();
        all.sort_by_key(|task| (task.created_at(), task.id()));
        Ok(all)
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tasks = self.state.write().map_err(lock_poisoned)?;
        let stored = tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;

        // Only the mutable columns are written; `created_at` keeps the stored value.
        *stored = Task::from_persisted(PersistedTaskData {
            id: stored.id(),
            title: task.title().clone(),
            description: task.description().to_owned(),
            created_at: stored.created_at(),
            updated_at: task.updated_at(),
        });
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<usize> {
        let mut tasks = self.state.write().map_err(lock_poisoned)?;
        Ok(usize::from(tasks.remove(&id).is_some()))
    }
}
