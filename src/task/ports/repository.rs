//! Repository port for task persistence and lookup.

use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Callers bound each operation with their own deadline; dropping the
/// returned future abandons the call.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Duplicate`] when the task ID already
    /// exists or [`TaskRepositoryError::Persistence`] when the store fails.
    async fn create(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Fetches a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task matches.
    async fn get(&self, id: TaskId) -> TaskRepositoryResult<Task>;

    /// Returns every stored task, oldest first.
    ///
    /// An empty store yields an empty vector.
    async fn list(&self) -> TaskRepositoryResult<Vec<Task>>;

    /// Overwrites the title, description and update timestamp of an existing
    /// task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Removes a task, returning the number of removed rows.
    ///
    /// Deleting an unknown identifier is not an error and returns `0`.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<usize>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    Duplicate(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
