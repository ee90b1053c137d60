//! Task management service: input validation and repository orchestration.

use crate::task::{
    domain::{Task, TaskDomainError, TaskId, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Classification of task service failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskServiceErrorKind {
    /// The caller supplied an invalid identifier or title.
    InvalidArgument,
    /// The requested task does not exist.
    NotFound,
    /// The underlying store failed.
    Storage,
}

impl TaskServiceErrorKind {
    /// Returns the `snake_case` label used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidArgument => "invalid_argument",
            Self::NotFound => "not_found",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for TaskServiceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by [`TaskService`] operations.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct TaskServiceError {
    kind: TaskServiceErrorKind,
    message: String,
    #[source]
    source: Option<Arc<dyn StdError + Send + Sync>>,
}

impl TaskServiceError {
    /// Creates an error of the given kind without an underlying cause.
    #[must_use]
    pub fn new(kind: TaskServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Attaches an underlying cause.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn StdError + Send + Sync>) -> Self {
        self.source = Some(source);
        self
    }

    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> TaskServiceErrorKind {
        self.kind
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<TaskDomainError> for TaskServiceError {
    fn from(err: TaskDomainError) -> Self {
        Self::new(TaskServiceErrorKind::InvalidArgument, err.to_string())
            .with_source(Arc::new(err))
    }
}

impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => {
                Self::new(TaskServiceErrorKind::NotFound, format!("task {id} not found"))
            }
            TaskRepositoryError::Duplicate(_) => {
                Self::new(TaskServiceErrorKind::Storage, err.to_string()).with_source(Arc::new(err))
            }
            TaskRepositoryError::Persistence(ref cause) => {
                let cause = Arc::clone(cause);
                Self::new(TaskServiceErrorKind::Storage, err.to_string()).with_source(cause)
            }
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task management service.
///
/// Validates caller input, stamps timestamps from the injected clock and
/// delegates persistence to the repository.
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

    /// Creates and stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceErrorKind::InvalidArgument`] when the title is
    /// blank (nothing is written) or [`TaskServiceErrorKind::Storage`] when
    /// the repository fails.
    pub async fn create_task(
        &self,
        title: &str,
        description: &str,
    ) -> TaskServiceResult<Task> {
        let title = TaskTitle::new(title)?;
        let task = Task::new(title, description, &*self.clock);
        self.repository.create(&task).await.inspect_err(|err| {
            warn!(task_id = %task.id(), error = %err, "failed to store task");
        })?;
        debug!(task_id = %task.id(), "task created");
        Ok(task)
    }

    /// Fetches a task by its textual identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceErrorKind::InvalidArgument`] for a malformed
    /// identifier or [`TaskServiceErrorKind::NotFound`] when no task matches.
    pub async fn get_task(&self, id: &str) -> TaskServiceResult<Task> {
        let task_id = TaskId::parse(id)?;
        Ok(self.repository.get(task_id).await?)
    }

    /// Lists every task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceErrorKind::Storage`] when the repository fails.
    pub async fn list_tasks(&self) -> TaskServiceResult<Vec<Task>> {
        let tasks = self.repository.list().await?;
        debug!(count = tasks.len(), "tasks listed");
        Ok(tasks)
    }

    /// Replaces the title and description of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceErrorKind::InvalidArgument`] for a malformed
    /// identifier or blank title, [`TaskServiceErrorKind::NotFound`] when
    /// the task does not exist, or [`TaskServiceErrorKind::Storage`].
    pub async fn update_task(
        &self,
        id: &str,
        title: &str,
        description: &str,
    ) -> TaskServiceResult<Task> {
        let task_id = TaskId::parse(id)?;
        let title = TaskTitle::new(title)?;

        let mut task = self.repository.get(task_id).await?;
        task.revise(title, description, &*self.clock);
        self.repository.update(&task).await?;
        debug!(task_id = %task_id, "task updated");
        Ok(task)
    }

    /// Deletes a task. Unknown identifiers are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceErrorKind::InvalidArgument`] for a malformed
    /// identifier or [`TaskServiceErrorKind::Storage`].
    pub async fn delete_task(&self, id: &str) -> TaskServiceResult<bool> {
        let task_id = TaskId::parse(id)?;
        let removed = self.repository.delete(task_id).await?;
        debug!(task_id = %task_id, removed, "task deleted");
        Ok(true)
    }
}
