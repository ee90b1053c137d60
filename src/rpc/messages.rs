//! Parameter and result messages for the task service methods.

use crate::task::domain::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire representation of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMessage {
    /// Hyphenated lowercase UUID.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Task description, empty when none was given.
    #[serde(default)]
    pub description: String,
    /// Creation timestamp (RFC 3339).
    pub created_at: DateTime<Utc>,
    /// Last update timestamp (RFC 3339), `null` when never updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Task> for TaskMessage {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            title: task.title().as_str().to_owned(),
            description: task.description().to_owned(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// `CreateTask` parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskParams {
    /// Title of the new task.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: String,
}

/// `GetTask` and `DeleteTask` parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskIdParams {
    /// Task identifier.
    pub id: String,
}

/// `UpdateTask` parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskParams {
    /// Task identifier.
    pub id: String,
    /// Replacement title.
    pub title: String,
    /// Replacement description.
    #[serde(default)]
    pub description: String,
}

/// Result of `CreateTask`, `GetTask` and `UpdateTask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResult {
    /// The affected task.
    pub task: TaskMessage,
}

/// Result of `ListTasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListResult {
    /// Every stored task, oldest first.
    #[serde(default)]
    pub tasks: Vec<TaskMessage>,
}

/// Result of `DeleteTask`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTaskResult {
    /// Whether the call succeeded.
    pub success: bool,
}
