//! JSON bodies accepted and returned by the gateway.

use crate::rpc::TaskMessage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /tasks` and `PUT /tasks/{id}`.
///
/// Missing fields decode as empty strings; the task service rejects an
/// empty title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TaskRequest {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
}

/// A task as returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Task identifier.
    pub id: String,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp, `null` when never updated.
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<TaskMessage> for TaskResponse {
    fn from(message: TaskMessage) -> Self {
        Self {
            id: message.id,
            title: message.title,
            description: message.description,
            created_at: message.created_at,
            updated_at: message.updated_at,
        }
    }
}

/// Body of `GET /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListResponse {
    /// Every task, oldest first.
    pub tasks: Vec<TaskResponse>,
}

/// Confirmation body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// Error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short description of what failed.
    pub error: String,
    /// Raw diagnostic from the failing layer.
    pub error_message: String,
}
