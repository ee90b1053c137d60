//! Task aggregate root.

use super::{TaskId, TaskTitle};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, empty when none was given.
    pub description: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted update timestamp, if the task was ever updated.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task with a fresh identifier and creation timestamp.
    ///
    /// Timestamps are truncated to microseconds, the precision the store
    /// keeps.
    #[must_use]
    pub fn new(title: TaskTitle, description: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::new(),
            title,
            description: description.into(),
            created_at: stamp(clock),
            updated_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp, if any.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Replaces the title and description and stamps `updated_at`.
    ///
    /// The identifier and creation timestamp are left untouched.
    pub fn revise(&mut self, title: TaskTitle, description: impl Into<String>, clock: &impl Clock) {
        self.title = title;
        self.description = description.into();
        self.updated_at = Some(stamp(clock));
    }
}

fn stamp(clock: &impl Clock) -> DateTime<Utc> {
    clock.utc().trunc_subsecs(6)
}
