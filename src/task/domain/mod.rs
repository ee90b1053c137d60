//! Domain model for task management.
//!
//! A task is a titled, optionally described unit of work with creation and
//! update timestamps. Infrastructure concerns (rows, wire messages, JSON
//! payloads) stay outside of the domain boundary.

mod error;
mod ids;
mod task;

pub use error::TaskDomainError;
pub use ids::{TaskId, TaskTitle};
pub use task::{PersistedTaskData, Task};
