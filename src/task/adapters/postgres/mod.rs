//! `PostgreSQL` adapters for task persistence.

mod migrations;
mod models;
mod repository;
mod schema;

pub use migrations::{MigrationError, apply_migrations, run_migrations};
pub use repository::{PostgresTaskRepository, TaskPgPool, connect_pool};
