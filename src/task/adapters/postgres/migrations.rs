//! Embedded schema migrations for the task store.
//!
//! Each script is idempotent, so running the full set on every startup is
//! safe.

use super::repository::TaskPgPool;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use thiserror::Error;
use tracing::{debug, info};

/// Ordered `(name, up.sql)` pairs applied by [`apply_migrations`].
const MIGRATIONS: &[(&str, &str)] = &[(
    "2025-03-19-000000_create_tasks",
    include_str!("../../../../migrations/2025-03-19-000000_create_tasks/up.sql"),
)];

/// Errors raised while applying schema migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// No pooled connection could be obtained.
    #[error("failed to acquire a connection for migrations: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    /// A migration script failed to execute.
    #[error("migration {name} failed: {source}")]
    Sql {
        /// Migration directory name.
        name: &'static str,
        /// Underlying database error.
        source: diesel::result::Error,
    },

    /// The blocking migration task panicked or was cancelled.
    #[error("migration task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Applies every embedded migration on the given connection, in order.
///
/// # Errors
///
/// Returns [`MigrationError::Sql`] naming the first script that failed.
pub fn apply_migrations(connection: &mut PgConnection) -> Result<(), MigrationError> {
    for &(name, sql) in MIGRATIONS {
        debug!(migration = name, "applying migration");
        connection
            .batch_execute(sql)
            .map_err(|source| MigrationError::Sql { name, source })?;
    }
    Ok(())
}

/// Applies every embedded migration using one connection from the pool.
///
/// # Errors
///
/// Returns [`MigrationError`] when a connection cannot be acquired or a
/// script fails.
pub async fn run_migrations(pool: &TaskPgPool) -> Result<(), MigrationError> {
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool.get()?;
        apply_migrations(&mut connection)
    })
    .await??;
    info!(count = MIGRATIONS.len(), "schema migrations applied");
    Ok(())
}
