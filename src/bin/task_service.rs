//! Task service process: applies migrations, then serves JSON-RPC.
//!
//! Configuration is read from the environment; see
//! [`task_tracker::config::ServiceConfig::from_env`].

use eyre::{WrapErr, eyre};
use mockable::DefaultClock;
use std::sync::Arc;
use task_tracker::{
    config::{ServiceConfig, StorageBackend},
    rpc::server::router,
    server,
    task::{
        adapters::{
            memory::InMemoryTaskRepository,
            postgres::{PostgresTaskRepository, connect_pool, run_migrations},
        },
        services::TaskService,
    },
    telemetry,
};
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    telemetry::init_tracing();
    let config = ServiceConfig::from_env().wrap_err("failed to load task service configuration")?;
    let clock = Arc::new(DefaultClock);

    let app = match config.storage {
        StorageBackend::Memory => {
            info!("using in-memory task storage");
            router(TaskService::new(Arc::new(InMemoryTaskRepository::new()), clock))
        }
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| eyre!("DATABASE_URL is required for postgres storage"))?;
            let pool = connect_pool(url, config.pool_size).wrap_err("failed to connect to database")?;
            run_migrations(&pool)
                .await
                .wrap_err("failed to apply schema migrations")?;
            router(TaskService::new(Arc::new(PostgresTaskRepository::new(pool)), clock))
        }
    };

    let listener = server::bind(&config.host, config.port)
        .await
        .wrap_err_with(|| format!("failed to bind {}:{}", config.host, config.port))?;
    info!("task service ready");
    server::serve(listener, app.layer(TraceLayer::new_for_http()))
        .await
        .wrap_err("task service stopped with an error")
}
