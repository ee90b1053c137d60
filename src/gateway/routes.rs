//! Gateway route table.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | /tasks | `list_tasks` |
//! | POST | /tasks | `create_task` |
//! | GET | /tasks/{id} | `get_task` |
//! | PUT | /tasks/{id} | `update_task` |
//! | DELETE | /tasks/{id} | `delete_task` |
//! | GET | /health | `health_check` |
//!
//! Every route is also available under `/api/v1`.

use super::GatewayState;
use super::handlers::{create_task, delete_task, get_task, list_tasks, update_task};
use crate::server::health_check;
use axum::{Router, routing::get};

/// Builds the gateway router.
#[must_use]
pub fn create_router(state: GatewayState) -> Router {
    let routes = Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/health", get(health_check));

    Router::new()
        .merge(routes.clone())
        .nest("/api/v1", routes)
        .with_state(state)
}
