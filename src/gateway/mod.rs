//! REST gateway in front of the task service.
//!
//! Decodes JSON request bodies, forwards each call to the task service
//! through [`TaskServiceClient`] with a bounded deadline and maps RPC error
//! kinds to HTTP status codes. Routes are served both at the root and under
//! `/api/v1`.

pub mod dto;
pub mod error;
mod handlers;
mod routes;


pub use error::{ApiError, Operation};
pub use routes::create_router;

use crate::config::Timeouts;
use crate::rpc::TaskServiceClient;
use std::sync::Arc;

/// Shared state handed to every gateway handler.
#[derive(Clone)]
pub struct GatewayState {
    client: Arc<dyn TaskServiceClient>,
    timeouts: Timeouts,
}

impl GatewayState {
    /// Creates gateway state around a task service client.
    #[must_use]
    pub const fn new(client: Arc<dyn TaskServiceClient>, timeouts: Timeouts) -> Self {
        Self { client, timeouts }
    }
}
