//! Shared world state for task lifecycle BDD scenarios.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use eyre::WrapErr;
use http_body_util::BodyExt;
use mockable::DefaultClock;
use rstest::fixture;
use serde_json::Value;
use task_tracker::{
    config::Timeouts,
    gateway::{GatewayState, create_router},
    rpc::{HttpTaskServiceClient, server::router},
    task::{adapters::memory::InMemoryTaskRepository, services::TaskService},
};
use tokio::{net::TcpListener, task::JoinHandle};
use tower::ServiceExt;

/// Scenario world for task lifecycle behaviour tests.
#[derive(Default)]
pub struct LifecycleWorld {
    pub gateway: Option<Router>,
    pub service_handle: Option<JoinHandle<()>>,
    pub created_id: Option<String>,
    pub last_status: Option<StatusCode>,
    pub last_body: Value,
}

impl LifecycleWorld {
    /// Starts an in-memory task service on an ephemeral port and builds a
    /// gateway pointing at it.
    pub fn start(&mut self) -> Result<(), eyre::Report> {
        let (address, handle) = run_async(async {
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .wrap_err("bind task service listener")?;
            let address = listener.local_addr().wrap_err("read bound address")?;
            let service = TaskService::new(
                Arc::new(InMemoryTaskRepository::new()),
                Arc::new(DefaultClock),
            );
            let handle = tokio::spawn(async move {
                if let Err(err) = axum::serve(listener, router(service)).await {
                    tracing::error!(error = %err, "task service stopped");
                }
            });
            Ok::<_, eyre::Report>((address, handle))
        })?;

        let client = HttpTaskServiceClient::new(&format!("http://{address}"));
        self.gateway = Some(create_router(GatewayState::new(
            Arc::new(client),
            Timeouts::default(),
        )));
        self.service_handle = Some(handle);
        Ok(())
    }

    /// Sends a request through the gateway and records status and body.
    pub fn send(&mut self, method: &str, uri: &str, body: Option<Value>) -> Result<(), eyre::Report> {
        let gateway = self
            .gateway
            .clone()
            .ok_or_else(|| eyre::eyre!("gateway has not been started"))?;
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(serde_json::to_vec(&json).wrap_err("encode request body")?)
            }
            None => Body::empty(),
        };
        let request = builder.body(body).wrap_err("build request")?;

        let (status, bytes) = run_async(async move {
            let response = gateway
                .oneshot(request)
                .await
                .map_err(|err| eyre::eyre!("gateway call failed: {err}"))?;
            let status = response.status();
            let bytes = response
                .into_body()
                .collect()
                .await
                .map_err(|err| eyre::eyre!("collect body: {err}"))?
                .to_bytes();
            Ok::<_, eyre::Report>((status, bytes))
        })?;

        self.last_status = Some(status);
        self.last_body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).wrap_err("decode response body")?
        };
        Ok(())
    }

    /// Returns the identifier recorded by the last successful create.
    pub fn created_id(&self) -> Result<String, eyre::Report> {
        self.created_id
            .clone()
            .ok_or_else(|| eyre::eyre!("no task has been created in this scenario"))
    }
}

impl Drop for LifecycleWorld {
    fn drop(&mut self) {
        if let Some(handle) = self.service_handle.take() {
            handle.abort();
        }
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> LifecycleWorld {
    LifecycleWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
