//! REST gateway process forwarding task calls to the task service.
//!
//! Configuration is read from the environment; see
//! [`task_tracker::config::GatewayConfig::from_env`].

use eyre::WrapErr;
use std::sync::Arc;
use task_tracker::{
    config::GatewayConfig,
    gateway::{GatewayState, create_router},
    rpc::HttpTaskServiceClient,
    server, telemetry,
};
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    telemetry::init_tracing();
    let config = GatewayConfig::from_env().wrap_err("failed to load gateway configuration")?;

    let client = HttpTaskServiceClient::new(&config.service_url);
    info!(endpoint = client.endpoint(), "forwarding to task service");
    let app = create_router(GatewayState::new(Arc::new(client), config.timeouts))
        .layer(TraceLayer::new_for_http());

    let listener = server::bind(&config.host, config.port)
        .await
        .wrap_err_with(|| format!("failed to bind {}:{}", config.host, config.port))?;
    server::serve(listener, app)
        .await
        .wrap_err("gateway stopped with an error")
}
