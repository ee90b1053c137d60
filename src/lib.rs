//! Task tracker: a REST gateway in front of a JSON-RPC task service.
//!
//! The task service stores tasks in `PostgreSQL` (or in memory) and exposes
//! five operations over JSON-RPC 2.0. The gateway translates REST calls into
//! those operations with a bounded deadline per call.
//!
//! # Architecture
//!
//! The task module follows hexagonal architecture principles:
//!
//! - **Domain**: the task aggregate and its validated values
//! - **Ports**: the repository trait
//! - **Adapters**: `PostgreSQL` and in-memory repositories
//! - **Services**: input validation and repository orchestration
//!
//! # Modules
//!
//! - [`task`]: domain, persistence and application service
//! - [`rpc`]: JSON-RPC server and client
//! - [`gateway`]: REST routes over the RPC client
//! - [`config`]: environment-based configuration
//! - [`server`]: listener binding, health check and graceful shutdown
//! - [`telemetry`]: tracing subscriber setup

pub mod config;
pub mod gateway;
pub mod rpc;
pub mod server;
pub mod task;
pub mod telemetry;
