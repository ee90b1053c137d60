//! JSON-RPC 2.0 transport between the gateway and the task service.
//!
//! The task service exposes `POST /rpc` (see [`server::router`]); the gateway
//! calls it through the [`client::TaskServiceClient`] port. Both sides share
//! the envelope types in [`protocol`] and the payload messages in
//! [`messages`].

pub mod client;
pub mod messages;
pub mod protocol;
pub mod server;

pub use client::{
    HttpTaskServiceClient, RpcClientError, RpcClientResult, RpcErrorKind, TaskServiceClient,
};
pub use messages::TaskMessage;
pub use protocol::{RpcError, RpcMethod, RpcRequest, RpcResponse};
