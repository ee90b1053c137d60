//! JSON-RPC 2.0 envelope types and error codes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Protocol version carried in every envelope.
pub const JSONRPC_VERSION: &str = "2.0";

/// Invalid JSON was received.
pub const PARSE_ERROR: i32 = -32700;
/// The JSON sent is not a valid request object.
pub const INVALID_REQUEST: i32 = -32600;
/// The method does not exist.
pub const METHOD_NOT_FOUND: i32 = -32601;
/// Invalid method parameters, including rejected task input.
pub const INVALID_PARAMS: i32 = -32602;
/// Internal or storage error.
pub const INTERNAL_ERROR: i32 = -32603;
/// The requested task does not exist.
pub const TASK_NOT_FOUND: i32 = -32004;

/// JSON-RPC request envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Protocol version, always `"2.0"`.
    pub jsonrpc: String,
    /// Method name.
    pub method: String,
    /// Method parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Request identifier echoed in the response.
    #[serde(default)]
    pub id: Value,
}

impl RpcRequest {
    /// Builds a request for the given method.
    #[must_use]
    pub fn new(method: RpcMethod, params: Value, id: u64) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            method: method.as_str().to_owned(),
            params: Some(params),
            id: Value::from(id),
        }
    }
}

/// JSON-RPC response envelope.
///
/// Exactly one of `result` and `error` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Protocol version, always `"2.0"`.
    pub jsonrpc: String,
    /// Successful result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Failure description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    /// Identifier of the request being answered.
    #[serde(default)]
    pub id: Value,
}

impl RpcResponse {
    /// Builds a success response.
    #[must_use]
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Builds an error response.
    #[must_use]
    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            result: None,
            error: Some(error),
            id,
        }
    }
}

/// JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    /// Numeric error code.
    pub code: i32,
    /// Short description.
    pub message: String,
    /// Structured detail, `{"kind": ...}` for task service failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    /// Creates an error without structured data.
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Attaches structured data.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Returns the `kind` label from `data`, if any.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.data.as_ref()?.get("kind")?.as_str()
    }
}

/// Task service methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcMethod {
    /// Creates a task.
    CreateTask,
    /// Fetches a task by identifier.
    GetTask,
    /// Lists every task.
    ListTasks,
    /// Replaces the title and description of a task.
    UpdateTask,
    /// Removes a task.
    DeleteTask,
}

impl RpcMethod {
    /// Returns the wire name of the method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateTask => "CreateTask",
            Self::GetTask => "GetTask",
            Self::ListTasks => "ListTasks",
            Self::UpdateTask => "UpdateTask",
            Self::DeleteTask => "DeleteTask",
        }
    }
}

impl fmt::Display for RpcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown method name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for RpcMethod {
    type Err = UnknownMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "CreateTask" => Ok(Self::CreateTask),
            "GetTask" => Ok(Self::GetTask),
            "ListTasks" => Ok(Self::ListTasks),
            "UpdateTask" => Ok(Self::UpdateTask),
            "DeleteTask" => Ok(Self::DeleteTask),
            other => Err(UnknownMethod(other.to_owned())),
        }
    }
}
