//! Client port for the task service and its HTTP JSON-RPC implementation.

use super::messages::{
    CreateTaskParams, DeleteTaskResult, TaskIdParams, TaskListResult, TaskMessage, TaskResult,
    UpdateTaskParams,
};
use super::protocol::{
    INVALID_PARAMS, RpcError, RpcMethod, RpcRequest, RpcResponse, TASK_NOT_FOUND,
};
use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Classification of failed task service calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RpcErrorKind {
    /// The service rejected the input.
    InvalidArgument,
    /// The task does not exist.
    NotFound,
    /// The service could not be reached or the deadline elapsed.
    Unavailable,
    /// Any other failure, including storage errors.
    Internal,
}

impl fmt::Display for RpcErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidArgument => "invalid argument",
            Self::NotFound => "not found",
            Self::Unavailable => "unavailable",
            Self::Internal => "internal",
        };
        f.write_str(label)
    }
}

/// Error returned by [`TaskServiceClient`] calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct RpcClientError {
    kind: RpcErrorKind,
    message: String,
}

impl RpcClientError {
    /// Creates a client error.
    #[must_use]
    pub fn new(kind: RpcErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an [`RpcErrorKind::Unavailable`] error for an elapsed deadline.
    #[must_use]
    pub fn deadline_exceeded(deadline: Duration) -> Self {
        Self::new(
            RpcErrorKind::Unavailable,
            format!("deadline of {}ms exceeded", deadline.as_millis()),
        )
    }

    /// Returns the error classification.
    #[must_use]
    pub const fn kind(&self) -> RpcErrorKind {
        self.kind
    }

    /// Returns the raw diagnostic message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<RpcError> for RpcClientError {
    fn from(error: RpcError) -> Self {
        let kind = match (error.code, error.kind()) {
            (_, Some("invalid_argument")) | (INVALID_PARAMS, None) => RpcErrorKind::InvalidArgument,
            (_, Some("not_found")) | (TASK_NOT_FOUND, None) => RpcErrorKind::NotFound,
            _ => RpcErrorKind::Internal,
        };
        Self::new(kind, error.message)
    }
}

impl From<reqwest::Error> for RpcClientError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() || err.is_connect() || err.is_request() {
            RpcErrorKind::Unavailable
        } else {
            RpcErrorKind::Internal
        };
        Self::new(kind, err.to_string())
    }
}

/// Result type for task service client calls.
pub type RpcClientResult<T> = Result<T, RpcClientError>;

/// Port through which the gateway reaches the task service.
///
/// Every call is bounded by `deadline`; an elapsed deadline yields
/// [`RpcErrorKind::Unavailable`].
#[async_trait]
pub trait TaskServiceClient: Send + Sync {
    /// Creates a task.
    async fn create_task(
        &self,
        title: String,
        description: String,
        deadline: Duration,
    ) -> RpcClientResult<TaskMessage>;

    /// Fetches a task.
    async fn get_task(&self, id: String, deadline: Duration) -> RpcClientResult<TaskMessage>;

    /// Lists every task.
    async fn list_tasks(&self, deadline: Duration) -> RpcClientResult<Vec<TaskMessage>>;

    /// Replaces a task's title and description.
    async fn update_task(
        &self,
        id: String,
        title: String,
        description: String,
        deadline: Duration,
    ) -> RpcClientResult<TaskMessage>;

    /// Deletes a task, returning the service's success flag.
    async fn delete_task(&self, id: String, deadline: Duration) -> RpcClientResult<bool>;
}

/// [`TaskServiceClient`] speaking JSON-RPC over HTTP.
#[derive(Debug)]
pub struct HttpTaskServiceClient {
    client: reqwest::Client,
    endpoint: String,
    request_id: AtomicU64,
}

impl HttpTaskServiceClient {
    /// Creates a client for the service at `base_url` (e.g.
    /// `http://127.0.0.1:50051`).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/rpc", base_url.trim_end_matches('/')),
            request_id: AtomicU64::new(1),
        }
    }

    /// Returns the RPC endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn next_id(&self) -> u64 {
        self.request_id.fetch_add(1, Ordering::Relaxed)
    }

    async fn call<P, T>(&self, method: RpcMethod, params: &P, deadline: Duration) -> RpcClientResult<T>
    where
        P: Serialize + Sync,
        T: DeserializeOwned,
    {
        let params = serde_json::to_value(params)
            .map_err(|err| RpcClientError::new(RpcErrorKind::Internal, err.to_string()))?;
        let request = RpcRequest::new(method, params, self.next_id());
        debug!(%method, id = %request.id, "sending rpc request");

        // The request timeout spans connecting through reading the body.
        let envelope: RpcResponse = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .timeout(deadline)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = envelope.error {
            return Err(error.into());
        }
        let result = envelope.result.ok_or_else(|| {
            RpcClientError::new(RpcErrorKind::Internal, "response carried neither result nor error")
        })?;
        serde_json::from_value(result)
            .map_err(|err| RpcClientError::new(RpcErrorKind::Internal, err.to_string()))
    }
}

#[async_trait]
impl TaskServiceClient for HttpTaskServiceClient {
    async fn create_task(
        &self,
        title: String,
        description: String,
        deadline: Duration,
    ) -> RpcClientResult<TaskMessage> {
        let params = CreateTaskParams { title, description };
        let result: TaskResult = self.call(RpcMethod::CreateTask, &params, deadline).await?;
        Ok(result.task)
    }

    async fn get_task(&self, id: String, deadline: Duration) -> RpcClientResult<TaskMessage> {
        let result: TaskResult = self
            .call(RpcMethod::GetTask, &TaskIdParams { id }, deadline)
            .await?;
        Ok(result.task)
    }

    async fn list_tasks(&self, deadline: Duration) -> RpcClientResult<Vec<TaskMessage>> {
        let result: TaskListResult = self
            .call(RpcMethod::ListTasks, &serde_json::json!({}), deadline)
            .await?;
        Ok(result.tasks)
    }

    async fn update_task(
        &self,
        id: String,
        title: String,
        description: String,
        deadline: Duration,
    ) -> RpcClientResult<TaskMessage> {
        let params = UpdateTaskParams {
            id,
            title,
            description,
        };
        let result: TaskResult = self.call(RpcMethod::UpdateTask, &params, deadline).await?;
        Ok(result.task)
    }

    async fn delete_task(&self, id: String, deadline: Duration) -> RpcClientResult<bool> {
        let result: DeleteTaskResult = self
            .call(RpcMethod::DeleteTask, &TaskIdParams { id }, deadline)
            .await?;
        Ok(result.success)
    }
}
