//! JSON-RPC server exposing [`TaskService`] over `POST /rpc`.

use super::messages::{
    CreateTaskParams, DeleteTaskResult, TaskIdParams, TaskListResult, TaskMessage, TaskResult,
    UpdateTaskParams,
};
use super::protocol::{
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION, METHOD_NOT_FOUND,
    PARSE_ERROR, RpcError, RpcMethod, RpcRequest, RpcResponse, TASK_NOT_FOUND,
};
use crate::server::health_check;
use crate::task::{
    ports::TaskRepository,
    services::{TaskService, TaskServiceError, TaskServiceErrorKind},
};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{get, post},
};
use mockable::Clock;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::{debug, warn};

/// Builds the task service router: `POST /rpc` and `GET /health`.
#[must_use]
pub fn router<R, C>(service: TaskService<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/rpc", post(handle_rpc::<R, C>))
        .route("/health", get(health_check))
        .with_state(service)
}

async fn handle_rpc<R, C>(
    State(service): State<TaskService<R, C>>,
    body: Bytes,
) -> Json<RpcResponse>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Json(dispatch(&service, &body).await)
}

/// Decodes one JSON-RPC request body, invokes the service and encodes the
/// response.
///
/// Protocol failures are reported in the returned envelope; this never
/// fails at the HTTP level.
pub async fn dispatch<R, C>(service: &TaskService<R, C>, body: &[u8]) -> RpcResponse
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(err) => {
            return RpcResponse::failure(
                Value::Null,
                RpcError::new(PARSE_ERROR, format!("parse error: {err}")),
            );
        }
    };

    let request: RpcRequest = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(err) => {
            return RpcResponse::failure(
                Value::Null,
                RpcError::new(INVALID_REQUEST, format!("invalid request: {err}")),
            );
        }
    };

    let RpcRequest {
        jsonrpc,
        method,
        params,
        id,
    } = request;

    if jsonrpc != JSONRPC_VERSION {
        return RpcResponse::failure(
            id,
            RpcError::new(INVALID_REQUEST, format!("unsupported jsonrpc version: {jsonrpc}")),
        );
    }

    let method = match method.parse::<RpcMethod>() {
        Ok(method) => method,
        Err(err) => return RpcResponse::failure(id, RpcError::new(METHOD_NOT_FOUND, err.to_string())),
    };

    debug!(%method, "dispatching rpc call");
    match invoke(service, method, params).await {
        Ok(result) => RpcResponse::success(id, result),
        Err(error) => {
            if error.code == INTERNAL_ERROR {
                warn!(%method, message = %error.message, "rpc call failed");
            }
            RpcResponse::failure(id, error)
        }
    }
}

async fn invoke<R, C>(
    service: &TaskService<R, C>,
    method: RpcMethod,
    params: Option<Value>,
) -> Result<Value, RpcError>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    match method {
        RpcMethod::CreateTask => {
            let params: CreateTaskParams = decode_params(params)?;
            let task = service
                .create_task(&params.title, &params.description)
                .await?;
            encode(&TaskResult {
                task: TaskMessage::from(&task),
            })
        }
        RpcMethod::GetTask => {
            let params: TaskIdParams = decode_params(params)?;
            let task = service.get_task(&params.id).await?;
            encode(&TaskResult {
                task: TaskMessage::from(&task),
            })
        }
        RpcMethod::ListTasks => {
            let tasks = service.list_tasks().await?;
            encode(&TaskListResult {
                tasks: tasks.iter().map(TaskMessage::from).collect(),
            })
        }
        RpcMethod::UpdateTask => {
            let params: UpdateTaskParams = decode_params(params)?;
            let task = service
                .update_task(&params.id, &params.title, &params.description)
                .await?;
            encode(&TaskResult {
                task: TaskMessage::from(&task),
            })
        }
        RpcMethod::DeleteTask => {
            let params: TaskIdParams = decode_params(params)?;
            let success = service.delete_task(&params.id).await?;
            encode(&DeleteTaskResult { success })
        }
    }
}

fn decode_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, RpcError> {
    let value = params.unwrap_or_else(|| json!({}));
    serde_json::from_value(value).map_err(|err| {
        RpcError::new(INVALID_PARAMS, format!("invalid params: {err}"))
            .with_data(json!({"kind": TaskServiceErrorKind::InvalidArgument.as_str()}))
    })
}

fn encode<T: Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|err| RpcError::new(INTERNAL_ERROR, err.to_string()))
}

impl From<TaskServiceError> for RpcError {
    fn from(err: TaskServiceError) -> Self {
        let code = match err.kind() {
            TaskServiceErrorKind::InvalidArgument => INVALID_PARAMS,
            TaskServiceErrorKind::NotFound => TASK_NOT_FOUND,
            TaskServiceErrorKind::Storage => INTERNAL_ERROR,
        };
        Self::new(code, err.to_string()).with_data(json!({"kind": err.kind().as_str()}))
    }
}
