//! Gateway request handlers.

use super::GatewayState;
use super::dto::{MessageResponse, TaskListResponse, TaskRequest, TaskResponse};
use super::error::{ApiError, Operation};
use crate::rpc::{RpcClientError, RpcClientResult};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Awaits `call`, abandoning it once `deadline` elapses.
async fn with_deadline<T>(
    deadline: Duration,
    call: impl Future<Output = RpcClientResult<T>>,
) -> RpcClientResult<T> {
    tokio::time::timeout(deadline, call)
        .await
        .map_err(|_| RpcClientError::deadline_exceeded(deadline))?
}

fn rpc_failure(operation: Operation, err: &RpcClientError) -> ApiError {
    warn!(?operation, kind = ?err.kind(), error = %err, "task service call failed");
    ApiError::from_rpc(operation, err)
}

pub(super) async fn list_tasks(
    State(state): State<GatewayState>,
) -> Result<Json<TaskListResponse>, ApiError> {
    let tasks = with_deadline(state.timeouts.list, state.client.list_tasks(state.timeouts.list))
        .await
        .map_err(|err| rpc_failure(Operation::List, &err))?;
    Ok(Json(TaskListResponse {
        tasks: tasks.into_iter().map(TaskResponse::from).collect(),
    }))
}

pub(super) async fn create_task(
    State(state): State<GatewayState>,
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::invalid_payload(&rejection))?;
    let deadline = state.timeouts.call;
    let task = with_deadline(
        deadline,
        state
            .client
            .create_task(request.title, request.description, deadline),
    )
    .await
    .map_err(|err| rpc_failure(Operation::Create, &err))?;
    Ok((StatusCode::CREATED, Json(task.into())))
}

pub(super) async fn get_task(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<TaskResponse>, ApiError> {
    let deadline = state.timeouts.call;
    let task = with_deadline(deadline, state.client.get_task(id, deadline))
        .await
        .map_err(|err| rpc_failure(Operation::Get, &err))?;
    Ok(Json(task.into()))
}

pub(super) async fn update_task(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::invalid_payload(&rejection))?;
    let deadline = state.timeouts.call;
    let task = with_deadline(
        deadline,
        state
            .client
            .update_task(id, request.title, request.description, deadline),
    )
    .await
    .map_err(|err| rpc_failure(Operation::Update, &err))?;
    Ok(Json(task.into()))
}

pub(super) async fn delete_task(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let deadline = state.timeouts.call;
    with_deadline(deadline, state.client.delete_task(id, deadline))
        .await
        .map_err(|err| rpc_failure(Operation::Delete, &err))?;
    Ok((
        StatusCode::NO_CONTENT,
        Json(MessageResponse {
            message: "Task deleted successfully".to_owned(),
        }),
    ))
}
