//! Gateway error type and the RPC-kind to HTTP-status mapping.

use super::dto::ErrorResponse;
use crate::rpc::{RpcClientError, RpcErrorKind};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Gateway operation, used to pick the status code and short message of a
/// failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `GET /tasks`
    List,
    /// `POST /tasks`
    Create,
    /// `GET /tasks/{id}`
    Get,
    /// `PUT /tasks/{id}`
    Update,
    /// `DELETE /tasks/{id}`
    Delete,
}

impl Operation {
    const fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Failed to list tasks",
            Self::Create => "Failed to create task",
            Self::Get => "Failed to get task",
            Self::Update => "Internal Server Error. Failed to update task",
            Self::Delete => "Internal Server Error. Failed to delete task",
        }
    }

    /// Status code for a failed call of this operation.
    ///
    /// `GET /tasks/{id}` reports every failure as 404, including a malformed
    /// identifier.
    #[must_use]
    pub const fn status_for(self, kind: RpcErrorKind) -> StatusCode {
        match (self, kind) {
            (Self::Get, _) | (_, RpcErrorKind::NotFound) => StatusCode::NOT_FOUND,
            (_, RpcErrorKind::InvalidArgument) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

const INVALID_PAYLOAD: &str = "Invalid request payload. Please review the request body and try again";
const INVALID_ARGUMENT: &str = "Invalid task input";
const NOT_FOUND: &str = "Task not found";

/// Error returned by gateway handlers, rendered as
/// `{"error": ..., "error_message": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error}: {message}")]
pub struct ApiError {
    status: StatusCode,
    error: &'static str,
    message: String,
}

impl ApiError {
    /// Maps a failed task service call.
    #[must_use]
    pub fn from_rpc(operation: Operation, err: &RpcClientError) -> Self {
        let status = operation.status_for(err.kind());
        let error = match status {
            StatusCode::BAD_REQUEST => INVALID_ARGUMENT,
            StatusCode::NOT_FOUND => NOT_FOUND,
            _ => operation.failure_message(),
        };
        Self {
            status,
            error,
            message: err.message().to_owned(),
        }
    }

    /// Maps a request body that could not be decoded.
    #[must_use]
    pub fn invalid_payload(rejection: &JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: INVALID_PAYLOAD,
            message: rejection.body_text(),
        }
    }

    /// Returns the HTTP status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.error.to_owned(),
            error_message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
