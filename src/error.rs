use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::IntoResponse,
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::{dao::storage::StorageError, dto::common::CommandResponse};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Requested match, question or player slot was not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Invalid input provided by the caller (unsupported section, malformed coordinates).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Operation conflicts with existing content.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Storage read, write or delete failed.
    #[error("storage failure")]
    Storage(#[source] StorageError),
    /// Unexpected failure inside the node.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { match_id } => {
                ServiceError::NotFound(format!("match `{match_id}` not found"))
            }
            StorageError::InvalidName { name } => {
                ServiceError::InvalidInput(format!("invalid storage name `{name}`"))
            }
            other => ServiceError::Storage(other),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(format!("validation failed: {}", err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Conflict with current state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Storage unavailable or failing.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(message) => AppError::NotFound(message),
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::Conflict(message) => AppError::Conflict(message),
            ServiceError::Storage(source) => AppError::ServiceUnavailable(render_chain(&source)),
            ServiceError::Internal(message) => AppError::Internal(message),
        }
    }
}

/// Render an error with its sources so callers see the failing path and the OS reason.
fn render_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(CommandResponse::<()>::failure(self.to_string()));

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn storage_not_found_becomes_service_not_found() {
        let err: ServiceError = StorageError::NotFound {
            match_id: "m1".into(),
        }
        .into();
        assert!(matches!(err, ServiceError::NotFound(message) if message.contains("m1")));
    }

    #[test]
    fn storage_io_failure_keeps_its_cause() {
        let err: ServiceError =
            StorageError::io("/srv/m1/match.json", io::Error::other("disk full")).into();
        let app: AppError = err.into();

        match app {
            AppError::ServiceUnavailable(message) => {
                assert!(message.contains("/srv/m1/match.json"));
                assert!(message.contains("disk full"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
