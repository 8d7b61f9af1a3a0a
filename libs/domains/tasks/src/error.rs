use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use record_store::{RecordFailure, RecordId, RecordStoreError};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(RecordId),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    /// The store refused individual records, with per-field messages
    #[error("Task rejected by the store: {}", summarize(.0))]
    Rejected(Vec<RecordFailure>),

    /// The store answered but refused or garbled the request as a whole
    #[error("Task store error: {0}")]
    Store(String),

    /// The round trip to the store did not complete
    #[error("Task store unreachable: {0}")]
    Transport(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

fn summarize(failures: &[RecordFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

impl From<RecordStoreError> for TaskError {
    fn from(err: RecordStoreError) -> Self {
        match err {
            RecordStoreError::RecordFailures(failures) => TaskError::Rejected(failures),
            RecordStoreError::Transport(msg) => TaskError::Transport(msg),
            RecordStoreError::Config(msg) => TaskError::Internal(msg),
            other @ (RecordStoreError::Rejected(_)
            | RecordStoreError::MissingResults
            | RecordStoreError::Decode(_)) => TaskError::Store(other.to_string()),
        }
    }
}

/// Convert TaskError to AppError for standardized error responses
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(id) => AppError::NotFound(format!("Task {} not found", id)),
            TaskError::Validation(errors) => AppError::ValidationError(errors),
            TaskError::Rejected(failures) => AppError::RecordRejected {
                message: format!("Task rejected by the store: {}", summarize(&failures)),
                details: serde_json::to_value(&failures).unwrap_or_default(),
            },
            TaskError::Store(msg) => AppError::BadGateway(msg),
            TaskError::Transport(msg) => AppError::ServiceUnavailable(msg),
            TaskError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use record_store::FieldError;

    #[test]
    fn test_store_transport_failure_is_503() {
        let err: TaskError = RecordStoreError::Transport("connection refused".to_string()).into();
        assert!(matches!(err, TaskError::Transport(_)));
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_record_failures_become_422_with_details() {
        let err: TaskError = RecordStoreError::RecordFailures(vec![RecordFailure {
            index: 0,
            message: None,
            errors: vec![FieldError {
                field_label: "title".to_string(),
                message: "is required".to_string(),
            }],
        }])
        .into();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_transport_is_503() {
        let err: TaskError = RecordStoreError::Transport("connection refused".to_string()).into();
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_store_refusal_is_502() {
        let err: TaskError = RecordStoreError::Rejected("Invalid public key".to_string()).into();
        assert!(err.to_string().contains("Invalid public key"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
