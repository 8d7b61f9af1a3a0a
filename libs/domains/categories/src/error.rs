use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use record_store::{RecordFailure, RecordId, RecordStoreError};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Category not found: {0}")]
    NotFound(RecordId),

    #[error("Category with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Category rejected by the store: {} record(s) failed", .0.len())]
    Rejected(Vec<RecordFailure>),

    #[error("Category store error: {0}")]
    Store(String),

    #[error("Category store unreachable: {0}")]
    Transport(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CategoryResult<T> = Result<T, CategoryError>;

impl From<RecordStoreError> for CategoryError {
    fn from(err: RecordStoreError) -> Self {
        match err {
            RecordStoreError::RecordFailures(failures) => CategoryError::Rejected(failures),
            RecordStoreError::Transport(msg) => CategoryError::Transport(msg),
            RecordStoreError::Config(msg) => CategoryError::Internal(msg),
            other => CategoryError::Store(other.to_string()),
        }
    }
}

/// Convert CategoryError to AppError for standardized error responses
impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(id) => {
                AppError::NotFound(format!("Category {} not found", id))
            }
            CategoryError::DuplicateName(name) => {
                AppError::Conflict(format!("Category '{}' already exists", name))
            }
            CategoryError::Validation(errors) => AppError::ValidationError(errors),
            CategoryError::Rejected(failures) => {
                let message = failures
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" | ");
                AppError::RecordRejected {
                    message: format!("Category rejected by the store: {}", message),
                    details: serde_json::to_value(&failures).unwrap_or_default(),
                }
            }
            CategoryError::Store(msg) => AppError::BadGateway(msg),
            CategoryError::Transport(msg) => AppError::ServiceUnavailable(msg),
            CategoryError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CategoryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_duplicate_name_is_409() {
        let response = CategoryError::DuplicateName("Work".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_missing_results_is_a_store_error() {
        let err: CategoryError = RecordStoreError::MissingResults.into();
        assert!(matches!(err, CategoryError::Store(_)));
    }
}
