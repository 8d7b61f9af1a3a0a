pub mod codes;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response body.
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Task 42 not found",
///   "details": null
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured details (field errors, per-record failures)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Application error type that renders as an [`ErrorResponse`].
///
/// Domain errors convert into this so every endpoint answers with the same
/// shape and status mapping.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The record store refused specific records; `details` lists them
    #[error("Unprocessable Entity: {message}")]
    RecordRejected {
        message: String,
        details: serde_json::Value,
    },

    #[error("Bad Gateway: {0}")]
    BadGateway(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    fn parts(self) -> (StatusCode, ErrorResponse) {
        match self {
            AppError::JsonExtractorRejection(e) => {
                let code = ErrorCode::JsonExtraction;
                tracing::warn!(error_code = code.code(), "JSON extraction error: {:?}", e);
                (e.status(), ErrorResponse::new(code, e.body_text()))
            }
            AppError::ValidationError(e) => {
                let code = ErrorCode::ValidationError;
                tracing::info!(error_code = code.code(), "Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(code, code.default_message())
                        .with_details(field_error_details(&e)),
                )
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(ErrorCode::ValidationError, msg),
                )
            }
            AppError::NotFound(msg) => {
                let code = ErrorCode::NotFound;
                tracing::info!(error_code = code.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, ErrorResponse::new(code, msg))
            }
            AppError::Conflict(msg) => {
                tracing::info!("Conflict: {}", msg);
                (StatusCode::CONFLICT, ErrorResponse::new(ErrorCode::Conflict, msg))
            }
            AppError::RecordRejected { message, details } => {
                let code = ErrorCode::RecordRejected;
                tracing::warn!(error_code = code.code(), "Record rejected: {}", message);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    ErrorResponse::new(code, message).with_details(details),
                )
            }
            AppError::BadGateway(msg) => {
                let code = ErrorCode::RecordStoreFailure;
                tracing::error!(error_code = code.code(), "Record store failure: {}", msg);
                (StatusCode::BAD_GATEWAY, ErrorResponse::new(code, msg))
            }
            AppError::ServiceUnavailable(msg) => {
                let code = ErrorCode::RecordStoreUnavailable;
                tracing::warn!(error_code = code.code(), "Service unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, ErrorResponse::new(code, msg))
            }
            AppError::InternalServerError(msg) => {
                let code = ErrorCode::InternalError;
                tracing::error!(error_code = code.code(), "Internal server error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(code, msg))
            }
        }
    }
}

/// Renders validator errors as `{ field: [{ code, message, params }] }`.
pub fn field_error_details(errors: &ValidationErrors) -> serde_json::Value {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages: Vec<serde_json::Value> = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), serde_json::Value::Array(messages))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(details)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.parts();
        (status, Json(body)).into_response()
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    AppError::NotFound(ErrorCode::NotFound.default_message().to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_not_found_maps_to_404() {
        let (status, body) = AppError::NotFound("Task 7 not found".to_string()).parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "NOT_FOUND");
        assert_eq!(body.message, "Task 7 not found");
        assert!(body.details.is_none());
    }

    #[test]
    fn test_record_rejected_keeps_details() {
        let (status, body) = AppError::RecordRejected {
            message: "1 record(s) failed".to_string(),
            details: json!([{"index": 0, "errors": []}]),
        }
        .parts();

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.code, 2001);
        assert_eq!(body.details, Some(json!([{"index": 0, "errors": []}])));
    }

    #[test]
    fn test_store_failures_map_to_gateway_statuses() {
        let (bad_gateway, _) = AppError::BadGateway("refused".to_string()).parts();
        let (unavailable, _) = AppError::ServiceUnavailable("timeout".to_string()).parts();

        assert_eq!(bad_gateway, StatusCode::BAD_GATEWAY);
        assert_eq!(unavailable, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_validation_details_are_keyed_by_field() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "title",
            validator::ValidationError::new("length").with_message("Title is required".into()),
        );

        let (status, body) = AppError::ValidationError(errors).parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let details = body.details.unwrap();
        assert_eq!(details["title"][0]["code"], json!("length"));
        assert_eq!(details["title"][0]["message"], json!("Title is required"));
    }

    #[test]
    fn test_error_response_skips_empty_details() {
        let body = ErrorResponse::new(ErrorCode::Conflict, "Category 'Work' already exists");
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("details").is_none());
        assert_eq!(value["code"], json!(1008));
    }
}
