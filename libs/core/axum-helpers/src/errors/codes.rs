//! Type-safe error codes for API responses.
//!
//! Each code has a string form for clients (e.g. "VALIDATION_ERROR"), an
//! integer form for logs and metrics (e.g. 1001) and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::RecordRejected;
//! assert_eq!(code.as_str(), "RECORD_REJECTED");
//! assert_eq!(code.code(), 2001);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Request body could not be extracted as JSON
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// Request conflicts with existing data (e.g. duplicate category name)
    Conflict,

    /// An unexpected internal server error occurred
    InternalError,

    // Record store errors (2000-2999)
    /// The record store refused one or more records
    RecordRejected,

    /// The record store answered but refused the request as a whole
    RecordStoreFailure,

    /// The round trip to the record store did not complete
    RecordStoreUnavailable,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::InternalError => "INTERNAL_ERROR",
            Self::RecordRejected => "RECORD_REJECTED",
            Self::RecordStoreFailure => "RECORD_STORE_FAILURE",
            Self::RecordStoreUnavailable => "RECORD_STORE_UNAVAILABLE",
        }
    }

    /// Integer code for structured logs:
    /// - 1000-1999: client and generic server errors
    /// - 2000-2999: record store errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Conflict => 1008,
            Self::RecordRejected => 2001,
            Self::RecordStoreFailure => 2002,
            Self::RecordStoreUnavailable => 2003,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::JsonExtraction => "Request body is not valid JSON",
            Self::NotFound => "Requested resource was not found",
            Self::Conflict => "Resource already exists",
            Self::InternalError => "An unexpected error occurred",
            Self::RecordRejected => "The record store rejected the record",
            Self::RecordStoreFailure => "The record store refused the request",
            Self::RecordStoreUnavailable => "The record store is unavailable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
