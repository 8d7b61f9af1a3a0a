//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Request validation failed",
        "details": {
            "title": [{
                "code": "length",
                "message": null,
                "params": {"min": 1, "max": 255, "value": ""}
            }]
        }
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "error": "NOT_FOUND",
        "message": "Task 42 not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Resource already exists",
    content_type = "application/json",
    example = json!({
        "code": 1008,
        "error": "CONFLICT",
        "message": "Category 'Work' already exists"
    })
)]
pub struct ConflictResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Record store rejected one or more records",
    content_type = "application/json",
    example = json!({
        "code": 2001,
        "error": "RECORD_REJECTED",
        "message": "1 record(s) failed: record 0; Title: is required",
        "details": [{
            "index": 0,
            "errors": [{"fieldLabel": "Title", "message": "is required"}]
        }]
    })
)]
pub struct RecordRejectedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Record store refused the request",
    content_type = "application/json",
    example = json!({
        "code": 2002,
        "error": "RECORD_STORE_FAILURE",
        "message": "Invalid public key"
    })
)]
pub struct BadGatewayResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Record store unreachable",
    content_type = "application/json",
    example = json!({
        "code": 2003,
        "error": "RECORD_STORE_UNAVAILABLE",
        "message": "Transport error: connection refused"
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 1005,
        "error": "INTERNAL_ERROR",
        "message": "An unexpected error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
