use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_helpers::ValidatedJson;
use record_store::RecordId;
use std::sync::Arc;

use crate::error::CategoryResult;
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

/// List all categories
#[utoipa::path(
    get,
    path = "",
    tag = "categories",
    responses(
        (status = 200, description = "Categories ordered by name", body = Vec<Category>),
        (status = 503, response = axum_helpers::errors::responses::ServiceUnavailableResponse)
    )
)]
pub async fn list_categories<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
) -> CategoryResult<Json<Vec<Category>>> {
    let categories = service.list_categories().await?;
    Ok(Json(categories))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "categories",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category found", body = Category),
        (status = 404, response = axum_helpers::errors::responses::NotFoundResponse)
    )
)]
pub async fn get_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Path(id): Path<String>,
) -> CategoryResult<impl IntoResponse> {
    let category = service.get_category(&RecordId::from(id)).await?;
    Ok(Json(category))
}

/// Create a new category
#[utoipa::path(
    post,
    path = "",
    tag = "categories",
    request_body = CreateCategory,
    responses(
        (status = 201, description = "Category created successfully", body = Category),
        (status = 400, response = axum_helpers::errors::responses::BadRequestValidationResponse),
        (status = 409, response = axum_helpers::errors::responses::ConflictResponse),
        (status = 422, response = axum_helpers::errors::responses::RecordRejectedResponse)
    )
)]
pub async fn create_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> CategoryResult<impl IntoResponse> {
    let category = service.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Update the supplied fields of a category
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "categories",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Category updated successfully", body = Category),
        (status = 400, response = axum_helpers::errors::responses::BadRequestValidationResponse),
        (status = 404, response = axum_helpers::errors::responses::NotFoundResponse),
        (status = 409, response = axum_helpers::errors::responses::ConflictResponse)
    )
)]
pub async fn update_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> CategoryResult<impl IntoResponse> {
    let category = service.update_category(&RecordId::from(id), input).await?;
    Ok(Json(category))
}

/// Delete a category
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "categories",
    params(
        ("id" = String, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category deleted successfully"),
        (status = 404, response = axum_helpers::errors::responses::NotFoundResponse)
    )
)]
pub async fn delete_category<R: CategoryRepository>(
    State(service): State<Arc<CategoryService<R>>>,
    Path(id): Path<String>,
) -> CategoryResult<impl IntoResponse> {
    service.delete_category(&RecordId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
