mod api;

use axum::{Router, routing::get};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;
use crate::service::CategoryService;

/// OpenAPI documentation for the Categories API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::list_categories,
        api::get_category,
        api::create_category,
        api::update_category,
        api::delete_category,
    ),
    components(
        schemas(Category, CreateCategory, UpdateCategory),
        responses(
            axum_helpers::errors::responses::BadRequestValidationResponse,
            axum_helpers::errors::responses::NotFoundResponse,
            axum_helpers::errors::responses::ConflictResponse,
            axum_helpers::errors::responses::RecordRejectedResponse,
            axum_helpers::errors::responses::ServiceUnavailableResponse,
        )
    ),
    tags(
        (name = "categories", description = "Category management")
    )
)]
pub struct ApiDoc;

/// Create the categories router; mount it under `/categories`
pub fn router<R: CategoryRepository + 'static>(service: CategoryService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(api::list_categories).post(api::create_category))
        .route(
            "/{id}",
            get(api::get_category)
                .patch(api::update_category)
                .delete(api::delete_category),
        )
        .with_state(shared_service)
}
