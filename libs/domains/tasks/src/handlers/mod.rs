mod api;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::classification::{CompletionFilter, CompletionStats};
use crate::models::{CreateTask, Task, TaskPriority, UpdateTask};
use crate::repository::TaskRepository;
use crate::service::TaskService;

pub use api::RecentQuery;

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::list_tasks,
        api::recent_tasks,
        api::task_stats,
        api::get_task,
        api::create_task,
        api::update_task,
        api::toggle_task,
        api::delete_task,
    ),
    components(
        schemas(Task, CreateTask, UpdateTask, TaskPriority, CompletionFilter, CompletionStats),
        responses(
            axum_helpers::errors::responses::BadRequestValidationResponse,
            axum_helpers::errors::responses::NotFoundResponse,
            axum_helpers::errors::responses::RecordRejectedResponse,
            axum_helpers::errors::responses::ServiceUnavailableResponse,
        )
    ),
    tags(
        (name = "tasks", description = "Task management")
    )
)]
pub struct ApiDoc;

/// Create the tasks router; mount it under `/tasks`
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(api::list_tasks).post(api::create_task))
        .route("/recent", get(api::recent_tasks))
        .route("/stats", get(api::task_stats))
        .route(
            "/{id}",
            get(api::get_task)
                .patch(api::update_task)
                .delete(api::delete_task),
        )
        .route("/{id}/toggle", post(api::toggle_task))
        .with_state(shared_service)
}
