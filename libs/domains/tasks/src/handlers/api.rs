use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_helpers::ValidatedJson;
use record_store::RecordId;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::classification::{CompletionStats, TaskQuery};
use crate::error::TaskResult;
use crate::models::{CreateTask, Task, UpdateTask};
use crate::repository::TaskRepository;
use crate::service::{DEFAULT_RECENT_LIMIT, TaskService};

/// Query parameters of the recent-tasks list
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentQuery {
    /// Maximum number of tasks, defaults to 3
    pub limit: Option<usize>,
}

/// List tasks, optionally filtered
#[utoipa::path(
    get,
    path = "",
    tag = "tasks",
    params(TaskQuery),
    responses(
        (status = 200, description = "Tasks matching every filter, newest first", body = Vec<Task>),
        (status = 400, description = "Invalid filter value"),
        (status = 503, response = axum_helpers::errors::responses::ServiceUnavailableResponse)
    )
)]
pub async fn list_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Query(query): Query<TaskQuery>,
) -> TaskResult<Json<Vec<Task>>> {
    let tasks = service.search_tasks(&query).await?;
    Ok(Json(tasks))
}

/// Newest pending tasks
#[utoipa::path(
    get,
    path = "/recent",
    tag = "tasks",
    params(RecentQuery),
    responses(
        (status = 200, description = "Newest pending tasks", body = Vec<Task>)
    )
)]
pub async fn recent_tasks<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Query(query): Query<RecentQuery>,
) -> TaskResult<Json<Vec<Task>>> {
    let tasks = service
        .recent_pending(query.limit.unwrap_or(DEFAULT_RECENT_LIMIT))
        .await?;
    Ok(Json(tasks))
}

/// Completion statistics over all tasks
#[utoipa::path(
    get,
    path = "/stats",
    tag = "tasks",
    responses(
        (status = 200, description = "Completion statistics", body = CompletionStats)
    )
)]
pub async fn task_stats<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
) -> TaskResult<Json<CompletionStats>> {
    Ok(Json(service.stats().await?))
}

/// Get a task by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task found", body = Task),
        (status = 404, response = axum_helpers::errors::responses::NotFoundResponse)
    )
)]
pub async fn get_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
) -> TaskResult<impl IntoResponse> {
    let task = service.get_task(&RecordId::from(id)).await?;
    Ok(Json(task))
}

/// Create a new task
#[utoipa::path(
    post,
    path = "",
    tag = "tasks",
    request_body = CreateTask,
    responses(
        (status = 201, description = "Task created successfully", body = Task),
        (status = 400, response = axum_helpers::errors::responses::BadRequestValidationResponse),
        (status = 422, response = axum_helpers::errors::responses::RecordRejectedResponse),
        (status = 503, response = axum_helpers::errors::responses::ServiceUnavailableResponse)
    )
)]
pub async fn create_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateTask>,
) -> TaskResult<impl IntoResponse> {
    let task = service.create_task(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Update the supplied fields of a task
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    request_body = UpdateTask,
    responses(
        (status = 200, description = "Task updated successfully", body = Task),
        (status = 400, response = axum_helpers::errors::responses::BadRequestValidationResponse),
        (status = 404, response = axum_helpers::errors::responses::NotFoundResponse),
        (status = 422, response = axum_helpers::errors::responses::RecordRejectedResponse)
    )
)]
pub async fn update_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateTask>,
) -> TaskResult<impl IntoResponse> {
    let task = service.update_task(&RecordId::from(id), input).await?;
    Ok(Json(task))
}

/// Flip the completion flag of a task
#[utoipa::path(
    post,
    path = "/{id}/toggle",
    tag = "tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task with flipped completion", body = Task),
        (status = 404, response = axum_helpers::errors::responses::NotFoundResponse)
    )
)]
pub async fn toggle_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
) -> TaskResult<impl IntoResponse> {
    let task = service.toggle_completion(&RecordId::from(id)).await?;
    Ok(Json(task))
}

/// Delete a task
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "tasks",
    params(
        ("id" = String, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted successfully"),
        (status = 404, response = axum_helpers::errors::responses::NotFoundResponse)
    )
)]
pub async fn delete_task<R: TaskRepository>(
    State(service): State<Arc<TaskService<R>>>,
    Path(id): Path<String>,
) -> TaskResult<impl IntoResponse> {
    service.delete_task(&RecordId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
