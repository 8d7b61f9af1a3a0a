//! Dashboard view: tasks grouped by due date, decorated for display.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use axum_helpers::AppError;
use chrono::{Local, NaiveDate};
use domain_categories::{Category, CategoryRepository, category_color};
use domain_tasks::{CompletionStats, Task, TaskBoard, TaskOverview, TaskQuery, TaskRepository, is_overdue};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::state::AppState;

/// A task with the display attributes the board needs
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoardTask {
    #[serde(flatten)]
    pub task: Task,
    pub category_color: String,
    pub priority_weight: u8,
    pub overdue: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BoardResponse {
    pub board: TaskBoard<BoardTask>,
    /// Over every task, regardless of filters
    pub stats: CompletionStats,
    pub categories: Vec<Category>,
}

impl BoardResponse {
    pub fn build(overview: TaskOverview, categories: Vec<Category>, today: NaiveDate) -> Self {
        let board = overview.board.map(|task| BoardTask {
            category_color: category_color(&categories, &task.category).to_string(),
            priority_weight: task.priority.weight(),
            overdue: is_overdue(&task, today),
            task,
        });

        Self {
            board,
            stats: overview.stats,
            categories,
        }
    }
}

/// Filtered tasks grouped into overdue, today, tomorrow and other
#[utoipa::path(
    get,
    path = "",
    tag = "board",
    params(TaskQuery),
    responses(
        (status = 200, description = "Task board with statistics and categories", body = BoardResponse),
        (status = 502, response = axum_helpers::errors::responses::BadGatewayResponse),
        (status = 503, response = axum_helpers::errors::responses::ServiceUnavailableResponse)
    )
)]
pub async fn get_board<T, C>(
    State(state): State<AppState<T, C>>,
    Query(query): Query<TaskQuery>,
) -> Result<Json<BoardResponse>, AppError>
where
    T: TaskRepository,
    C: CategoryRepository,
{
    let today = Local::now().date_naive();

    let (overview, categories) = tokio::try_join!(
        async { state.tasks.board(&query, today).await.map_err(AppError::from) },
        async {
            state
                .categories
                .list_categories()
                .await
                .map_err(AppError::from)
        },
    )?;

    Ok(Json(BoardResponse::build(overview, categories, today)))
}

#[derive(OpenApi)]
#[openapi(
    paths(get_board),
    components(
        schemas(BoardTask, BoardResponse),
        responses(
            axum_helpers::errors::responses::BadGatewayResponse,
            axum_helpers::errors::responses::ServiceUnavailableResponse,
        )
    ),
    tags(
        (name = "board", description = "Tasks grouped by due date")
    )
)]
pub struct BoardApiDoc;

/// Mount under `/board`
pub fn router<T, C>(state: AppState<T, C>) -> Router
where
    T: TaskRepository + 'static,
    C: CategoryRepository + 'static,
{
    Router::new()
        .route("/", get(get_board::<T, C>))
        .with_state(state)
}
