use axum::{Router, routing::get};
use domain_categories::CategoryRepository;
use domain_tasks::TaskRepository;

use crate::state::AppState;

pub mod board;
pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes<T, C>(state: &AppState<T, C>) -> Router
where
    T: TaskRepository + 'static,
    C: CategoryRepository + 'static,
{
    Router::new()
        .nest("/tasks", domain_tasks::router(state.tasks.clone()))
        .nest(
            "/categories",
            domain_categories::router(state.categories.clone()),
        )
        .nest("/board", board::router(state.clone()))
}

/// Creates a router with the /ready endpoint that checks both stores.
pub fn ready_router<T, C>(state: AppState<T, C>) -> Router
where
    T: TaskRepository + 'static,
    C: CategoryRepository + 'static,
{
    Router::new()
        .route("/ready", get(health::ready_handler::<T, C>))
        .with_state(state)
}
