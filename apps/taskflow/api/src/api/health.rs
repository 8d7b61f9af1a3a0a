//! Readiness check against the task and category stores.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use domain_categories::CategoryRepository;
use domain_tasks::TaskRepository;

use crate::state::AppState;

/// Lists both stores concurrently; 503 if either cannot be read.
pub async fn ready_handler<T, C>(State(state): State<AppState<T, C>>) -> Response
where
    T: TaskRepository,
    C: CategoryRepository,
{
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
        (
            "task_store",
            Box::pin(async {
                state
                    .tasks
                    .list_tasks()
                    .await
                    .map(|_| ())
                    .map_err(|e| format!("Task store check failed: {}", e))
            }),
        ),
        (
            "category_store",
            Box::pin(async {
                state
                    .categories
                    .list_categories()
                    .await
                    .map(|_| ())
                    .map_err(|e| format!("Category store check failed: {}", e))
            }),
        ),
    ];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ready_router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use domain_categories::InMemoryCategoryRepository;
    use domain_tasks::InMemoryTaskRepository;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_ready_with_in_memory_stores() {
        let state = AppState::new(
            InMemoryTaskRepository::new(),
            InMemoryCategoryRepository::new(),
        );

        let response = ready_router(state)
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ready");
        assert_eq!(body["task_store"], "connected");
        assert_eq!(body["category_store"], "connected");
    }
}
