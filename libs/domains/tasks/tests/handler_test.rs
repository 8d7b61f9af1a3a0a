//! Handler tests for the Tasks domain
//!
//! These drive the tasks router over an in-memory repository:
//! - Request deserialization (JSON and query strings)
//! - Response serialization
//! - HTTP status codes and error bodies

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use domain_tasks::*;
use http_body_util::BodyExt;
use record_store::RecordId;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn task(id: &str, title: &str, category: &str, completed: bool, minute: u32) -> Task {
    let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 9, minute, 0).unwrap();
    Task {
        id: RecordId::from(id),
        title: title.to_string(),
        completed,
        priority: TaskPriority::Medium,
        category: category.to_string(),
        due_date: None,
        created_at,
        completed_at: completed.then_some(created_at),
    }
}

fn app() -> Router {
    let repo = InMemoryTaskRepository::with_tasks([
        task("1", "Write report", "Work", false, 1),
        task("2", "Buy milk", "Shopping", false, 2),
        task("3", "Dentist", "Health", true, 3),
        task("4", "Plan sprint", "Work", true, 4),
    ]);
    handlers::router(TaskService::new(repo))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_create_task_returns_201_pending() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({"title": "Buy milk", "priority": "low", "dueDate": "2024-05-10"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let task: Value = json_body(response.into_body()).await;
    assert_eq!(task["title"], "Buy milk");
    assert_eq!(task["priority"], "low");
    assert_eq!(task["dueDate"], "2024-05-10");
    assert_eq!(task["completed"], false);
    assert_eq!(task["completedAt"], Value::Null);
    assert_eq!(task["category"], "");
}

#[tokio::test]
async fn test_create_task_ignores_completed_flag() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({"title": "Sneaky", "completed": true, "completedAt": "2024-01-01T00:00:00Z"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let task: Task = json_body(response.into_body()).await;
    assert!(!task.completed);
    assert!(task.completed_at.is_none());
}

#[tokio::test]
async fn test_create_task_validates_title() {
    let response = app()
        .oneshot(json_request("POST", "/", json!({"title": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["title"].is_array());
}

#[tokio::test]
async fn test_list_tasks_filters_compose() {
    let response = app()
        .oneshot(get("/?category=Work&completion=pending"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let tasks: Vec<Task> = json_body(response.into_body()).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Write report");
}

#[tokio::test]
async fn test_list_tasks_newest_first() {
    let response = app().oneshot(get("/?category=all")).await.unwrap();

    let tasks: Vec<Task> = json_body(response.into_body()).await;
    let ids: Vec<_> = tasks.iter().map(|t| t.id.as_str().to_string()).collect();
    assert_eq!(ids, vec!["4", "3", "2", "1"]);
}

#[tokio::test]
async fn test_unknown_category_is_empty_not_error() {
    let response = app().oneshot(get("/?category=Gardening")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let tasks: Vec<Task> = json_body(response.into_body()).await;
    assert!(tasks.is_empty());
}

#[tokio::test]
async fn test_toggle_completes_and_reopens() {
    let app = app();

    let response = app
        .clone()
        .oneshot(Request::builder().method("POST").uri("/1/toggle").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let task: Task = json_body(response.into_body()).await;
    assert!(task.completed);
    assert!(task.completed_at.is_some());

    let response = app
        .oneshot(Request::builder().method("POST").uri("/1/toggle").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let task: Task = json_body(response.into_body()).await;
    assert!(!task.completed);
    assert!(task.completed_at.is_none());
}

#[tokio::test]
async fn test_patch_updates_only_supplied_fields() {
    let response = app()
        .oneshot(json_request("PATCH", "/2", json!({"priority": "high"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let task: Task = json_body(response.into_body()).await;
    assert_eq!(task.priority, TaskPriority::High);
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.category, "Shopping");
}

#[tokio::test]
async fn test_patch_missing_task_returns_404() {
    let response = app()
        .oneshot(json_request("PATCH", "/999", json!({"completed": true})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_delete_task_then_get_is_404() {
    let app = app();

    let response = app
        .clone()
        .oneshot(Request::builder().method("DELETE").uri("/3").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.oneshot(get("/3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_task_returns_404() {
    let response = app()
        .oneshot(Request::builder().method("DELETE").uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stats_cover_all_tasks() {
    let response = app().oneshot(get("/stats")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let stats: Value = json_body(response.into_body()).await;
    assert_eq!(stats["total"], 4);
    assert_eq!(stats["completed"], 2);
    assert_eq!(stats["percent"], 50);
}

#[tokio::test]
async fn test_recent_returns_newest_pending() {
    let response = app().oneshot(get("/recent?limit=1")).await.unwrap();

    let tasks: Vec<Task> = json_body(response.into_body()).await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Buy milk");
}
