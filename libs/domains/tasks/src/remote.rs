//! Task repository backed by the hosted record store.
//!
//! The store uses its own field names (`due_date`, `completed_at`, a generic
//! `Name` next to `title`, system `CreatedOn`); translation to [`Task`] happens
//! here and nowhere else.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use record_store::{FetchParams, Record, RecordId, RecordStore};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, TaskPriority, UpdateTask, parse_due_date};
use crate::repository::TaskRepository;

pub const TASK_TABLE: &str = "task";

const TASK_FIELDS: [&str; 10] = [
    "Id",
    "Name",
    "title",
    "completed",
    "priority",
    "category",
    "due_date",
    "created_at",
    "completed_at",
    "CreatedOn",
];

fn fields() -> Vec<String> {
    TASK_FIELDS.iter().map(|f| f.to_string()).collect()
}

/// Task repository over any [`RecordStore`]
pub struct RemoteTaskRepository<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> Clone for RemoteTaskRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecordStore> RemoteTaskRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_shared(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn fetch_record(&self, id: &RecordId) -> TaskResult<Record> {
        self.store
            .get_record_by_id(TASK_TABLE, id, &fields())
            .await?
            .ok_or_else(|| TaskError::NotFound(id.clone()))
    }
}

fn text<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.and_utc())
        })
}

/// Translate a stored record into a [`Task`].
///
/// Absent fields take their documented defaults: priority medium, empty
/// category, no due date. A completed record without `completed_at` is
/// stamped with its creation time so `completed_at` is set iff completed.
pub fn task_from_record(record: Record) -> TaskResult<Task> {
    let id: RecordId = record
        .get("Id")
        .cloned()
        .and_then(|id| serde_json::from_value(id).ok())
        .ok_or_else(|| TaskError::Store("task record without Id".to_string()))?;

    let created_at = text(&record, "created_at")
        .or_else(|| text(&record, "CreatedOn"))
        .and_then(parse_timestamp)
        .ok_or_else(|| TaskError::Store(format!("task {} has no creation timestamp", id)))?;

    let completed = record
        .get("completed")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let completed_at = if completed {
        Some(
            text(&record, "completed_at")
                .and_then(parse_timestamp)
                .unwrap_or(created_at),
        )
    } else {
        None
    };

    Ok(Task {
        title: text(&record, "title")
            .or_else(|| text(&record, "Name"))
            .unwrap_or_default()
            .to_string(),
        completed,
        priority: text(&record, "priority")
            .and_then(|p| p.parse::<TaskPriority>().ok())
            .unwrap_or_default(),
        category: text(&record, "category").unwrap_or_default().to_string(),
        due_date: text(&record, "due_date").and_then(parse_due_date),
        created_at,
        completed_at,
        id,
    })
}

fn due_date_value(task: &Task) -> Value {
    task.due_date
        .map(|d| json!(d.format("%Y-%m-%d").to_string()))
        .unwrap_or(Value::Null)
}

/// Writable fields of a new task. `Name` mirrors `title` for the store's
/// display column.
fn record_for_create(input: &CreateTask, now: DateTime<Utc>) -> Record {
    let task = Task::new(RecordId::new(""), input.clone(), now);
    let mut record = record_for_write(&task);
    record.insert("created_at".to_string(), json!(now.to_rfc3339()));
    record
}

fn record_for_write(task: &Task) -> Record {
    let mut record = Record::new();
    record.insert("Name".to_string(), json!(task.title));
    record.insert("title".to_string(), json!(task.title));
    record.insert("completed".to_string(), json!(task.completed));
    record.insert("priority".to_string(), json!(task.priority.to_string()));
    record.insert("category".to_string(), json!(task.category));
    record.insert("due_date".to_string(), due_date_value(task));
    record.insert(
        "completed_at".to_string(),
        task.completed_at
            .map(|at| json!(at.to_rfc3339()))
            .unwrap_or(Value::Null),
    );
    record
}

/// Only the fields the caller supplied, plus `Id`. Completion fields are
/// written only when the flag actually flips.
fn record_for_update(id: &RecordId, before: &Task, input: &UpdateTask, after: &Task) -> Record {
    let mut record = Record::new();
    record.insert("Id".to_string(), json!(id));
    if input.title.is_some() {
        record.insert("Name".to_string(), json!(after.title));
        record.insert("title".to_string(), json!(after.title));
    }
    if input.priority.is_some() {
        record.insert("priority".to_string(), json!(after.priority.to_string()));
    }
    if input.category.is_some() {
        record.insert("category".to_string(), json!(after.category));
    }
    if input.due_date.is_some() {
        record.insert("due_date".to_string(), due_date_value(after));
    }
    if after.completed != before.completed {
        record.insert("completed".to_string(), json!(after.completed));
        record.insert(
            "completed_at".to_string(),
            after
                .completed_at
                .map(|at| json!(at.to_rfc3339()))
                .unwrap_or(Value::Null),
        );
    }
    record
}

/// The store may echo only part of a record; overlay the echo on what was sent.
fn merge_echo(sent: Record, stored: Vec<Record>) -> Option<Record> {
    stored.into_iter().next().map(|echo| {
        let mut merged = sent;
        merged.extend(echo);
        merged
    })
}

#[async_trait]
impl<S: RecordStore> TaskRepository for RemoteTaskRepository<S> {
    #[instrument(skip(self, input))]
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let record = record_for_create(&input, Utc::now());
        let stored = self
            .store
            .create_records(TASK_TABLE, vec![record.clone()])
            .await?;

        let task = merge_echo(record, stored)
            .ok_or_else(|| TaskError::Store("store returned no created task".to_string()))
            .and_then(task_from_record)?;

        tracing::info!(task_id = %task.id, "Created task");
        Ok(task)
    }

    #[instrument(skip(self, id), fields(task_id = %id))]
    async fn get_by_id(&self, id: &RecordId) -> TaskResult<Option<Task>> {
        self.store
            .get_record_by_id(TASK_TABLE, id, &fields())
            .await?
            .map(task_from_record)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> TaskResult<Vec<Task>> {
        let params = FetchParams::new(TASK_FIELDS).order_by_desc("created_at");
        let mut tasks = self
            .store
            .fetch_records(TASK_TABLE, &params)
            .await?
            .into_iter()
            .map(task_from_record)
            .collect::<TaskResult<Vec<_>>>()?;

        // Records created outside TaskFlow only carry CreatedOn.
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    #[instrument(skip(self, id, input), fields(task_id = %id))]
    async fn update(&self, id: &RecordId, input: UpdateTask) -> TaskResult<Task> {
        let current = self.fetch_record(id).await?;
        let before = task_from_record(current.clone())?;
        let mut after = before.clone();
        after.apply_update(input.clone(), Utc::now());

        let patch = record_for_update(id, &before, &input, &after);
        let stored = self
            .store
            .update_records(TASK_TABLE, vec![patch.clone()])
            .await?;

        let mut merged = current;
        merged.extend(patch);
        let task = match merge_echo(merged, stored) {
            Some(merged) => task_from_record(merged)?,
            None => after,
        };

        tracing::info!(task_id = %id, completed = task.completed, "Updated task");
        Ok(task)
    }

    #[instrument(skip(self, id), fields(task_id = %id))]
    async fn delete(&self, id: &RecordId) -> TaskResult<()> {
        self.fetch_record(id).await?;
        self.store
            .delete_records(TASK_TABLE, vec![id.clone()])
            .await?;

        tracing::info!(task_id = %id, "Deleted task");
        Ok(())
    }
}
