use async_trait::async_trait;
use chrono::Utc;
use record_store::RecordId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, UpdateTask};

const SAMPLE_TASKS: &str = include_str!("../data/tasks.json");

/// Repository trait for Task persistence
///
/// Every call is one independent round trip to the backing store. A failed
/// call leaves the store untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Create a new, pending task
    async fn create(&self, input: CreateTask) -> TaskResult<Task>;

    /// Get a task by ID
    async fn get_by_id(&self, id: &RecordId) -> TaskResult<Option<Task>>;

    /// List all tasks, newest first
    async fn list(&self) -> TaskResult<Vec<Task>>;

    /// Apply the supplied fields; `NotFound` if the task does not exist
    async fn update(&self, id: &RecordId, input: UpdateTask) -> TaskResult<Task>;

    /// Delete a task; `NotFound` if the task does not exist
    async fn delete(&self, id: &RecordId) -> TaskResult<()>;
}

/// In-memory implementation of TaskRepository (development and tests)
///
/// Owns its collection exclusively; nothing outside the repository can
/// reach the map.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<RecordId, Task>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with the given tasks
    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let tasks = tasks
            .into_iter()
            .map(|task| (task.id.clone(), task))
            .collect();
        Self {
            tasks: Arc::new(RwLock::new(tasks)),
        }
    }

    /// Repository seeded with the bundled sample dataset
    pub fn seeded() -> TaskResult<Self> {
        let tasks: Vec<Task> = serde_json::from_str(SAMPLE_TASKS)
            .map_err(|e| TaskError::Internal(format!("Invalid sample tasks: {}", e)))?;
        tracing::debug!(count = tasks.len(), "Seeded in-memory task store");
        Ok(Self::with_tasks(tasks))
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let mut tasks = self.tasks.write().await;

        let task = Task::new(RecordId::new(Uuid::now_v7().to_string()), input, Utc::now());
        tasks.insert(task.id.clone(), task.clone());

        tracing::info!(task_id = %task.id, "Created task");
        Ok(task)
    }

    async fn get_by_id(&self, id: &RecordId) -> TaskResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(id).cloned())
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let tasks = self.tasks.read().await;

        let mut result: Vec<Task> = tasks.values().cloned().collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(result)
    }

    async fn update(&self, id: &RecordId, input: UpdateTask) -> TaskResult<Task> {
        let mut tasks = self.tasks.write().await;

        let task = tasks
            .get_mut(id)
            .ok_or_else(|| TaskError::NotFound(id.clone()))?;
        task.apply_update(input, Utc::now());

        tracing::info!(task_id = %id, "Updated task");
        Ok(task.clone())
    }

    async fn delete(&self, id: &RecordId) -> TaskResult<()> {
        let mut tasks = self.tasks.write().await;

        if tasks.remove(id).is_some() {
            tracing::info!(task_id = %id, "Deleted task");
            Ok(())
        } else {
            Err(TaskError::NotFound(id.clone()))
        }
    }
}
