use chrono::NaiveDate;
use record_store::RecordId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::classification::{self, CompletionFilter, CompletionStats, Selection, TaskOverview, TaskQuery};
use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task, TaskPriority, UpdateTask};
use crate::repository::TaskRepository;

/// Number of tasks in the quick-add panel's "recent" list
pub const DEFAULT_RECENT_LIMIT: usize = 3;

/// Service layer for Task business logic
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

impl<R: TaskRepository> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new task with validation
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    pub async fn create_task(&self, input: CreateTask) -> TaskResult<Task> {
        input.validate()?;
        self.repository.create(input).await
    }

    /// Get a task by ID
    #[instrument(skip(self, id), fields(task_id = %id))]
    pub async fn get_task(&self, id: &RecordId) -> TaskResult<Task> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| TaskError::NotFound(id.clone()))
    }

    /// All tasks, newest first
    pub async fn list_tasks(&self) -> TaskResult<Vec<Task>> {
        self.repository.list().await
    }

    /// Tasks passing every criterion of `query`, newest first
    #[instrument(skip(self))]
    pub async fn search_tasks(&self, query: &TaskQuery) -> TaskResult<Vec<Task>> {
        Ok(query.apply(self.repository.list().await?))
    }

    /// Update a task
    #[instrument(skip(self, id, input), fields(task_id = %id))]
    pub async fn update_task(&self, id: &RecordId, input: UpdateTask) -> TaskResult<Task> {
        input.validate()?;
        self.repository.update(id, input).await
    }

    /// Delete a task
    #[instrument(skip(self, id), fields(task_id = %id))]
    pub async fn delete_task(&self, id: &RecordId) -> TaskResult<()> {
        self.repository.delete(id).await
    }

    /// Flip the completion flag of a task
    #[instrument(skip(self, id), fields(task_id = %id))]
    pub async fn toggle_completion(&self, id: &RecordId) -> TaskResult<Task> {
        let task = self.get_task(id).await?;
        self.repository
            .update(id, UpdateTask::completion(!task.completed))
            .await
    }

    /// Mark a task as completed
    pub async fn complete_task(&self, id: &RecordId) -> TaskResult<Task> {
        self.repository.update(id, UpdateTask::completion(true)).await
    }

    /// Mark a task as pending again
    pub async fn reopen_task(&self, id: &RecordId) -> TaskResult<Task> {
        self.repository.update(id, UpdateTask::completion(false)).await
    }

    pub async fn list_by_category(&self, category: &str) -> TaskResult<Vec<Task>> {
        self.search_tasks(&TaskQuery {
            category: Selection::Only(category.to_string()),
            ..TaskQuery::default()
        })
        .await
    }

    pub async fn list_by_priority(&self, priority: TaskPriority) -> TaskResult<Vec<Task>> {
        self.search_tasks(&TaskQuery {
            priority: Selection::Only(priority),
            ..TaskQuery::default()
        })
        .await
    }

    pub async fn list_completed(&self) -> TaskResult<Vec<Task>> {
        self.search_tasks(&TaskQuery {
            completion: CompletionFilter::Completed,
            ..TaskQuery::default()
        })
        .await
    }

    pub async fn list_pending(&self) -> TaskResult<Vec<Task>> {
        self.search_tasks(&TaskQuery {
            completion: CompletionFilter::Pending,
            ..TaskQuery::default()
        })
        .await
    }

    /// Newest pending tasks, at most `limit`
    pub async fn recent_pending(&self, limit: usize) -> TaskResult<Vec<Task>> {
        Ok(classification::recent_pending(
            self.repository.list().await?,
            limit,
        ))
    }

    /// Completion statistics over every task
    pub async fn stats(&self) -> TaskResult<CompletionStats> {
        Ok(CompletionStats::from_tasks(&self.repository.list().await?))
    }

    /// Filtered tasks grouped by due date, with statistics over the full list
    #[instrument(skip(self, query))]
    pub async fn board(&self, query: &TaskQuery, today: NaiveDate) -> TaskResult<TaskOverview> {
        let tasks = self.repository.list().await?;
        Ok(TaskOverview::build(tasks, query, today))
    }
}
