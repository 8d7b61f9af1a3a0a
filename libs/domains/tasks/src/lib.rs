//! Tasks Domain
//!
//! Task store client, task classification and the HTTP handlers on top.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← axum routes + OpenAPI
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐   ┌────────────────┐
//! │   Service   │──►│ Classification │  ← filters, due-date buckets, stats
//! └──────┬──────┘   └────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← in-memory or record store
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Task, DTOs, priority
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use chrono::Local;
//! use domain_tasks::{InMemoryTaskRepository, TaskQuery, TaskService};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = TaskService::new(InMemoryTaskRepository::seeded()?);
//!
//! let overview = service
//!     .board(&TaskQuery::default(), Local::now().date_naive())
//!     .await?;
//! println!("{} overdue, {}% done", overview.board.overdue.len(), overview.stats.percent);
//! # Ok(())
//! # }
//! ```

pub mod classification;
pub mod error;
pub mod handlers;
pub mod models;
pub mod remote;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use classification::{
    CompletionFilter, CompletionStats, DueBucket, Selection, TaskBoard, TaskOverview, TaskQuery,
    is_overdue,
};
pub use error::{TaskError, TaskResult};
pub use handlers::{ApiDoc, router};
pub use models::{CreateTask, Task, TaskPriority, UpdateTask};
pub use remote::RemoteTaskRepository;
pub use repository::{InMemoryTaskRepository, TaskRepository};
pub use service::TaskService;
