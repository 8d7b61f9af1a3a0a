//! Categories Domain
//!
//! Named, colored groups of tasks. Tasks point at a category by name, so
//! renaming or deleting a category leaves existing tasks untouched.

pub mod error;
pub mod handlers;
pub mod models;
pub mod remote;
pub mod repository;
pub mod service;

pub use error::{CategoryError, CategoryResult};
pub use handlers::{ApiDoc, router};
pub use models::{
    Category, CreateCategory, DEFAULT_CATEGORY_COLOR, UpdateCategory, category_color,
};
pub use remote::RemoteCategoryRepository;
pub use repository::{CategoryRepository, InMemoryCategoryRepository};
pub use service::CategoryService;
