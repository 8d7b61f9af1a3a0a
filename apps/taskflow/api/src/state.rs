//! Shared application state.

use domain_categories::{CategoryRepository, CategoryService};
use domain_tasks::{TaskRepository, TaskService};

/// Services handed to the routers; clones share the underlying stores.
pub struct AppState<T: TaskRepository, C: CategoryRepository> {
    pub tasks: TaskService<T>,
    pub categories: CategoryService<C>,
}

impl<T: TaskRepository, C: CategoryRepository> AppState<T, C> {
    pub fn new(tasks: T, categories: C) -> Self {
        Self {
            tasks: TaskService::new(tasks),
            categories: CategoryService::new(categories),
        }
    }
}

impl<T: TaskRepository, C: CategoryRepository> Clone for AppState<T, C> {
    fn clone(&self) -> Self {
        Self {
            tasks: self.tasks.clone(),
            categories: self.categories.clone(),
        }
    }
}
