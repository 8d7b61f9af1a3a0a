use async_trait::async_trait;
use record_store::RecordId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CreateCategory, UpdateCategory};

const SAMPLE_CATEGORIES: &str = include_str!("../data/categories.json");

/// Repository trait for Category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Create a new category
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category>;

    /// Get a category by ID
    async fn get_by_id(&self, id: &RecordId) -> CategoryResult<Option<Category>>;

    /// List all categories by name
    async fn list(&self) -> CategoryResult<Vec<Category>>;

    /// Apply the supplied fields; `NotFound` if the category does not exist
    async fn update(&self, id: &RecordId, input: UpdateCategory) -> CategoryResult<Category>;

    /// Delete a category; `NotFound` if the category does not exist
    async fn delete(&self, id: &RecordId) -> CategoryResult<()>;
}

/// In-memory implementation of CategoryRepository (development and tests)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<RecordId, Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        let categories = categories
            .into_iter()
            .map(|category| (category.id.clone(), category))
            .collect();
        Self {
            categories: Arc::new(RwLock::new(categories)),
        }
    }

    /// Repository seeded with the bundled sample categories
    pub fn seeded() -> CategoryResult<Self> {
        let categories: Vec<Category> = serde_json::from_str(SAMPLE_CATEGORIES)
            .map_err(|e| CategoryError::Internal(format!("Invalid sample categories: {}", e)))?;
        tracing::debug!(count = categories.len(), "Seeded in-memory category store");
        Ok(Self::with_categories(categories))
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let mut categories = self.categories.write().await;

        if categories.values().any(|c| same_name(&c.name, &input.name)) {
            return Err(CategoryError::DuplicateName(input.name));
        }

        let category = Category::new(RecordId::new(Uuid::now_v7().to_string()), input);
        categories.insert(category.id.clone(), category.clone());

        tracing::info!(category_id = %category.id, "Created category");
        Ok(category)
    }

    async fn get_by_id(&self, id: &RecordId) -> CategoryResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.get(id).cloned())
    }

    async fn list(&self) -> CategoryResult<Vec<Category>> {
        let categories = self.categories.read().await;

        let mut result: Vec<Category> = categories.values().cloned().collect();
        result.sort_by_key(|c| c.name.to_lowercase());

        Ok(result)
    }

    async fn update(&self, id: &RecordId, input: UpdateCategory) -> CategoryResult<Category> {
        let mut categories = self.categories.write().await;

        if !categories.contains_key(id) {
            return Err(CategoryError::NotFound(id.clone()));
        }

        if let Some(ref new_name) = input.name {
            let name_exists = categories
                .values()
                .any(|c| &c.id != id && same_name(&c.name, new_name));

            if name_exists {
                return Err(CategoryError::DuplicateName(new_name.clone()));
            }
        }

        let category = categories
            .get_mut(id)
            .ok_or_else(|| CategoryError::NotFound(id.clone()))?;
        category.apply_update(input);

        tracing::info!(category_id = %id, "Updated category");
        Ok(category.clone())
    }

    async fn delete(&self, id: &RecordId) -> CategoryResult<()> {
        let mut categories = self.categories.write().await;

        if categories.remove(id).is_some() {
            tracing::info!(category_id = %id, "Deleted category");
            Ok(())
        } else {
            Err(CategoryError::NotFound(id.clone()))
        }
    }
}
