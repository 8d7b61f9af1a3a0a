use record_store::RecordId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

/// Service layer for Category business logic
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> Clone for CategoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new category with validation
    #[instrument(skip(self, input), fields(category_name = %input.name))]
    pub async fn create_category(&self, input: CreateCategory) -> CategoryResult<Category> {
        input.validate()?;
        self.repository.create(input).await
    }

    #[instrument(skip(self, id), fields(category_id = %id))]
    pub async fn get_category(&self, id: &RecordId) -> CategoryResult<Category> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| CategoryError::NotFound(id.clone()))
    }

    /// All categories, by name
    pub async fn list_categories(&self) -> CategoryResult<Vec<Category>> {
        self.repository.list().await
    }

    #[instrument(skip(self, id, input), fields(category_id = %id))]
    pub async fn update_category(
        &self,
        id: &RecordId,
        input: UpdateCategory,
    ) -> CategoryResult<Category> {
        input.validate()?;
        self.repository.update(id, input).await
    }

    /// Delete a category. Tasks keep their category name.
    #[instrument(skip(self, id), fields(category_id = %id))]
    pub async fn delete_category(&self, id: &RecordId) -> CategoryResult<()> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_CATEGORY_COLOR;
    use crate::repository::MockCategoryRepository;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_create_category_success() {
        let mut mock_repo = MockCategoryRepository::new();
        mock_repo
            .expect_create()
            .withf(|input| input.name == "Errands" && input.color == DEFAULT_CATEGORY_COLOR)
            .times(1)
            .returning(|input| Ok(Category::new(RecordId::from(5), input)));

        let service = CategoryService::new(mock_repo);
        let category = service
            .create_category(CreateCategory {
                name: "Errands".to_string(),
                color: DEFAULT_CATEGORY_COLOR.to_string(),
                task_count: 0,
            })
            .await
            .unwrap();

        assert_eq!(category.id.as_str(), "5");
    }

    #[tokio::test]
    async fn test_create_rejects_bad_color_before_store() {
        let mut mock_repo = MockCategoryRepository::new();
        mock_repo.expect_create().never();

        let service = CategoryService::new(mock_repo);
        let result = service
            .create_category(CreateCategory {
                name: "Errands".to_string(),
                color: "purple".to_string(),
                task_count: 0,
            })
            .await;

        assert!(matches!(result, Err(CategoryError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_missing_category_is_not_found() {
        let mut mock_repo = MockCategoryRepository::new();
        mock_repo
            .expect_get_by_id()
            .with(eq(RecordId::from(7)))
            .returning(|_| Ok(None));

        let service = CategoryService::new(mock_repo);
        let result = service.get_category(&RecordId::from(7)).await;

        assert!(matches!(result, Err(CategoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_empty_name() {
        let mut mock_repo = MockCategoryRepository::new();
        mock_repo.expect_update().never();

        let service = CategoryService::new(mock_repo);
        let result = service
            .update_category(
                &RecordId::from(1),
                UpdateCategory {
                    name: Some(String::new()),
                    ..UpdateCategory::default()
                },
            )
            .await;

        assert!(matches!(result, Err(CategoryError::Validation(_))));
    }

    #[tokio::test]
    async fn test_store_outage_surfaces_as_transport() {
        let mut mock_repo = MockCategoryRepository::new();
        mock_repo
            .expect_list()
            .returning(|| Err(CategoryError::Transport("connection refused".to_string())));

        let service = CategoryService::new(mock_repo);
        let result = service.list_categories().await;

        assert!(matches!(result, Err(CategoryError::Transport(_))));
    }
}
