//! Category repository backed by the hosted record store (table `category`).

use async_trait::async_trait;
use record_store::{FetchParams, Record, RecordId, RecordStore};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CreateCategory, DEFAULT_CATEGORY_COLOR, UpdateCategory};
use crate::repository::CategoryRepository;

pub const CATEGORY_TABLE: &str = "category";

const CATEGORY_FIELDS: [&str; 4] = ["Id", "Name", "color", "task_count"];

fn fields() -> Vec<String> {
    CATEGORY_FIELDS.iter().map(|f| f.to_string()).collect()
}

/// Category repository over any [`RecordStore`]
pub struct RemoteCategoryRepository<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> Clone for RemoteCategoryRepository<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecordStore> RemoteCategoryRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_shared(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn fetch_record(&self, id: &RecordId) -> CategoryResult<Record> {
        self.store
            .get_record_by_id(CATEGORY_TABLE, id, &fields())
            .await?
            .ok_or_else(|| CategoryError::NotFound(id.clone()))
    }
}

/// Translate a stored record; `color` defaults to the neutral gray and
/// `task_count` to 0.
pub fn category_from_record(record: Record) -> CategoryResult<Category> {
    let id: RecordId = record
        .get("Id")
        .cloned()
        .and_then(|id| serde_json::from_value(id).ok())
        .ok_or_else(|| CategoryError::Store("category record without Id".to_string()))?;

    let name = record
        .get("Name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let color = record
        .get("color")
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CATEGORY_COLOR)
        .to_string();

    let task_count = record
        .get("task_count")
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0);

    Ok(Category {
        id,
        name,
        color,
        task_count,
    })
}

fn record_for_write(category: &Category) -> Record {
    let mut record = Record::new();
    record.insert("Name".to_string(), json!(category.name));
    record.insert("color".to_string(), json!(category.color));
    record.insert("task_count".to_string(), json!(category.task_count));
    record
}

/// `Id` plus the fields present in the update
fn record_for_update(id: &RecordId, input: &UpdateCategory) -> Record {
    let mut record = Record::new();
    record.insert("Id".to_string(), json!(id));
    if let Some(name) = &input.name {
        record.insert("Name".to_string(), json!(name));
    }
    if let Some(color) = &input.color {
        record.insert("color".to_string(), json!(color));
    }
    if let Some(task_count) = input.task_count {
        record.insert("task_count".to_string(), json!(task_count));
    }
    record
}

fn merge_echo(sent: Record, stored: Vec<Record>) -> Option<Record> {
    stored.into_iter().next().map(|echo| {
        let mut merged = sent;
        merged.extend(echo);
        merged
    })
}

#[async_trait]
impl<S: RecordStore> CategoryRepository for RemoteCategoryRepository<S> {
    #[instrument(skip(self, input), fields(category_name = %input.name))]
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let record = record_for_write(&Category::new(RecordId::new(""), input));
        let stored = self
            .store
            .create_records(CATEGORY_TABLE, vec![record.clone()])
            .await?;

        let category = merge_echo(record, stored)
            .ok_or_else(|| CategoryError::Store("store returned no created category".to_string()))
            .and_then(category_from_record)?;

        tracing::info!(category_id = %category.id, "Created category");
        Ok(category)
    }

    #[instrument(skip(self, id), fields(category_id = %id))]
    async fn get_by_id(&self, id: &RecordId) -> CategoryResult<Option<Category>> {
        self.store
            .get_record_by_id(CATEGORY_TABLE, id, &fields())
            .await?
            .map(category_from_record)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self) -> CategoryResult<Vec<Category>> {
        let params = FetchParams::new(CATEGORY_FIELDS).order_by_asc("Name");
        self.store
            .fetch_records(CATEGORY_TABLE, &params)
            .await?
            .into_iter()
            .map(category_from_record)
            .collect()
    }

    #[instrument(skip(self, id, input), fields(category_id = %id))]
    async fn update(&self, id: &RecordId, input: UpdateCategory) -> CategoryResult<Category> {
        let mut merged = self.fetch_record(id).await?;
        let patch = record_for_update(id, &input);
        let stored = self
            .store
            .update_records(CATEGORY_TABLE, vec![patch.clone()])
            .await?;

        merged.extend(patch);
        let category = category_from_record(merge_echo(merged.clone(), stored).unwrap_or(merged))?;

        tracing::info!(category_id = %id, "Updated category");
        Ok(category)
    }

    #[instrument(skip(self, id), fields(category_id = %id))]
    async fn delete(&self, id: &RecordId) -> CategoryResult<()> {
        self.fetch_record(id).await?;
        self.store
            .delete_records(CATEGORY_TABLE, vec![id.clone()])
            .await?;

        tracing::info!(category_id = %id, "Deleted category");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use record_store::{MockRecordStore, RecordFailure, RecordStoreError};

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_record_defaults() {
        let category = category_from_record(record(json!({"Id": 2, "Name": "Errands"}))).unwrap();

        assert_eq!(category.id.as_str(), "2");
        assert_eq!(category.color, DEFAULT_CATEGORY_COLOR);
        assert_eq!(category.task_count, 0);
    }

    #[tokio::test]
    async fn test_list_translates_fields() {
        let mut store = MockRecordStore::new();
        store
            .expect_fetch_records()
            .withf(|table, params| table == CATEGORY_TABLE && params.fields.len() == 4)
            .returning(|_, _| {
                Ok(vec![record(json!({
                    "Id": 1,
                    "Name": "Work",
                    "color": "#5b21b6",
                    "task_count": 3
                }))])
            });

        let repo = RemoteCategoryRepository::new(store);
        let categories = repo.list().await.unwrap();

        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Work");
        assert_eq!(categories[0].task_count, 3);
    }

    #[tokio::test]
    async fn test_create_reports_every_failed_record() {
        let mut store = MockRecordStore::new();
        store.expect_create_records().returning(|_, _| {
            Err(RecordStoreError::RecordFailures(vec![RecordFailure {
                index: 0,
                message: Some("Duplicate name".to_string()),
                errors: vec![],
            }]))
        });

        let repo = RemoteCategoryRepository::new(store);
        let result = repo
            .create(CreateCategory {
                name: "Work".to_string(),
                color: DEFAULT_CATEGORY_COLOR.to_string(),
                task_count: 0,
            })
            .await;

        match result {
            Err(CategoryError::Rejected(failures)) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].message.as_deref(), Some("Duplicate name"));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_sends_task_count_as_supplied() {
        let mut store = MockRecordStore::new();
        store.expect_get_record_by_id().returning(|_, _, _| {
            Ok(Some(record(json!({"Id": 1, "Name": "Work", "color": "#5b21b6", "task_count": 3}))))
        });
        store
            .expect_update_records()
            .withf(|_, records| {
                records[0] == record(json!({"Id": "1", "task_count": 10}))
            })
            .returning(|_, _| Ok(vec![]));

        let repo = RemoteCategoryRepository::new(store);
        let category = repo
            .update(
                &RecordId::from(1),
                UpdateCategory {
                    task_count: Some(10),
                    ..UpdateCategory::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(category.task_count, 10);
        assert_eq!(category.name, "Work");
        assert_eq!(category.color, "#5b21b6");
    }

    #[tokio::test]
    async fn test_update_prefers_store_echo() {
        let mut store = MockRecordStore::new();
        store.expect_get_record_by_id().returning(|_, _, _| {
            Ok(Some(record(json!({"Id": 1, "Name": "Work", "color": "#5b21b6"}))))
        });
        store
            .expect_update_records()
            .withf(|_, records| {
                records[0]["Name"] == "Office" && !records[0].contains_key("color")
            })
            .returning(|_, _| Ok(vec![record(json!({"Id": 1, "Name": "Office", "task_count": 2}))]));

        let repo = RemoteCategoryRepository::new(store);
        let category = repo
            .update(
                &RecordId::from(1),
                UpdateCategory {
                    name: Some("Office".to_string()),
                    ..UpdateCategory::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(category.name, "Office");
        assert_eq!(category.color, "#5b21b6");
        assert_eq!(category.task_count, 2);
    }

    #[tokio::test]
    async fn test_delete_missing_category_is_not_found() {
        let mut store = MockRecordStore::new();
        store
            .expect_get_record_by_id()
            .returning(|_, _, _| Ok(None));
        store.expect_delete_records().never();

        let repo = RemoteCategoryRepository::new(store);
        let result = repo.delete(&RecordId::from(9)).await;
        assert!(matches!(result, Err(CategoryError::NotFound(_))));
    }
}
