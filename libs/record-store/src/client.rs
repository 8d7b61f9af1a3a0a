use async_trait::async_trait;
use tracing::warn;

use crate::error::{RecordStoreError, RecordStoreResult};
use crate::models::{FetchParams, Record, RecordFailure, RecordId, StoreResponse};

/// Generic record-storage interface.
///
/// Every method is one independent round trip; there is no batching across
/// calls and no transaction spanning them.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch all records of a table with the given fields and ordering
    async fn fetch_records(&self, table: &str, params: &FetchParams)
    -> RecordStoreResult<Vec<Record>>;

    /// Fetch a single record, `None` when the store has no such id
    async fn get_record_by_id(
        &self,
        table: &str,
        id: &RecordId,
        fields: &[String],
    ) -> RecordStoreResult<Option<Record>>;

    /// Create records, returning them as stored
    async fn create_records(&self, table: &str, records: Vec<Record>)
    -> RecordStoreResult<Vec<Record>>;

    /// Update records (each must carry its `Id`), returning them as stored
    async fn update_records(&self, table: &str, records: Vec<Record>)
    -> RecordStoreResult<Vec<Record>>;

    /// Delete records by id
    async fn delete_records(&self, table: &str, ids: Vec<RecordId>) -> RecordStoreResult<()>;
}

/// Turn an envelope with `success: false` into [`RecordStoreError::Rejected`].
pub fn ensure_success<T>(response: StoreResponse<T>) -> RecordStoreResult<StoreResponse<T>> {
    if response.success {
        Ok(response)
    } else {
        Err(RecordStoreError::Rejected(
            response
                .message
                .unwrap_or_else(|| "request failed without a message".to_string()),
        ))
    }
}

/// Interpret the envelope of a bulk create/update/delete.
///
/// Every failed record is reported, even when other records in the same
/// call succeeded. On success the stored records are returned in request
/// order (records the store echoed without data are skipped).
pub fn collect_results<T>(table: &str, response: StoreResponse<T>) -> RecordStoreResult<Vec<Record>> {
    let response = ensure_success(response)?;
    let results = response.results.ok_or(RecordStoreError::MissingResults)?;

    let (succeeded, failed): (Vec<_>, Vec<_>) = results
        .into_iter()
        .enumerate()
        .partition(|(_, result)| result.success);

    if !failed.is_empty() {
        let failures: Vec<RecordFailure> = failed
            .into_iter()
            .map(|(index, result)| RecordFailure::from_result(index, result))
            .collect();

        for failure in &failures {
            warn!(table, record_index = failure.index, "Record rejected: {}", failure);
        }

        return Err(RecordStoreError::RecordFailures(failures));
    }

    Ok(succeeded
        .into_iter()
        .filter_map(|(_, result)| result.data)
        .collect())
}
