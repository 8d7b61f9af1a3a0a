//! reqwest-backed [`RecordStore`].

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::client::{collect_results, ensure_success, RecordStore};
use crate::config::RecordStoreConfig;
use crate::error::{RecordStoreError, RecordStoreResult};
use crate::models::{FetchParams, Record, RecordId, StoreResponse};

const PROJECT_HEADER: &str = "X-Project-Id";

/// HTTP client for the hosted record store.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct HttpRecordStore {
    client: Client,
    config: RecordStoreConfig,
}

impl HttpRecordStore {
    pub fn new(config: RecordStoreConfig) -> RecordStoreResult<Self> {
        if config.base_url.is_empty() {
            return Err(RecordStoreError::Config(
                "record store base URL is empty".to_string(),
            ));
        }

        let client = Client::builder()
            .user_agent(concat!("taskflow/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RecordStoreError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn records_url(&self, table: &str) -> String {
        format!("{}/tables/{}/records", self.config.base_url, table)
    }

    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.config.public_key)
            .header(PROJECT_HEADER, &self.config.project_id)
    }

    /// Send a request and decode the envelope.
    ///
    /// `Ok(None)` means the store answered 404. A non-2xx answer whose body
    /// is still a failed envelope is returned as is so the caller reports the
    /// store's own message; anything else is a transport failure.
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> RecordStoreResult<Option<StoreResponse<T>>> {
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = response.bytes().await?;

        match serde_json::from_slice::<StoreResponse<T>>(&body) {
            Ok(envelope) if status.is_success() || !envelope.success => Ok(Some(envelope)),
            Err(e) if status.is_success() => Err(RecordStoreError::Decode(e.to_string())),
            _ => Err(RecordStoreError::Transport(format!("HTTP {}", status))),
        }
    }

    /// Like [`Self::send`], but a 404 is a transport failure (unknown table or endpoint).
    async fn send_expecting<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> RecordStoreResult<StoreResponse<T>> {
        self.send(request).await?.ok_or_else(|| {
            RecordStoreError::Transport(format!("HTTP {}", StatusCode::NOT_FOUND))
        })
    }

    async fn bulk(
        &self,
        method: Method,
        table: &str,
        body: Value,
    ) -> RecordStoreResult<Vec<Record>> {
        let request = self.request(method, self.records_url(table)).json(&body);
        let envelope = self.send_expecting::<Value>(request).await?;
        collect_results(table, envelope)
    }
}

fn with_wire_ids(records: Vec<Record>) -> Vec<Record> {
    records
        .into_iter()
        .map(|mut record| {
            if let Some(id) = record.get("Id").cloned() {
                if let Ok(id) = serde_json::from_value::<RecordId>(id) {
                    record.insert("Id".to_string(), id.to_wire());
                }
            }
            record
        })
        .collect()
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    #[instrument(skip(self, params), fields(table = %table))]
    async fn fetch_records(
        &self,
        table: &str,
        params: &FetchParams,
    ) -> RecordStoreResult<Vec<Record>> {
        let url = format!("{}/tables/{}/fetch", self.config.base_url, table);
        let envelope = self
            .send_expecting::<Vec<Record>>(self.request(Method::POST, url).json(params))
            .await?;
        let records = ensure_success(envelope)?.data.unwrap_or_default();

        debug!(count = records.len(), "Fetched records");
        Ok(records)
    }

    #[instrument(skip(self, fields), fields(table = %table, record_id = %id))]
    async fn get_record_by_id(
        &self,
        table: &str,
        id: &RecordId,
        fields: &[String],
    ) -> RecordStoreResult<Option<Record>> {
        let url = format!("{}/{}", self.records_url(table), id);
        let mut request = self.request(Method::GET, url);
        if !fields.is_empty() {
            request = request.query(&[("fields", fields.join(","))]);
        }

        match self.send::<Record>(request).await? {
            Some(envelope) => Ok(ensure_success(envelope)?.data),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, records), fields(table = %table, count = records.len()))]
    async fn create_records(
        &self,
        table: &str,
        records: Vec<Record>,
    ) -> RecordStoreResult<Vec<Record>> {
        self.bulk(Method::POST, table, json!({ "records": records }))
            .await
    }

    #[instrument(skip(self, records), fields(table = %table, count = records.len()))]
    async fn update_records(
        &self,
        table: &str,
        records: Vec<Record>,
    ) -> RecordStoreResult<Vec<Record>> {
        self.bulk(
            Method::PATCH,
            table,
            json!({ "records": with_wire_ids(records) }),
        )
        .await
    }

    #[instrument(skip(self, ids), fields(table = %table, count = ids.len()))]
    async fn delete_records(&self, table: &str, ids: Vec<RecordId>) -> RecordStoreResult<()> {
        let ids: Vec<Value> = ids.iter().map(RecordId::to_wire).collect();
        self.bulk(Method::DELETE, table, json!({ "RecordIds": ids }))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> HttpRecordStore {
        HttpRecordStore::new(RecordStoreConfig::new(
            "https://records.example.com/v1/",
            "proj-1",
            "pk",
        ))
        .unwrap()
    }

    #[test]
    fn test_new_rejects_empty_base_url() {
        let err = HttpRecordStore::new(RecordStoreConfig::new("", "p", "k")).unwrap_err();
        assert!(matches!(err, RecordStoreError::Config(_)));
    }

    #[test]
    fn test_records_url() {
        assert_eq!(
            store().records_url("task"),
            "https://records.example.com/v1/tables/task/records"
        );
    }

    #[test]
    fn test_request_carries_credentials() {
        let request = store()
            .request(Method::GET, store().records_url("category"))
            .build()
            .unwrap();

        assert_eq!(request.headers()[PROJECT_HEADER], "proj-1");
        assert_eq!(request.headers()[reqwest::header::AUTHORIZATION], "Bearer pk");
    }

    #[test]
    fn test_update_ids_are_sent_in_wire_form() {
        let mut record = Record::new();
        record.insert("Id".to_string(), json!("12"));
        record.insert("title".to_string(), json!("Call mom"));

        let records = with_wire_ids(vec![record]);
        assert_eq!(records[0]["Id"], json!(12));
        assert_eq!(records[0]["title"], json!("Call mom"));
    }
}
