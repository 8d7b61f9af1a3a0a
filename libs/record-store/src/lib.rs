//! Record Store
//!
//! Client for the hosted record-storage backend that TaskFlow persists to.
//! The backend stores loosely typed records in named tables and answers every
//! call with a success flag, an optional message and, for bulk operations,
//! one result per record.
//!
//! # Modules
//!
//! - **[`models`]**: wire types (`RecordId`, `FetchParams`, `StoreResponse`, ...)
//! - **[`client`]**: the [`RecordStore`] trait and response interpretation
//! - **[`http`]**: [`HttpRecordStore`], the reqwest-backed implementation
//! - **[`config`]**: connection settings (`FromEnv` with the `config` feature)
//!
//! # Features
//!
//! - `config`: load [`RecordStoreConfig`] from environment variables
//! - `mock`: export `MockRecordStore` for downstream tests
//!
//! # Usage
//!
//! ```rust,no_run
//! use record_store::{FetchParams, HttpRecordStore, RecordStore, RecordStoreConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RecordStoreConfig::new("https://records.example.com/v1", "proj-1", "pk-123");
//! let store = HttpRecordStore::new(config)?;
//!
//! let params = FetchParams::new(["Id", "Name"]).order_by_desc("created_at");
//! let records = store.fetch_records("task", &params).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;

pub use client::RecordStore;
#[cfg(any(test, feature = "mock"))]
pub use client::MockRecordStore;
pub use config::RecordStoreConfig;
pub use error::{RecordStoreError, RecordStoreResult};
pub use http::HttpRecordStore;
pub use models::{
    FetchParams, FieldError, OrderBy, Record, RecordFailure, RecordId, RecordResult, SortType,
    StoreResponse,
};
