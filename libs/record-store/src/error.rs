use thiserror::Error;

use crate::models::RecordFailure;

/// Errors raised while talking to the record store
#[derive(Debug, Error)]
pub enum RecordStoreError {
    /// The round trip itself did not complete
    #[error("Transport error: {0}")]
    Transport(String),

    /// The store answered with `success: false`
    #[error("Record store rejected the request: {0}")]
    Rejected(String),

    /// One or more records of a bulk call failed
    #[error("{} record(s) failed: {}", .0.len(), summarize(.0))]
    RecordFailures(Vec<RecordFailure>),

    /// A bulk call succeeded but carried no per-record results
    #[error("Record store returned no per-record results")]
    MissingResults,

    /// The response body could not be decoded
    #[error("Failed to decode record store response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for record store operations
pub type RecordStoreResult<T> = Result<T, RecordStoreError>;

fn summarize(failures: &[RecordFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

impl From<reqwest::Error> for RecordStoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RecordStoreError::Decode(err.to_string())
        } else {
            RecordStoreError::Transport(err.to_string())
        }
    }
}
