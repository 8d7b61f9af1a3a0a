#[cfg(feature = "config")]
use core_config::{env_required, ConfigError, FromEnv};
use std::fmt;

/// Connection settings for the hosted record store
///
/// # Example
///
/// ```ignore
/// use record_store::RecordStoreConfig;
///
/// // Manual construction
/// let config = RecordStoreConfig::new("https://records.example.com/v1", "proj-1", "pk-123");
///
/// // From environment variables (requires `config` feature)
/// let config = RecordStoreConfig::from_env()?;
/// ```
#[derive(Clone)]
pub struct RecordStoreConfig {
    /// Base URL of the store API, without trailing slash
    pub base_url: String,
    /// Project the tables belong to
    pub project_id: String,
    /// Public API key sent as a bearer token
    pub public_key: String,
}

impl RecordStoreConfig {
    pub fn new(
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            public_key: public_key.into(),
        }
    }
}

// The public key stays out of logs.
impl fmt::Debug for RecordStoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStoreConfig")
            .field("base_url", &self.base_url)
            .field("project_id", &self.project_id)
            .field("public_key", &"<redacted>")
            .finish()
    }
}

#[cfg(feature = "config")]
impl FromEnv for RecordStoreConfig {
    /// Reads (all required):
    /// - RECORD_STORE_URL
    /// - RECORD_STORE_PROJECT_ID
    /// - RECORD_STORE_PUBLIC_KEY
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(
            env_required("RECORD_STORE_URL")?,
            env_required("RECORD_STORE_PROJECT_ID")?,
            env_required("RECORD_STORE_PUBLIC_KEY")?,
        ))
    }
}
