use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};
use record_store::RecordStoreConfig;

pub use core_config::Environment;

/// Where tasks and categories are kept
#[derive(Clone, Debug)]
pub enum Backend {
    /// Process-local store seeded with sample data
    Memory,
    /// Hosted record store
    Remote(RecordStoreConfig),
}

impl FromEnv for Backend {
    /// Reads TASKFLOW_BACKEND (`memory` default, or `remote`); `remote`
    /// also requires the RECORD_STORE_* variables.
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_or_default("TASKFLOW_BACKEND", "memory");
        match raw.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Backend::Memory),
            "remote" => Ok(Backend::Remote(RecordStoreConfig::from_env()?)),
            other => Err(ConfigError::ParseError {
                key: "TASKFLOW_BACKEND".to_string(),
                details: format!("expected 'memory' or 'remote', got '{}'", other),
            }),
        }
    }
}

/// Application-specific configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub backend: Backend,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;
        let backend = Backend::from_env()?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            backend,
        })
    }
}
