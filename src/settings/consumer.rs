use std::path::PathBuf;

use config::builder::{ConfigBuilder, DefaultState};
use serde::Deserialize;

use super::error::ConfigError;
use crate::pool::default_worker_count;

/// Optional configuration file looked up in the working directory
const CONFIG_FILE_STEM: &str = "txwatch";

/// Prefix for environment variable settings (`TXWATCH_DATABASE`, ...)
const ENV_PREFIX: &str = "TXWATCH";

/// Where suspicious transactions are persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// JSON-lines collection under `data_dir/database`
    #[default]
    File,
    /// In-process map, lost on exit
    Memory,
}

/// Consumer settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// TCP `host:port` of the record source
    #[serde(default)]
    pub source_addr: Option<String>,

    /// File of newline-delimited records; used when no address is set
    #[serde(default)]
    pub source_file: Option<PathBuf>,

    #[serde(default)]
    pub store_backend: StoreBackend,

    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default)]
    pub database: Option<String>,

    #[serde(default)]
    pub workers: Option<usize>,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_addr: None,
            source_file: None,
            store_backend: StoreBackend::default(),
            data_dir: default_data_dir(),
            database: None,
            workers: None,
            log_dir: default_log_dir(),
        }
    }
}

impl Settings {
    /// Load from `txwatch.toml` (optional) and `TXWATCH_*` environment variables
    ///
    /// Environment variables win over the file.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE_STEM).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));
        Self::from_builder(builder)
    }

    pub(crate) fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Reject settings the consumer cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_backend == StoreBackend::File
            && self.database.as_deref().is_none_or(|db| db.trim().is_empty())
        {
            return Err(ConfigError::MissingSetting("database"));
        }
        if let Some(0) = self.workers {
            return Err(ConfigError::InvalidWorkerCount(0));
        }
        Ok(())
    }

    /// Configured worker count, or one per available processing unit
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(default_worker_count)
    }
}
