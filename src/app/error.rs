use std::io;
use thiserror::Error;

use crate::domain::DomainError;
use crate::ingest::IngestError;
use crate::io::{SinkError, SourceError};
use crate::pool::PoolError;
use crate::publish::PublishError;
use crate::settings::ConfigError;
use crate::storage::StoreError;

/// Top-level application errors unifying all layer errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("Ingestion error: {0}")]
    Ingest(#[from] IngestError),

    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}
