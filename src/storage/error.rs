use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Persistence errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Cannot connect to store at {path}: {source}")]
    Connect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Insert rejected: {0}")]
    Rejected(String),
}
