use thiserror::Error;

use crate::io::SourceError;
use crate::pool::PoolError;

/// Errors that end the ingestion loop
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Reading from source: {0}")]
    Read(#[source] SourceError),

    #[error("Closing source: {0}")]
    Close(#[source] SourceError),

    #[error("Submitting work: {0}")]
    Submit(#[from] PoolError),

    #[error("Ingestion task aborted: {0}")]
    Aborted(String),
}
