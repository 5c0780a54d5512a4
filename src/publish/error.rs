use thiserror::Error;

use crate::io::{SinkError, SourceError};

/// Errors that end publishing
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Reading records: {0}")]
    Read(#[source] SourceError),

    #[error("Delivering record: {0}")]
    Deliver(#[source] SinkError),

    #[error("Closing sink: {0}")]
    Close(#[source] SinkError),

    #[error("Publisher task aborted: {0}")]
    Aborted(String),
}
