use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a record source
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Cannot connect to source {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("Cannot open source file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Source reached end of stream")]
    EndOfStream,

    #[error("Source is closed")]
    Closed,
}

/// Errors raised by a record sink
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Cannot listen on {addr}: {source}")]
    Listen {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("Delivery failed: {0}")]
    Io(#[from] io::Error),

    #[error("Sink is closed")]
    Closed,
}
