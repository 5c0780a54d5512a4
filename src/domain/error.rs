use thiserror::Error;

/// Domain-level errors for decoding and encoding records
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Malformed transaction: {0}")]
    Malformed(#[from] serde_json::Error),
}
