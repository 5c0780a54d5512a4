pub mod error;
pub mod ingestion;

// Re-export commonly used types
pub use error::IngestError;
pub use ingestion::IngestionLoop;
