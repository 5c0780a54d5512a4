pub mod error;
pub mod sink;
pub mod source;

// Re-export commonly used types
pub use error::{SinkError, SourceError};
pub use sink::{LineSink, RecordSink};
pub use source::{LineSource, RecordSource};
