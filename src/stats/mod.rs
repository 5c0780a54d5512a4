pub mod counters;
pub mod producer;

// Re-export commonly used types
pub use counters::{ConsumerStats, ElapsedRecorder, Metric, StatsReader, StatsSnapshot};
pub use producer::{ProducerSnapshot, ProducerStats};
