//! Prelude module for convenient imports
//!
//! Import everything you need with: `use txwatch::prelude::*;`

// Domain types
pub use crate::domain::{
    DomainError, SUSPICIOUS_AMOUNT, SUSPICIOUS_COLLECTION, SuspiciousTransaction, Transaction,
};

// Counters
pub use crate::stats::{ConsumerStats, Metric, ProducerStats, StatsReader, StatsSnapshot};

// Pool types
pub use crate::pool::{PoolError, Work, WorkContext, WorkerPool, default_worker_count};

// Storage types
pub use crate::storage::{JsonFileStore, MemoryStore, StoreError, SuspiciousStore};

// IO types
pub use crate::io::{LineSink, LineSource, RecordSink, RecordSource, SinkError, SourceError};

// Publishing
pub use crate::publish::{PublishEnd, PublishError, Publisher};

// Configuration
pub use crate::settings::{ConfigError, Settings, StoreBackend};

// Work variants
pub use crate::workers::{AmountRange, GeneratorWork, TransactionFactory, TransactionWork};

// Ingestion
pub use crate::ingest::{IngestError, IngestionLoop};

// App types
pub use crate::app::{
    AppError, Cli, CliApp, Command, ConsumeArgs, CoordinatorState, GenerateArgs, GenerateParams,
    GenerateSummary, LogTarget, ProduceArgs, ShutdownCoordinator, ShutdownOutcome, ShutdownTrigger,
    consume, generate, init_tracing, produce, run_consumer, run_producer,
};
