pub mod cli;
pub mod consumer;
pub mod coordinator;
pub mod error;
pub mod generate;
pub mod logging;
pub mod producer;
pub mod screen;

// Re-export commonly used types
pub use cli::{Cli, CliApp, Command, ConsumeArgs, GenerateArgs, ProduceArgs};
pub use consumer::{connect_store, consume, open_source, run_consumer};
pub use coordinator::{
    CoordinatorState, ShutdownCoordinator, ShutdownOutcome, ShutdownTrigger, termination_signal,
};
pub use error::AppError;
pub use generate::{GenerateParams, GenerateSummary, generate, split_counts};
pub use logging::{CONSUMER_LOG_FILE, LogGuard, LogTarget, PRODUCER_LOG_FILE, init_tracing};
pub use producer::{produce, run_producer};
pub use screen::{ConsumerScreen, ProducerScreen, Screen, ScreenFrame, spawn_renderer};
