pub mod error;
pub mod work;
pub mod worker_pool;

// Re-export commonly used types
pub use error::PoolError;
pub use work::{Work, WorkContext};
pub use worker_pool::{WorkerPool, default_worker_count};
