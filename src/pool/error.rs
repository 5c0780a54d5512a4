use thiserror::Error;

/// Worker pool lifecycle errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Invalid worker count: {0} (must be at least 1)")]
    InvalidWorkerCount(usize),

    #[error("Worker pool is closed")]
    Closed,

    #[error("Worker pool was already shut down")]
    AlreadyShutDown,

    #[error("{0} worker(s) panicked while executing work")]
    WorkerPanicked(usize),
}
