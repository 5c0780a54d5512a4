use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Context handed to every executed item
///
/// Carries the process-wide shutdown token. Work may look at it, but the
/// pool never uses it to interrupt an item that is already running.
#[derive(Debug, Clone, Default)]
pub struct WorkContext {
    shutdown: CancellationToken,
}

impl WorkContext {
    pub fn new(shutdown: CancellationToken) -> Self {
        Self { shutdown }
    }

    /// True once shutdown has been requested; in-flight work is draining
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Resolves when shutdown is requested
    pub async fn shutdown_requested(&self) {
        self.shutdown.cancelled().await
    }
}

/// A unit of work dispatched through the pool
///
/// `execute` consumes the boxed item, so every item runs at most once and is
/// dropped as soon as it returns. Failures are handled inside the item; they
/// never travel back to the pool.
#[async_trait]
pub trait Work: Send + 'static {
    async fn execute(self: Box<Self>, ctx: WorkContext);
}
