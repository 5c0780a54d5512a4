use std::future::Future;
use std::io;
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::error::AppError;
use crate::ingest::IngestError;
use crate::pool::WorkerPool;

/// Lifecycle of the consumer as seen by the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Running,
    ShuttingDown,
    Stopped,
}

/// What started the shutdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownTrigger {
    /// External termination request (signal, or the error channel closing unused)
    Termination,
    /// The ingestion loop published a read failure
    IngestionFailure,
}

/// Result of a coordinated shutdown
#[derive(Debug)]
pub struct ShutdownOutcome {
    pub trigger: ShutdownTrigger,
    pub state: CoordinatorState,
    pub result: Result<(), AppError>,
}

/// Waits for the first shutdown trigger and tears the consumer down in order:
/// stop ingestion, wait for it to return, then drain the pool.
///
/// Whichever trigger fires first wins; the other is never observed.
pub struct ShutdownCoordinator {
    pool: Arc<WorkerPool>,
    shutdown: CancellationToken,
    state: CoordinatorState,
}

impl ShutdownCoordinator {
    pub fn new(pool: Arc<WorkerPool>, shutdown: CancellationToken) -> Self {
        Self {
            pool,
            shutdown,
            state: CoordinatorState::Running,
        }
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    pub async fn run<F>(
        mut self,
        termination: F,
        errors: oneshot::Receiver<IngestError>,
        ingestion: JoinHandle<Result<(), IngestError>>,
    ) -> ShutdownOutcome
    where
        F: Future<Output = ()>,
    {
        let (trigger, reported) = tokio::select! {
            _ = termination => {
                info!("Termination requested, start shutdown");
                (ShutdownTrigger::Termination, None)
            }
            received = errors => match received {
                Ok(e) => {
                    error!(error = %e, "Ingestion failed, start shutdown");
                    (ShutdownTrigger::IngestionFailure, Some(e))
                }
                Err(_) => {
                    info!("Ingestion ended without error, start shutdown");
                    (ShutdownTrigger::Termination, None)
                }
            },
        };

        self.state = CoordinatorState::ShuttingDown;
        self.shutdown.cancel();

        let ingestion_result = match ingestion.await {
            Ok(result) => result,
            Err(join_err) => Err(IngestError::Aborted(join_err.to_string())),
        };
        info!("Ingestion stopped, draining worker pool");

        let pool_result = self.pool.shutdown().await;
        self.state = CoordinatorState::Stopped;
        info!("Shutdown complete");

        let result = match (reported, ingestion_result, pool_result) {
            (Some(e), _, pool_result) => {
                if let Err(pool_err) = pool_result {
                    warn!(error = %pool_err, "Worker pool did not drain cleanly");
                }
                Err(AppError::Ingest(e))
            }
            (None, Err(e), _) => Err(AppError::Ingest(e)),
            (None, Ok(()), Err(e)) => Err(AppError::Pool(e)),
            (None, Ok(()), Ok(())) => Ok(()),
        };

        ShutdownOutcome {
            trigger,
            state: self.state,
            result,
        }
    }
}

/// Installs SIGINT, SIGTERM and SIGHUP handlers and resolves on the first signal
///
/// Handlers are registered before returning so a failure surfaces at startup.
pub fn termination_signal() -> io::Result<impl Future<Output = ()>> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sighup = signal(SignalKind::hangup())?;

        Ok(async move {
            tokio::select! {
                _ = sigterm.recv() => info!("Received SIGTERM"),
                _ = sigint.recv() => info!("Received SIGINT"),
                _ = sighup.recv() => info!("Received SIGHUP"),
            }
        })
    }

    #[cfg(not(unix))]
    {
        Ok(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received Ctrl+C"),
                Err(e) => error!(error = %e, "Listening for Ctrl+C"),
            }
        })
    }
}
