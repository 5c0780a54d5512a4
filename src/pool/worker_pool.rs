use std::sync::{Arc, Mutex, PoisonError};

use futures::future::join_all;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::error::PoolError;
use super::work::{Work, WorkContext};

/// A submitted item plus the acknowledgement its submitter is waiting on
type Job = (Box<dyn Work>, oneshot::Sender<()>);

type SharedReceiver = Arc<tokio::sync::Mutex<mpsc::Receiver<Job>>>;

/// Number of workers to run when none is configured
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Fixed-size pool of workers fed by a synchronous hand-off
///
/// `submit` returns only once an idle worker has taken the item, so a burst
/// of submissions is throttled to the speed of the workers instead of piling
/// up in a queue. At most `worker_count` items execute at the same time.
///
/// # Example
/// ```rust,ignore
/// let pool = WorkerPool::new(default_worker_count())?;
/// pool.submit(Box::new(work)).await?;
/// pool.shutdown().await?;
/// ```
pub struct WorkerPool {
    sender: Mutex<Option<mpsc::Sender<Job>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    worker_count: usize,
}

impl WorkerPool {
    /// Start `worker_count` workers with a context that is never cancelled
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(worker_count: usize) -> Result<Self, PoolError> {
        Self::with_context(worker_count, WorkContext::default())
    }

    /// Start `worker_count` workers sharing the given context
    pub fn with_context(worker_count: usize, ctx: WorkContext) -> Result<Self, PoolError> {
        if worker_count == 0 {
            return Err(PoolError::InvalidWorkerCount(worker_count));
        }

        // Capacity 1 is the smallest tokio allows; the ack below is what
        // makes the hand-off synchronous.
        let (sender, receiver) = mpsc::channel::<Job>(1);
        let receiver: SharedReceiver = Arc::new(tokio::sync::Mutex::new(receiver));

        let workers = (0..worker_count)
            .map(|worker_id| {
                tokio::spawn(run_worker(worker_id, Arc::clone(&receiver), ctx.clone()))
            })
            .collect();

        debug!(worker_count, "Worker pool started");

        Ok(Self {
            sender: Mutex::new(Some(sender)),
            workers: Mutex::new(workers),
            worker_count,
        })
    }

    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Hand an item to an idle worker, waiting until one accepts it
    ///
    /// Returns `PoolError::Closed` once shutdown has begun. If this future is
    /// dropped before a worker accepts the item, the item is discarded
    /// without running.
    pub async fn submit(&self, work: Box<dyn Work>) -> Result<(), PoolError> {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(PoolError::Closed)?;

        let (ack_tx, ack_rx) = oneshot::channel();
        sender
            .send((work, ack_tx))
            .await
            .map_err(|_| PoolError::Closed)?;
        drop(sender);

        ack_rx.await.map_err(|_| PoolError::Closed)
    }

    /// Close intake and wait for every worker to finish its current item
    ///
    /// A second call returns `PoolError::AlreadyShutDown`.
    pub async fn shutdown(&self) -> Result<(), PoolError> {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if sender.is_none() {
            return Err(PoolError::AlreadyShutDown);
        }
        drop(sender);

        let handles = std::mem::take(
            &mut *self.workers.lock().unwrap_or_else(PoisonError::into_inner),
        );

        debug!(workers = handles.len(), "Waiting for workers to drain");

        let panicked = join_all(handles)
            .await
            .into_iter()
            .filter(|result| result.is_err())
            .count();

        if panicked > 0 {
            error!(panicked, "Worker pool shut down with panicked workers");
            return Err(PoolError::WorkerPanicked(panicked));
        }

        debug!("Worker pool stopped");
        Ok(())
    }
}

/// Receive, acknowledge, execute; until the channel is closed and empty
async fn run_worker(worker_id: usize, jobs: SharedReceiver, ctx: WorkContext) {
    loop {
        let job = jobs.lock().await.recv().await;
        let Some((work, ack)) = job else {
            break;
        };

        if ack.send(()).is_err() {
            debug!(worker_id, "Submitter went away before hand-off, dropping work");
            continue;
        }

        work.execute(ctx.clone()).await;
    }

    debug!(worker_id, "Worker exiting");
}
