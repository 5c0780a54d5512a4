use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::error::IngestError;
use crate::io::RecordSource;
use crate::pool::WorkerPool;
use crate::stats::ConsumerStats;
use crate::storage::SuspiciousStore;
use crate::workers::TransactionWork;

/// Pulls records from the source and hands each one to the pool
///
/// Shutdown is cooperative: the token is checked between reads, and a read
/// still pending when it fires is abandoned and the source closed. A read
/// that already completed is always submitted.
pub struct IngestionLoop {
    source: Box<dyn RecordSource>,
    pool: Arc<WorkerPool>,
    stats: Arc<ConsumerStats>,
    store: Arc<dyn SuspiciousStore>,
    shutdown: CancellationToken,
}

impl IngestionLoop {
    pub fn new(
        source: Box<dyn RecordSource>,
        pool: Arc<WorkerPool>,
        stats: Arc<ConsumerStats>,
        store: Arc<dyn SuspiciousStore>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            source,
            pool,
            stats,
            store,
            shutdown,
        }
    }

    /// Run the loop on its own task
    pub fn spawn(self, errors: oneshot::Sender<IngestError>) -> JoinHandle<Result<(), IngestError>> {
        tokio::spawn(self.run(errors))
    }

    /// Read, wrap, submit; until shutdown or the first read error
    ///
    /// A read error is published on `errors` exactly once and the loop
    /// returns without retrying.
    pub async fn run(mut self, errors: oneshot::Sender<IngestError>) -> Result<(), IngestError> {
        info!("Ingestion loop started");

        loop {
            if self.shutdown.is_cancelled() {
                return self.close_source().await;
            }

            let read = tokio::select! {
                biased;
                read = self.source.read_next() => Some(read),
                _ = self.shutdown.cancelled() => None,
            };

            let payload = match read {
                Some(Ok(payload)) => payload,
                Some(Err(e)) => {
                    error!(error = %e, "Reading from source");
                    if let Err(close_err) = self.source.close().await {
                        warn!(error = %close_err, "Closing source after read failure");
                    }
                    if errors.send(IngestError::Read(e)).is_err() {
                        debug!("Read error dropped, shutdown already under way");
                    }
                    return Ok(());
                }
                None => return self.close_source().await,
            };

            let work = TransactionWork::new(payload, Arc::clone(&self.stats), Arc::clone(&self.store));
            self.pool.submit(Box::new(work)).await?;
        }
    }

    async fn close_source(&mut self) -> Result<(), IngestError> {
        info!("Start shutdown, closing source");
        self.source.close().await.map_err(IngestError::Close)
    }
}
