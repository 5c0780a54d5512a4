use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::error::PublishError;
use crate::io::{RecordSink, RecordSource, SourceError};
use crate::stats::ProducerStats;

/// How publishing ended when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishEnd {
    /// Every record of the source was delivered
    Exhausted,
    /// Shutdown was requested first
    Cancelled,
}

/// Copies records from a source to a sink, one line per record
///
/// Shutdown is cooperative in the same way as ingestion: a read that
/// already completed is still delivered. The first delivery failure ends
/// publishing; a broken connection will not recover on its own.
pub struct Publisher {
    source: Box<dyn RecordSource>,
    sink: Box<dyn RecordSink>,
    stats: Arc<ProducerStats>,
    shutdown: CancellationToken,
}

impl Publisher {
    pub fn new(
        source: Box<dyn RecordSource>,
        sink: Box<dyn RecordSink>,
        stats: Arc<ProducerStats>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            source,
            sink,
            stats,
            shutdown,
        }
    }

    pub fn spawn(self) -> JoinHandle<Result<PublishEnd, PublishError>> {
        tokio::spawn(self.run())
    }

    /// Publish until the source is exhausted, shutdown, or the first failure
    ///
    /// Source and sink are closed on every path.
    pub async fn run(mut self) -> Result<PublishEnd, PublishError> {
        info!("Publisher started");
        let result = self.pump().await;

        if let Err(e) = self.source.close().await {
            warn!(error = %e, "Closing record source");
        }

        match (result, self.sink.close().await) {
            (Ok(end), Ok(())) => {
                info!(end = ?end, published = self.stats.published(), "Publisher stopped");
                Ok(end)
            }
            (Ok(_), Err(e)) => Err(PublishError::Close(e)),
            (Err(e), close) => {
                if let Err(close_err) = close {
                    warn!(error = %close_err, "Closing sink after failure");
                }
                Err(e)
            }
        }
    }

    async fn pump(&mut self) -> Result<PublishEnd, PublishError> {
        loop {
            if self.shutdown.is_cancelled() {
                return Ok(PublishEnd::Cancelled);
            }

            let read = tokio::select! {
                biased;
                read = self.source.read_next() => Some(read),
                _ = self.shutdown.cancelled() => None,
            };

            let payload = match read {
                Some(Ok(payload)) => payload,
                Some(Err(SourceError::EndOfStream)) => return Ok(PublishEnd::Exhausted),
                Some(Err(e)) => {
                    error!(error = %e, "Reading records");
                    return Err(PublishError::Read(e));
                }
                None => return Ok(PublishEnd::Cancelled),
            };

            self.stats.record_published();
            if let Err(e) = self.sink.publish(&payload).await {
                self.stats.record_failed_delivery();
                error!(error = %e, "Delivering record");
                return Err(PublishError::Deliver(e));
            }
        }
    }
}
