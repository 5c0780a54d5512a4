use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinError;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::coordinator::termination_signal;
use super::error::AppError;
use super::logging::{LogTarget, PRODUCER_LOG_FILE, init_tracing};
use super::screen::{ProducerScreen, ScreenFrame, spawn_renderer};
use crate::io::{LineSink, LineSource, RecordSink, RecordSource};
use crate::publish::{PublishEnd, PublishError, Publisher};
use crate::stats::ProducerStats;

fn joined(result: Result<Result<PublishEnd, PublishError>, JoinError>) -> Result<PublishEnd, AppError> {
    match result {
        Ok(published) => Ok(published?),
        Err(join_err) => Err(PublishError::Aborted(join_err.to_string()).into()),
    }
}

/// Publish `source` into `sink` until it is exhausted, fails, or `termination` fires
///
/// On termination the publisher is cancelled and awaited, so the sink is
/// always flushed and closed before this returns.
pub async fn produce<F>(
    source: Box<dyn RecordSource>,
    sink: Box<dyn RecordSink>,
    stats: Arc<ProducerStats>,
    termination: F,
) -> Result<PublishEnd, AppError>
where
    F: Future<Output = ()>,
{
    let shutdown = CancellationToken::new();
    let mut publisher = Publisher::new(source, sink, stats, shutdown.clone()).spawn();

    tokio::select! {
        result = &mut publisher => joined(result),
        _ = termination => {
            info!("Termination requested, start shutdown");
            shutdown.cancel();
            joined(publisher.await)
        }
    }
}

/// Producer entry point: stream `file` to the first consumer that connects to `listen`
pub async fn run_producer(file: PathBuf, listen: String, log_dir: PathBuf) -> Result<(), AppError> {
    let _log_guard = init_tracing(LogTarget::File {
        dir: log_dir,
        file_name: PRODUCER_LOG_FILE,
    })?;
    producer_main(&file, &listen).await
}

async fn producer_main(file: &Path, listen: &str) -> Result<(), AppError> {
    let result = producer_session(file, listen).await;
    if let Err(e) = &result {
        error!(error = %e, "Producer failed");
    }
    result
}

async fn producer_session(file: &Path, listen: &str) -> Result<(), AppError> {
    info!("Initializing producer");

    let source = LineSource::open(file).await?;
    let termination = termination_signal()?;
    tokio::pin!(termination);

    let sink = tokio::select! {
        sink = LineSink::listen(listen) => sink?,
        _ = &mut termination => {
            info!("Terminated before a consumer connected");
            return Ok(());
        }
    };

    let stats = Arc::new(ProducerStats::new());
    let render_stop = CancellationToken::new();
    let renderer = spawn_renderer(
        ProducerScreen::new(ScreenFrame::stdout(), Arc::clone(&stats)),
        Arc::clone(&stats),
        Instant::now(),
        render_stop.clone(),
    );

    let end = produce(Box::new(source), Box::new(sink), Arc::clone(&stats), termination).await;

    render_stop.cancel();
    if let Err(e) = renderer.await {
        warn!(error = %e, "Renderer task failed");
    }

    let end = end?;
    info!(end = ?end, stats = ?stats.snapshot(), "Producer completed");
    Ok(())
}
