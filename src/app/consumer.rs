use std::future::Future;
use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::coordinator::{ShutdownCoordinator, ShutdownOutcome, termination_signal};
use super::error::AppError;
use super::logging::{CONSUMER_LOG_FILE, LogTarget, init_tracing};
use super::screen::{ConsumerScreen, ScreenFrame, spawn_renderer};
use crate::ingest::IngestionLoop;
use crate::io::{LineSource, RecordSource};
use crate::pool::{WorkContext, WorkerPool};
use crate::settings::{Settings, StoreBackend};
use crate::stats::ConsumerStats;
use crate::storage::{JsonFileStore, MemoryStore, SuspiciousStore};

/// Open the configured source: TCP address, then file, then stdin
pub async fn open_source(settings: &Settings) -> Result<Box<dyn RecordSource>, AppError> {
    let source = match (&settings.source_addr, &settings.source_file) {
        (Some(addr), _) => LineSource::connect(addr).await?,
        (None, Some(path)) => LineSource::open(path).await?,
        (None, None) => LineSource::stdin(),
    };
    Ok(Box::new(source))
}

/// Connect the configured store backend
pub async fn connect_store(settings: &Settings) -> Result<Arc<dyn SuspiciousStore>, AppError> {
    match settings.store_backend {
        StoreBackend::File => {
            let database = settings.database.as_deref().unwrap_or_default();
            let store = JsonFileStore::connect(&settings.data_dir, database).await?;
            info!(path = %store.path().display(), "Connected to store");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            info!("Using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// Run ingestion and workers until `termination` fires or ingestion fails
pub async fn consume<F>(
    source: Box<dyn RecordSource>,
    store: Arc<dyn SuspiciousStore>,
    stats: Arc<ConsumerStats>,
    worker_count: usize,
    termination: F,
) -> Result<ShutdownOutcome, AppError>
where
    F: Future<Output = ()>,
{
    let shutdown = CancellationToken::new();
    let pool = Arc::new(WorkerPool::with_context(
        worker_count,
        WorkContext::new(shutdown.clone()),
    )?);
    info!(workers = worker_count, "Worker pool started");

    let (error_tx, error_rx) = oneshot::channel();
    let ingestion = IngestionLoop::new(
        source,
        Arc::clone(&pool),
        stats,
        store,
        shutdown.clone(),
    )
    .spawn(error_tx);

    Ok(ShutdownCoordinator::new(pool, shutdown)
        .run(termination, error_rx, ingestion)
        .await)
}

/// Consumer entry point: settings to exit status
///
/// Failures are logged while the log writer is still alive.
pub async fn run_consumer(settings: Settings) -> Result<(), AppError> {
    settings.validate()?;
    let _log_guard = init_tracing(LogTarget::File {
        dir: settings.log_dir.clone(),
        file_name: CONSUMER_LOG_FILE,
    })?;
    consumer_main(&settings).await
}

async fn consumer_main(settings: &Settings) -> Result<(), AppError> {
    let result = consumer_session(settings).await;
    if let Err(e) = &result {
        error!(error = %e, "Consumer failed");
    }
    result
}

async fn consumer_session(settings: &Settings) -> Result<(), AppError> {
    info!("Initializing consumer");

    let store = connect_store(settings).await?;
    let source = open_source(settings).await?;
    let termination = termination_signal()?;

    let stats = Arc::new(ConsumerStats::new());
    let render_stop = CancellationToken::new();
    let renderer = spawn_renderer(
        ConsumerScreen::new(ScreenFrame::stdout(), stats.clone()),
        Arc::clone(&stats),
        Instant::now(),
        render_stop.clone(),
    );

    let outcome = consume(
        source,
        store,
        Arc::clone(&stats),
        settings.worker_count(),
        termination,
    )
    .await;

    render_stop.cancel();
    if let Err(e) = renderer.await {
        warn!(error = %e, "Renderer task failed");
    }

    let outcome = outcome?;
    info!(
        trigger = ?outcome.trigger,
        stats = ?stats.snapshot(),
        "Consumer stopped"
    );
    outcome.result
}
