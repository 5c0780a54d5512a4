use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use super::error::AppError;

/// Files the long-running modes log to, inside the log directory
pub const CONSUMER_LOG_FILE: &str = "consumer.log";
pub const PRODUCER_LOG_FILE: &str = "producer.log";

/// Level used when `RUST_LOG` is unset or invalid
const DEFAULT_FILTER: &str = "info";

/// Where log records go
#[derive(Debug, Clone)]
pub enum LogTarget {
    /// `<dir>/<file_name>`; keeps stdout free for the statistics screen
    File {
        dir: PathBuf,
        file_name: &'static str,
    },
    Stderr,
}

/// Keeps the background log writer alive; drop it last to flush
#[must_use = "dropping the guard stops the log writer"]
pub struct LogGuard {
    _worker: Option<WorkerGuard>,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber
pub fn init_tracing(target: LogTarget) -> Result<LogGuard, AppError> {
    match target {
        LogTarget::File { dir, file_name } => {
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::never(&dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(env_filter())
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false),
                )
                .try_init()
                .map_err(|e| AppError::Logging(e.to_string()))?;

            Ok(LogGuard {
                _worker: Some(guard),
            })
        }
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(env_filter())
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .map_err(|e| AppError::Logging(e.to_string()))?;

            Ok(LogGuard { _worker: None })
        }
    }
}
