use std::future::Future;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::error::AppError;
use crate::settings::{Settings, StoreBackend};

/// Command-line interface
#[derive(Debug, Parser)]
#[command(name = "txwatch", version, about = "Suspicious transaction monitor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Consume records and persist suspicious transactions
    Consume(ConsumeArgs),
    /// Write synthetic transactions to a file
    Generate(GenerateArgs),
    /// Stream a records file to the first consumer that connects
    Produce(ProduceArgs),
}

/// Consumer overrides; anything unset falls back to `txwatch.toml` and `TXWATCH_*`
#[derive(Debug, Default, Args)]
pub struct ConsumeArgs {
    #[arg(long)]
    pub workers: Option<usize>,

    /// Newline-delimited records file
    #[arg(long, conflicts_with = "source_addr")]
    pub source_file: Option<PathBuf>,

    /// TCP `host:port` streaming newline-delimited records
    #[arg(long)]
    pub source_addr: Option<String>,

    #[arg(long)]
    pub database: Option<String>,

    #[arg(long, value_enum)]
    pub store: Option<StoreBackend>,

    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl ConsumeArgs {
    /// Overlay explicit flags on loaded settings
    pub fn apply(self, settings: &mut Settings) {
        if let Some(workers) = self.workers {
            settings.workers = Some(workers);
        }
        if let Some(path) = self.source_file {
            settings.source_file = Some(path);
            settings.source_addr = None;
        }
        if let Some(addr) = self.source_addr {
            settings.source_addr = Some(addr);
            settings.source_file = None;
        }
        if let Some(database) = self.database {
            settings.database = Some(database);
        }
        if let Some(store) = self.store {
            settings.store_backend = store;
        }
        if let Some(dir) = self.data_dir {
            settings.data_dir = dir;
        }
        if let Some(dir) = self.log_dir {
            settings.log_dir = dir;
        }
    }
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Lower range minimum amount
    #[arg(long)]
    pub llmin: f64,

    /// Lower range maximum amount
    #[arg(long)]
    pub llmax: f64,

    /// Upper range minimum amount
    #[arg(long)]
    pub ulmin: f64,

    /// Upper range maximum amount
    #[arg(long)]
    pub ulmax: f64,

    /// Fraction of records drawn from the lower range (0 to 1)
    #[arg(short, long)]
    pub percentage: f64,

    #[arg(short, long = "total-lines", alias = "totallines")]
    pub total_lines: usize,

    /// Output file; records are appended
    #[arg(short, long)]
    pub file: PathBuf,

    #[arg(long)]
    pub workers: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ProduceArgs {
    /// Newline-delimited records file to publish
    #[arg(short, long)]
    pub file: PathBuf,

    /// `host:port` to accept the consumer connection on
    #[arg(long)]
    pub listen: String,

    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

/// Runs the application future and maps its result to an exit code
/// (0 = success, 1 = error)
pub struct CliApp {
    name: String,
}

impl CliApp {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// This function never returns - it calls std::process::exit with the appropriate code
    pub async fn run<F, Fut>(self, main_fn: F) -> !
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), AppError>>,
    {
        match main_fn().await {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("{}: {}", self.name, e);
                std::process::exit(1);
            }
        }
    }
}
