use std::sync::Arc;

use clap::Parser;
use tracing::error;
use txwatch::prelude::*;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    CliApp::new("txwatch")
        .run(|| async move {
            match cli.command {
                Command::Consume(args) => run_consume(args).await,
                Command::Generate(args) => run_generate(args).await,
                Command::Produce(args) => run_produce(args).await,
            }
        })
        .await
}

/// Settings from file and environment, overridden by flags
async fn run_consume(args: ConsumeArgs) -> Result<(), AppError> {
    let mut settings = Settings::load()?;
    args.apply(&mut settings);
    run_consumer(settings).await
}

async fn run_produce(args: ProduceArgs) -> Result<(), AppError> {
    let settings = Settings::load()?;
    let log_dir = args.log_dir.unwrap_or(settings.log_dir);
    run_producer(args.file, args.listen, log_dir).await
}

async fn run_generate(args: GenerateArgs) -> Result<(), AppError> {
    let _log_guard = init_tracing(LogTarget::Stderr)?;

    let result = generate_file(args).await;
    if let Err(e) = &result {
        error!(error = %e, "Generation failed");
    }
    result
}

async fn generate_file(args: GenerateArgs) -> Result<(), AppError> {
    let params = GenerateParams {
        lower: AmountRange::new(args.llmin, args.llmax)?,
        upper: AmountRange::new(args.ulmin, args.ulmax)?,
        percentage: args.percentage,
        total: args.total_lines,
        path: args.file,
    };
    let workers = args.workers.unwrap_or_else(default_worker_count);
    let factory = Arc::new(TransactionFactory::from_entropy());

    let summary = generate(params, factory, workers).await?;
    eprintln!(
        "Wrote {} transactions ({} lower range, {} upper range)",
        summary.lower_count + summary.upper_count,
        summary.lower_count,
        summary.upper_count
    );
    Ok(())
}
