use std::path::PathBuf;
use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{error, info};

use super::error::AppError;
use crate::pool::WorkerPool;
use crate::settings::ConfigError;
use crate::workers::{AmountRange, GeneratorWork, TransactionFactory};

/// What to generate and where
#[derive(Debug, Clone)]
pub struct GenerateParams {
    pub lower: AmountRange,
    pub upper: AmountRange,
    /// Fraction of records drawn from `lower`, in `[0, 1]`
    pub percentage: f64,
    pub total: usize,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateSummary {
    pub lower_count: usize,
    pub upper_count: usize,
}

/// Split `total` into lower-range and upper-range counts
pub fn split_counts(total: usize, percentage: f64) -> Result<GenerateSummary, ConfigError> {
    if !(0.0..=1.0).contains(&percentage) {
        return Err(ConfigError::InvalidPercentage(percentage));
    }
    let lower_count = ((total as f64 * percentage).floor() as usize).min(total);
    Ok(GenerateSummary {
        lower_count,
        upper_count: total - lower_count,
    })
}

/// One range per record, shuffled so the two kinds interleave
fn plan<R: Rng + ?Sized>(
    params: &GenerateParams,
    summary: GenerateSummary,
    rng: &mut R,
) -> Vec<AmountRange> {
    let mut ranges: Vec<AmountRange> = std::iter::repeat_n(params.lower, summary.lower_count)
        .chain(std::iter::repeat_n(params.upper, summary.upper_count))
        .collect();
    ranges.shuffle(rng);
    ranges
}

/// Append `total` synthetic transactions to `params.path` using `workers` workers
///
/// Returns once every record has been handed out and the pool has drained.
pub async fn generate(
    params: GenerateParams,
    factory: Arc<TransactionFactory>,
    workers: usize,
) -> Result<GenerateSummary, AppError> {
    let summary = split_counts(params.total, params.percentage)?;
    let ranges = plan(&params, summary, &mut rand::thread_rng());
    let pool = WorkerPool::new(workers)?;
    let path = Arc::new(params.path);

    info!(
        path = %path.display(),
        lower = summary.lower_count,
        lower_min = params.lower.min(),
        lower_max = params.lower.max(),
        upper = summary.upper_count,
        upper_min = params.upper.min(),
        upper_max = params.upper.max(),
        workers,
        "Generating transactions"
    );

    for range in ranges {
        let work = GeneratorWork::new(Arc::clone(&path), range, Arc::clone(&factory));
        if let Err(e) = pool.submit(Box::new(work)).await {
            error!(error = %e, "Submitting generator work");
            pool.shutdown().await?;
            return Err(e.into());
        }
    }

    pool.shutdown().await?;
    info!(path = %path.display(), "Generation complete");

    Ok(summary)
}
