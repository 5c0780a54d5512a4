use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::error;

use super::random::{AmountRange, TransactionFactory};
use crate::pool::{Work, WorkContext};

/// Appends one synthetic transaction as a JSON line to `path`
pub struct GeneratorWork {
    path: Arc<PathBuf>,
    range: AmountRange,
    factory: Arc<TransactionFactory>,
}

impl GeneratorWork {
    pub fn new(path: Arc<PathBuf>, range: AmountRange, factory: Arc<TransactionFactory>) -> Self {
        Self {
            path,
            range,
            factory,
        }
    }
}

#[async_trait]
impl Work for GeneratorWork {
    async fn execute(self: Box<Self>, _ctx: WorkContext) {
        let transaction = self.factory.generate(self.range);

        let mut line = match transaction.to_json() {
            Ok(line) => line,
            Err(e) => {
                error!(error = %e, "Error serializing transaction");
                return;
            }
        };
        line.push('\n');

        let mut file = match OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path.as_path())
            .await
        {
            Ok(file) => file,
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "Error opening file");
                return;
            }
        };

        if let Err(e) = file.write_all(line.as_bytes()).await {
            error!(path = %self.path.display(), error = %e, "Error writing to file");
            return;
        }
        if let Err(e) = file.flush().await {
            error!(path = %self.path.display(), error = %e, "Error flushing file");
        }
    }
}
