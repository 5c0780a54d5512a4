use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::info;

use super::error::StoreError;
use super::traits::SuspiciousStore;
use crate::domain::{SUSPICIOUS_COLLECTION, SuspiciousTransaction};

/// Append-only JSON-lines store
///
/// Addressed by a data directory and a database name; documents land in
/// `<data_dir>/<database>/suspicious_transactions.jsonl`, one per line.
pub struct JsonFileStore {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonFileStore {
    /// Create the database directory if needed and open the collection file
    pub async fn connect(data_dir: impl AsRef<Path>, database: &str) -> Result<Self, StoreError> {
        let directory = data_dir.as_ref().join(database);
        tokio::fs::create_dir_all(&directory)
            .await
            .map_err(|source| StoreError::Connect {
                path: directory.clone(),
                source,
            })?;

        let path = directory.join(format!("{SUSPICIOUS_COLLECTION}.jsonl"));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|source| StoreError::Connect {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), "Connected to suspicious transaction store");

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SuspiciousStore for JsonFileStore {
    async fn insert(&self, record: &SuspiciousTransaction) -> Result<(), StoreError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        // One writer at a time keeps lines from interleaving
        let mut file = self.file.lock().await;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }
}
