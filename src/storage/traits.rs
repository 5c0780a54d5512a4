use std::sync::Arc;

use async_trait::async_trait;

use super::error::StoreError;
use crate::domain::SuspiciousTransaction;

/// Durable sink for flagged transactions
#[async_trait]
pub trait SuspiciousStore: Send + Sync {
    /// Persist one document; called at most once per flagged record
    async fn insert(&self, record: &SuspiciousTransaction) -> Result<(), StoreError>;
}

// Allow sharing one store between every worker
#[async_trait]
impl<S: SuspiciousStore + ?Sized> SuspiciousStore for Arc<S> {
    async fn insert(&self, record: &SuspiciousTransaction) -> Result<(), StoreError> {
        (**self).insert(record).await
    }
}
