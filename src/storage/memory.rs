use async_trait::async_trait;
use dashmap::DashMap;

use super::error::StoreError;
use super::traits::SuspiciousStore;
use crate::domain::SuspiciousTransaction;

/// DashMap-backed in-process store (lock-free, thread-safe)
///
/// Documents are keyed by transaction id; a later insert with the same id
/// replaces the earlier one.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<i64, SuspiciousTransaction>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns a clone, not a reference
    pub fn get(&self, transaction_id: i64) -> Option<SuspiciousTransaction> {
        self.records.get(&transaction_id).map(|r| r.clone())
    }
}

#[async_trait]
impl SuspiciousStore for MemoryStore {
    async fn insert(&self, record: &SuspiciousTransaction) -> Result<(), StoreError> {
        self.records.insert(record.transaction_id, record.clone());
        Ok(())
    }
}
