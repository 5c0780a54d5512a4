use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// Collection that suspicious transactions are persisted into
pub const SUSPICIOUS_COLLECTION: &str = "suspicious_transactions";

/// Persisted document for a flagged transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspiciousTransaction {
    pub transaction_id: i64,
    pub account_number: i64,
    pub transaction_type: String,
    pub transaction_amount: f64,
    pub transaction_time: DateTime<FixedOffset>,
    pub location: String,
}

impl From<&Transaction> for SuspiciousTransaction {
    fn from(tx: &Transaction) -> Self {
        Self {
            transaction_id: tx.transaction_id,
            account_number: tx.account_number,
            transaction_type: tx.transaction_type.clone(),
            transaction_amount: tx.transaction_amount,
            transaction_time: tx.transaction_time,
            location: tx.location.clone(),
        }
    }
}
