use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Amounts strictly above this value are flagged as suspicious
pub const SUSPICIOUS_AMOUNT: f64 = 10_000.0;

/// A single transaction as carried on the wire (one JSON object per record)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: i64,
    pub account_number: i64,
    pub transaction_type: String,
    pub transaction_amount: f64,
    pub transaction_time: DateTime<FixedOffset>,
    pub location: String,
}

impl Transaction {
    /// Decode a raw payload into a transaction
    pub fn from_slice(payload: &[u8]) -> Result<Self, DomainError> {
        serde_json::from_slice(payload).map_err(DomainError::from)
    }

    /// Encode as a single JSON line (without the trailing newline)
    pub fn to_json(&self) -> Result<String, DomainError> {
        serde_json::to_string(self).map_err(DomainError::from)
    }

    pub fn is_suspicious(&self) -> bool {
        self.transaction_amount > SUSPICIOUS_AMOUNT
    }
}
