use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::{SuspiciousTransaction, Transaction};
use crate::pool::{Work, WorkContext};
use crate::stats::{ConsumerStats, Metric};
use crate::storage::SuspiciousStore;

/// Checks one raw record and persists it when suspicious
pub struct TransactionWork {
    payload: Vec<u8>,
    stats: Arc<ConsumerStats>,
    store: Arc<dyn SuspiciousStore>,
}

impl TransactionWork {
    pub fn new(payload: Vec<u8>, stats: Arc<ConsumerStats>, store: Arc<dyn SuspiciousStore>) -> Self {
        Self {
            payload,
            stats,
            store,
        }
    }
}

#[async_trait]
impl Work for TransactionWork {
    async fn execute(self: Box<Self>, ctx: WorkContext) {
        self.stats.increment(Metric::TotalTransactions);

        let transaction = match Transaction::from_slice(&self.payload) {
            Ok(transaction) => transaction,
            Err(e) => {
                self.stats.increment(Metric::MalformedMessages);
                warn!(error = %e, "Checking if transaction is suspicious");
                return;
            }
        };

        if !transaction.is_suspicious() {
            return;
        }

        self.stats.increment(Metric::SuspiciousTransactions);
        info!(
            transaction_id = transaction.transaction_id,
            account_number = transaction.account_number,
            amount = transaction.transaction_amount,
            location = %transaction.location,
            draining = ctx.is_shutting_down(),
            "Suspicious transaction"
        );

        let document = SuspiciousTransaction::from(&transaction);
        if let Err(e) = self.store.insert(&document).await {
            self.stats.increment(Metric::PersistenceErrors);
            error!(
                transaction_id = transaction.transaction_id,
                error = %e,
                "Error inserting suspicious transaction"
            );
        }
    }
}
