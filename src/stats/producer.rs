use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::counters::ElapsedRecorder;

/// Lock-free producer counters: published records and failed deliveries
#[derive(Debug, Default)]
pub struct ProducerStats {
    published: AtomicU64,
    failed_deliveries: AtomicU64,
    elapsed_nanos: AtomicU64,
}

impl ProducerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_published(&self) {
        self.published.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failed_delivery(&self) {
        self.failed_deliveries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    pub fn failed_deliveries(&self) -> u64 {
        self.failed_deliveries.load(Ordering::Relaxed)
    }

    pub fn set_elapsed(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.elapsed_nanos.store(nanos, Ordering::Relaxed);
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.load(Ordering::Relaxed))
    }

    pub fn snapshot(&self) -> ProducerSnapshot {
        ProducerSnapshot {
            published: self.published(),
            failed_deliveries: self.failed_deliveries(),
            elapsed: self.elapsed(),
        }
    }
}

impl ElapsedRecorder for ProducerStats {
    fn set_elapsed(&self, elapsed: Duration) {
        ProducerStats::set_elapsed(self, elapsed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProducerSnapshot {
    pub published: u64,
    pub failed_deliveries: u64,
    pub elapsed: Duration,
}
