use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

const METRIC_COUNT: usize = 4;

/// Named outcome counters tracked by the consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    TotalTransactions,
    SuspiciousTransactions,
    MalformedMessages,
    PersistenceErrors,
}

impl Metric {
    pub const ALL: [Metric; METRIC_COUNT] = [
        Metric::TotalTransactions,
        Metric::SuspiciousTransactions,
        Metric::MalformedMessages,
        Metric::PersistenceErrors,
    ];

    /// Human-facing label used by the screen
    pub fn label(self) -> &'static str {
        match self {
            Metric::TotalTransactions => "Total processed transactions",
            Metric::SuspiciousTransactions => "Suspicious transactions",
            Metric::MalformedMessages => "Invalid messages",
            Metric::PersistenceErrors => "Total DB errors",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Read side of the counters, consumed by the screen
pub trait StatsReader: Send + Sync {
    fn read(&self, metric: Metric) -> u64;

    fn elapsed(&self) -> Duration;
}

/// Write side of the elapsed time, driven by the renderer tick
pub trait ElapsedRecorder: Send + Sync {
    fn set_elapsed(&self, elapsed: Duration);
}

/// Lock-free consumer counters
///
/// Each metric is an independent atomic, so a reader may observe metrics
/// from slightly different instants. Counters only ever grow; the elapsed
/// time is overwritten on every tick.
#[derive(Debug, Default)]
pub struct ConsumerStats {
    counters: [AtomicU64; METRIC_COUNT],
    elapsed_nanos: AtomicU64,
}

impl ConsumerStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&self, metric: Metric) {
        self.counters[metric.index()].fetch_add(1, Ordering::Relaxed);
    }

    pub fn read(&self, metric: Metric) -> u64 {
        self.counters[metric.index()].load(Ordering::Relaxed)
    }

    pub fn set_elapsed(&self, elapsed: Duration) {
        let nanos = u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX);
        self.elapsed_nanos.store(nanos, Ordering::Relaxed);
    }

    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.elapsed_nanos.load(Ordering::Relaxed))
    }

    /// Copy every metric into a plain value
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_transactions: self.read(Metric::TotalTransactions),
            suspicious_transactions: self.read(Metric::SuspiciousTransactions),
            malformed_messages: self.read(Metric::MalformedMessages),
            persistence_errors: self.read(Metric::PersistenceErrors),
            elapsed: self.elapsed(),
        }
    }
}

impl StatsReader for ConsumerStats {
    fn read(&self, metric: Metric) -> u64 {
        ConsumerStats::read(self, metric)
    }

    fn elapsed(&self) -> Duration {
        ConsumerStats::elapsed(self)
    }
}

impl ElapsedRecorder for ConsumerStats {
    fn set_elapsed(&self, elapsed: Duration) {
        ConsumerStats::set_elapsed(self, elapsed)
    }
}

/// Point-in-time copy of the counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub total_transactions: u64,
    pub suspicious_transactions: u64,
    pub malformed_messages: u64,
    pub persistence_errors: u64,
    pub elapsed: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn new_stats_are_zero() {
        let stats = ConsumerStats::new();

        for metric in Metric::ALL {
            assert_eq!(stats.read(metric), 0);
        }
        assert_eq!(stats.elapsed(), Duration::ZERO);
    }

    #[test]
    fn metrics_are_independent() {
        let stats = ConsumerStats::new();

        stats.increment(Metric::TotalTransactions);
        stats.increment(Metric::TotalTransactions);
        stats.increment(Metric::PersistenceErrors);

        assert_eq!(stats.read(Metric::TotalTransactions), 2);
        assert_eq!(stats.read(Metric::PersistenceErrors), 1);
        assert_eq!(stats.read(Metric::SuspiciousTransactions), 0);
        assert_eq!(stats.read(Metric::MalformedMessages), 0);
    }

    #[test]
    fn elapsed_is_overwritten_not_accumulated() {
        let stats = ConsumerStats::new();

        stats.set_elapsed(Duration::from_secs(5));
        stats.set_elapsed(Duration::from_secs(2));

        assert_eq!(stats.elapsed(), Duration::from_secs(2));
    }

    #[test]
    fn concurrent_increments_sum_exactly() {
        let stats = Arc::new(ConsumerStats::new());
        let threads = 16;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let stats = Arc::clone(&stats);
                thread::spawn(move || stats.increment(Metric::TotalTransactions))
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(stats.read(Metric::TotalTransactions), threads);
    }

    #[test]
    fn concurrent_reader_sees_monotonic_values() {
        let stats = Arc::new(ConsumerStats::new());

        let writer = {
            let stats = Arc::clone(&stats);
            thread::spawn(move || {
                for _ in 0..10_000 {
                    stats.increment(Metric::SuspiciousTransactions);
                }
            })
        };

        let mut last = 0;
        while !writer.is_finished() {
            let current = stats.read(Metric::SuspiciousTransactions);
            assert!(current >= last);
            last = current;
        }
        writer.join().unwrap();

        assert_eq!(stats.read(Metric::SuspiciousTransactions), 10_000);
    }

    #[test]
    fn snapshot_copies_all_metrics() {
        let stats = ConsumerStats::new();
        stats.increment(Metric::TotalTransactions);
        stats.increment(Metric::MalformedMessages);
        stats.set_elapsed(Duration::from_millis(1500));

        let snapshot = stats.snapshot();

        assert_eq!(
            snapshot,
            StatsSnapshot {
                total_transactions: 1,
                suspicious_transactions: 0,
                malformed_messages: 1,
                persistence_errors: 0,
                elapsed: Duration::from_millis(1500),
            }
        );
    }

    #[test]
    fn labels_are_distinct() {
        let labels: std::collections::HashSet<_> = Metric::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(labels.len(), Metric::ALL.len());
    }
}
