use std::ops::RangeInclusive;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, FixedOffset, Local, TimeDelta};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::Transaction;
use crate::settings::ConfigError;

const TRANSACTION_ID_RANGE: RangeInclusive<i64> = 1_111_111_111..=9_999_999_999;
const ACCOUNT_NUMBER_RANGE: RangeInclusive<i64> = 111_111_111..=999_999_999;
const SECONDS_PER_DAY: i64 = 86_400;
const GENERATED_TYPE: &str = "withdrawal";

/// Locations synthetic transactions are drawn from
pub const LOCATIONS: [&str; 20] = [
    "New York, NY",
    "Los Angeles, CA",
    "Chicago, IL",
    "Houston, TX",
    "Phoenix, AZ",
    "Philadelphia, PA",
    "San Antonio, TX",
    "San Diego, CA",
    "Dallas, TX",
    "San Jose, CA",
    "Austin, TX",
    "Jacksonville, FL",
    "Fort Worth, TX",
    "Columbus, OH",
    "Charlotte, NC",
    "San Francisco, CA",
    "Indianapolis, IN",
    "Seattle, WA",
    "Denver, CO",
    "Washington, DC",
];

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Half-open `[min, max)` amount range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmountRange {
    min: f64,
    max: f64,
}

impl AmountRange {
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(ConfigError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

/// Builds random transactions from an injected RNG and clock
pub struct TransactionFactory {
    rng: Mutex<StdRng>,
    clock: Box<dyn Clock>,
}

impl TransactionFactory {
    pub fn new(rng: StdRng, clock: impl Clock + 'static) -> Self {
        Self {
            rng: Mutex::new(rng),
            clock: Box::new(clock),
        }
    }

    /// Entropy-seeded RNG and the system clock
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy(), SystemClock)
    }

    /// A withdrawal with an amount in `range`, timed within the last 24 hours
    pub fn generate(&self, range: AmountRange) -> Transaction {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let transaction_id = rng.gen_range(TRANSACTION_ID_RANGE);
        let account_number = rng.gen_range(ACCOUNT_NUMBER_RANGE);
        let raw_amount = if range.min < range.max {
            rng.gen_range(range.min..range.max)
        } else {
            range.min
        };
        let seconds_ago = rng.gen_range(0..SECONDS_PER_DAY);
        let location = LOCATIONS[rng.gen_range(0..LOCATIONS.len())];
        drop(rng);

        Transaction {
            transaction_id,
            account_number,
            transaction_type: GENERATED_TYPE.to_string(),
            transaction_amount: to_cents(raw_amount, range),
            transaction_time: self.clock.now() - TimeDelta::seconds(seconds_ago),
            location: location.to_string(),
        }
    }
}

/// Truncate to two decimals without leaving `[min, max)`
fn to_cents(amount: f64, range: AmountRange) -> f64 {
    ((amount * 100.0).floor() / 100.0).max(range.min)
}
