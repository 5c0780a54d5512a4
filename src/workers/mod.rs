pub mod generator;
pub mod random;
pub mod transaction;

// Re-export commonly used types
pub use generator::GeneratorWork;
pub use random::{AmountRange, Clock, LOCATIONS, SystemClock, TransactionFactory};
pub use transaction::TransactionWork;
