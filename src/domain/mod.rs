pub mod error;
pub mod suspicious;
pub mod transaction;

// Re-export commonly used types
pub use error::DomainError;
pub use suspicious::{SUSPICIOUS_COLLECTION, SuspiciousTransaction};
pub use transaction::{SUSPICIOUS_AMOUNT, Transaction};
