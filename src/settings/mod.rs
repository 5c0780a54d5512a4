pub mod consumer;
pub mod error;

// Re-export commonly used types
pub use consumer::{Settings, StoreBackend};
pub use error::ConfigError;
