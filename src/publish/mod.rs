pub mod error;
pub mod publisher;

// Re-export commonly used types
pub use error::PublishError;
pub use publisher::{PublishEnd, Publisher};
