pub mod error;
pub mod json_file;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::SuspiciousStore;
