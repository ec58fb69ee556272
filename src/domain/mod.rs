pub mod config;
pub mod errors;
pub mod models;

// Re-export commonly used types
pub use config::{ClientConfig, S3Args};
pub use errors::{ConfigError, StorageError, StorageResult};
pub use models::*;
