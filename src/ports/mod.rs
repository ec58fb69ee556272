pub mod logging;
pub mod storage;

// Re-export all port traits for convenience
pub use logging::DebugLog;
pub use storage::ObjectStorageClient;
