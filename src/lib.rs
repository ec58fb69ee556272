pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - configuration, responses and errors
pub use domain::{
    // Configuration
    ClientConfig,
    ConfigError,
    // Responses
    DeleteObjectOutput,
    GetObjectOutput,
    ObjectBody,
    PutObjectOutput,
    ResponseMetadata,
    S3Args,
    // Errors
    StorageError,
    StorageResult,
};

// Port types - interfaces for external systems
pub use ports::{DebugLog, ObjectStorageClient};

// The facade
pub use services::{StorageClient, CHECK_TIMESTAMP_FORMAT, DEFAULT_CHECK_KEY, LINE_SEPARATOR};

// Application factory and configuration
pub use app::{
    config_from_lookup, create_client_from_env, create_in_memory_client, create_s3_client,
    load_config_file, AppError, ClientBuilder, StorageBackend,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{
    logging::InMemoryDebugLog,
    storage::{ApacheObjectStoreAdapter, InMemoryStoreProvider, S3StoreProvider, StoreProvider},
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        create_client_from_env, create_in_memory_client, create_s3_client, ApacheObjectStoreAdapter,
        ClientBuilder, ClientConfig, DebugLog, InMemoryDebugLog, ObjectStorageClient, S3Args,
        StorageClient,
    };
}
