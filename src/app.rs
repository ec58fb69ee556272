use serde_json::Value;
use std::{collections::HashMap, path::Path, sync::Arc};

use crate::{
    adapters::outbound::storage::ApacheObjectStoreAdapter,
    domain::{
        config::{ClientConfig, S3Args},
        errors::ConfigError,
    },
    ports::{logging::DebugLog, storage::ObjectStorageClient},
    services::StorageClient,
};

/// Storage backend selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StorageBackend {
    /// S3-compatible service configured through `args`
    #[default]
    S3,
    /// Process-local store, for development and tests
    InMemory,
}

/// Builder for wiring a StorageClient with its collaborators
#[derive(Default)]
pub struct ClientBuilder {
    config: Option<ClientConfig>,
    backend: StorageBackend,
    store: Option<Arc<dyn ObjectStorageClient>>,
    debug_log: Option<Arc<dyn DebugLog>>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_storage_backend(mut self, backend: StorageBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Use a ready-made storage capability; takes precedence over the backend
    pub fn with_store(mut self, store: Arc<dyn ObjectStorageClient>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_debug_log(mut self, debug_log: Arc<dyn DebugLog>) -> Self {
        self.debug_log = Some(debug_log);
        self
    }

    pub fn build(self) -> Result<StorageClient, AppError> {
        let config = self.config.ok_or_else(|| AppError::Configuration {
            message: "client configuration is required".to_string(),
        })?;

        let client = match (self.store, self.backend) {
            (Some(store), _) => StorageClient::with_store(config, store),
            (None, StorageBackend::InMemory) => {
                StorageClient::with_store(config, Arc::new(ApacheObjectStoreAdapter::in_memory()))
            }
            (None, StorageBackend::S3) => StorageClient::new(config)?,
        };

        Ok(match self.debug_log {
            Some(debug_log) => client.with_debug_log(debug_log),
            None => client,
        })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Convenience functions for common configurations
///
/// Create an S3-backed client from a raw configuration map
pub fn create_s3_client(config: Value) -> Result<StorageClient, AppError> {
    Ok(StorageClient::from_value(config)?)
}

/// Create an in-memory client for testing and development
pub fn create_in_memory_client(bucket_name: &str, is_debugging: bool) -> StorageClient {
    let config = ClientConfig::new(bucket_name, S3Args::new()).with_debugging(is_debugging);
    StorageClient::with_store(config, Arc::new(ApacheObjectStoreAdapter::in_memory()))
}

/// Create an S3-backed client from environment variables, with a `.env`
/// file in the working directory filling in whatever is not set
pub fn create_client_from_env() -> Result<StorageClient, AppError> {
    let lookup = with_dotenv(|name| std::env::var(name).ok(), dotenvy::dotenv_iter().ok())?;
    let config = config_from_lookup(lookup)?;
    Ok(StorageClient::new(config)?)
}

/// Layer `.env` entries under `lookup`; variables already set win, as with
/// `dotenvy::dotenv`
fn with_dotenv<F, R>(
    lookup: F,
    dotenv: Option<dotenvy::Iter<R>>,
) -> Result<impl Fn(&str) -> Option<String>, AppError>
where
    F: Fn(&str) -> Option<String>,
    R: std::io::Read,
{
    let mut file_vars = HashMap::new();
    for item in dotenv.into_iter().flatten() {
        let (name, value) = item.map_err(|e| AppError::Configuration {
            message: format!("Invalid .env file: {}", e),
        })?;
        file_vars.insert(name, value);
    }

    Ok(move |name: &str| lookup(name).or_else(|| file_vars.get(name).cloned()))
}

/// Build a client configuration from `S3_*` variables.
///
/// `S3_BUCKET` is required; region defaults to `us-east-1`.
pub fn config_from_lookup<F>(lookup: F) -> Result<ClientConfig, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let bucket = lookup("S3_BUCKET").ok_or_else(|| AppError::Configuration {
        message: "S3_BUCKET environment variable required".to_string(),
    })?;

    let region = lookup("S3_REGION").unwrap_or_else(|| "us-east-1".to_string());
    let mut args = S3Args::new().with("region", region);

    if let Some(endpoint) = lookup("S3_ENDPOINT") {
        args = args.with("endpoint", endpoint);
    }

    match (lookup("S3_ACCESS_KEY"), lookup("S3_SECRET_KEY")) {
        (Some(key), Some(secret)) => {
            args = args.with("credentials", serde_json::json!({ "key": key, "secret": secret }));
        }
        (None, None) => {}
        _ => {
            return Err(AppError::Configuration {
                message: "S3_ACCESS_KEY and S3_SECRET_KEY must be set together".to_string(),
            });
        }
    }

    if let Some(path_style) = lookup("S3_USE_PATH_STYLE") {
        args = args.with("use_path_style_endpoint", path_style.to_lowercase() == "true");
    }

    let is_debugging = lookup("S3_DEBUG")
        .map(|v| v.to_lowercase() == "true")
        .unwrap_or(false);

    Ok(ClientConfig::new(bucket, args).with_debugging(is_debugging))
}

/// Load a client configuration from a JSON file, optionally from a named
/// section of a larger application config.
pub fn load_config_file(
    path: impl AsRef<Path>,
    section: Option<&str>,
) -> Result<ClientConfig, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let mut value: Value = serde_json::from_str(&text)?;

    if let Some(section) = section {
        value = value
            .get_mut(section)
            .map(Value::take)
            .ok_or_else(|| ConfigError::InvalidField {
                field: section.to_string(),
                message: "section not found in config file".to_string(),
            })?;
    }

    ClientConfig::from_value(value)
}
