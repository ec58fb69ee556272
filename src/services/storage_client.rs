use bytes::Bytes;
use chrono::Local;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{
    adapters::outbound::{
        logging::InMemoryDebugLog,
        storage::{ApacheObjectStoreAdapter, S3StoreProvider},
    },
    domain::{
        config::ClientConfig,
        errors::{ConfigError, StorageError, StorageResult},
        models::{ResponseMetadata, STATUS_NO_CONTENT, STATUS_OK},
    },
    ports::{logging::DebugLog, storage::ObjectStorageClient},
};

/// Key used by [`StorageClient::check`]
pub const DEFAULT_CHECK_KEY: &str = "check.txt";

/// Layout of the timestamp written by the check operation
pub const CHECK_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Separator used by [`StorageClient::logs_as_string`]
pub const LINE_SEPARATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Facade over an object-storage capability.
///
/// Every operation reports a plain boolean or optional payload. Failures of
/// the underlying calls are caught here, written to the debug log and turned
/// into the negative result; they never reach the caller.
///
/// The debug log is only written when the client was configured with
/// `isDebugging: true`. Operations run one awaited call after another and
/// nothing is spawned in the background.
pub struct StorageClient {
    is_debugging: bool,
    bucket_name: String,
    store: Arc<dyn ObjectStorageClient>,
    debug_log: Arc<dyn DebugLog>,
}

impl StorageClient {
    /// Create a client talking to S3 with the configured `args`.
    ///
    /// The store for the configured bucket is built eagerly so that bad
    /// arguments fail here rather than on the first call.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let provider = S3StoreProvider::from_args(&config.args)?;
        let adapter = ApacheObjectStoreAdapter::new(provider);
        adapter
            .prepare(&config.bucket_name)
            .map_err(|e| ConfigError::InvalidArgs {
                key: "args".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self::with_store(config, Arc::new(adapter)))
    }

    /// Create a client from a raw configuration map
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        Self::new(ClientConfig::from_value(value)?)
    }

    /// Create a client on top of any storage capability. `config.args` is
    /// not used; the capability is assumed to be configured already.
    pub fn with_store(config: ClientConfig, store: Arc<dyn ObjectStorageClient>) -> Self {
        Self {
            is_debugging: config.is_debugging,
            bucket_name: config.bucket_name,
            store,
            debug_log: Arc::new(InMemoryDebugLog::new()),
        }
    }

    /// Replace the debug log sink
    pub fn with_debug_log(mut self, debug_log: Arc<dyn DebugLog>) -> Self {
        self.debug_log = debug_log;
        self
    }

    pub fn is_debugging(&self) -> bool {
        self.is_debugging
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn set_bucket_name(&mut self, bucket_name: impl Into<String>) {
        self.bucket_name = bucket_name.into();
    }

    /// Debug log entries in append order
    pub fn logs(&self) -> Vec<String> {
        self.debug_log.entries()
    }

    pub fn logs_as_string(&self) -> String {
        self.logs().join(LINE_SEPARATOR)
    }

    /// Append `message` to the debug log, followed by the JSON context if
    /// given. No-op unless debugging is enabled.
    pub fn log_debug(&self, message: &str, context: Option<&Value>) {
        if !self.is_debugging {
            return;
        }

        let entry = match context {
            Some(context) => format!("{} {}", message, context),
            None => message.to_string(),
        };
        self.debug_log.append(entry);
    }

    /// Store `body` at `path`
    pub async fn put_object(&self, path: &str, body: impl Into<Bytes>) -> bool {
        let body = body.into();
        tracing::debug!(bucket = %self.bucket_name, key = path, size = body.len(), "putObject");

        self.log_debug(
            "s3.putObject:",
            Some(&json!({
                "Bucket": self.bucket_name,
                "Key": path,
                "Body": String::from_utf8_lossy(&body),
            })),
        );

        let result = match self.try_put_object(path, body).await {
            Ok(()) => true,
            Err(err) => {
                self.log_failure("putObject", &err);
                false
            }
        };

        self.log_debug("s3.putObject return:", Some(&json!({ "result": result })));
        result
    }

    /// Read the object at `path`. `None` covers a missing object as well as
    /// any failed or unreadable response.
    pub async fn get_object(&self, path: &str) -> Option<Bytes> {
        tracing::debug!(bucket = %self.bucket_name, key = path, "getObject");

        self.log_debug(
            "s3.getObject:",
            Some(&json!({
                "Bucket": self.bucket_name,
                "Key": path,
            })),
        );

        match self.try_get_object(path).await {
            Ok(content) => {
                self.log_debug(
                    "s3.getObject return:",
                    Some(&json!({ "content": String::from_utf8_lossy(&content) })),
                );
                Some(content)
            }
            Err(err) => {
                self.log_failure("getObject", &err);
                self.log_debug("s3.getObject return:", Some(&json!({ "result": null })));
                None
            }
        }
    }

    /// Whether an object exists at `path`; `false` when the check itself fails
    pub async fn is_object_exist(&self, path: &str) -> bool {
        tracing::debug!(bucket = %self.bucket_name, key = path, "isObjectExist");

        self.log_debug(
            "s3.isObjectExist:",
            Some(&json!({
                "bucketName": self.bucket_name,
                "key": path,
            })),
        );

        let result = match self.store.does_object_exist(&self.bucket_name, path).await {
            Ok(exists) => exists,
            Err(err) => {
                self.log_failure("isObjectExist", &err);
                false
            }
        };

        self.log_debug("s3.isObjectExist return:", Some(&json!({ "result": result })));
        result
    }

    /// Delete the object at `path`
    pub async fn delete_object(&self, path: &str) -> bool {
        tracing::debug!(bucket = %self.bucket_name, key = path, "deleteObject");

        self.log_debug(
            "s3.deleteObject:",
            Some(&json!({
                "Bucket": self.bucket_name,
                "Key": path,
            })),
        );

        let result = match self.try_delete_object(path).await {
            Ok(()) => true,
            Err(err) => {
                self.log_failure("deleteObject", &err);
                false
            }
        };

        self.log_debug("s3.deleteObject return:", Some(&json!({ "result": result })));
        result
    }

    /// Round-trip health check on [`DEFAULT_CHECK_KEY`]
    pub async fn check(&self) -> bool {
        self.check_key(DEFAULT_CHECK_KEY).await
    }

    /// Write the current local time to `key`, confirm it exists, read it
    /// back, compare, then delete it. The first failing step fails the
    /// check. A failed delete leaves the object behind.
    ///
    /// Two clients checking the same key at once can overwrite each other's
    /// timestamp, which shows up as a failed check.
    pub async fn check_key(&self, key: &str) -> bool {
        self.log_debug("s3.check", None);

        let timestamp = Local::now().format(CHECK_TIMESTAMP_FORMAT).to_string();
        let passed = self.run_check(key, &timestamp).await;

        tracing::info!(bucket = %self.bucket_name, key, passed, "storage check finished");
        passed
    }

    async fn run_check(&self, key: &str, timestamp: &str) -> bool {
        if !self.put_object(key, timestamp.to_string()).await {
            return false;
        }

        if !self.is_object_exist(key).await {
            return false;
        }

        let Some(content) = self.get_object(key).await else {
            return false;
        };

        if content.as_ref() != timestamp.as_bytes() {
            tracing::warn!(key, "check content does not match written timestamp");
            return false;
        }

        self.delete_object(key).await
    }

    async fn try_put_object(&self, path: &str, body: Bytes) -> StorageResult<()> {
        let output = self.store.put_object(&self.bucket_name, path, body).await?;
        expect_status("putObject", output.metadata, STATUS_OK)
    }

    async fn try_get_object(&self, path: &str) -> StorageResult<Bytes> {
        let output = self.store.get_object(&self.bucket_name, path).await?;
        expect_status("getObject", output.metadata, STATUS_OK)?;
        output.body.collect().await
    }

    async fn try_delete_object(&self, path: &str) -> StorageResult<()> {
        let output = self.store.delete_object(&self.bucket_name, path).await?;
        expect_status("deleteObject", output.metadata, STATUS_NO_CONTENT)
    }

    /// Errors raised by the capability get their own debug line; a response
    /// with the wrong shape only shows up as a negative result.
    fn log_failure(&self, operation: &str, err: &StorageError) {
        match err {
            StorageError::UnexpectedStatus { .. } | StorageError::MalformedResponse { .. } => {
                tracing::debug!(bucket = %self.bucket_name, operation, error = %err, "unexpected response");
            }
            _ => {
                tracing::warn!(bucket = %self.bucket_name, operation, error = %err, "storage call failed");
                self.log_debug(&format!("s3.{} error: {}", operation, err), None);
            }
        }
    }
}

fn expect_status(operation: &str, metadata: ResponseMetadata, expected: u16) -> StorageResult<()> {
    if metadata.status_code == expected {
        Ok(())
    } else {
        Err(StorageError::UnexpectedStatus {
            operation: operation.to_string(),
            status: metadata.status_code,
        })
    }
}
