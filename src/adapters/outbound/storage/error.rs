use crate::domain::errors::StorageError;

/// Convert an object_store error into a domain storage error, keeping the
/// bucket/key of the call that failed.
pub fn convert_error(
    err: object_store::Error,
    operation: &str,
    bucket: &str,
    key: &str,
) -> StorageError {
    match err {
        object_store::Error::NotFound { .. } => StorageError::ObjectNotFound {
            bucket: bucket.to_string(),
            key: key.to_string(),
        },
        object_store::Error::PermissionDenied { .. }
        | object_store::Error::Unauthenticated { .. } => StorageError::AccessDenied {
            key: key.to_string(),
            operation: operation.to_string(),
        },
        object_store::Error::InvalidPath { source } => StorageError::InvalidKey {
            key: key.to_string(),
            reason: source.to_string(),
        },
        object_store::Error::UnknownConfigurationKey { .. } => StorageError::Configuration {
            message: err.to_string(),
        },
        _ => StorageError::BackendError {
            message: err.to_string(),
        },
    }
}
