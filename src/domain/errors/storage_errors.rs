/// Errors that can occur while talking to the object-storage capability.
///
/// The facade never hands these to its callers; they are collapsed into the
/// boolean/optional results of the public operations and surface only in the
/// debug log. Keeping them tagged lets adapters and internal code tell a
/// missing object apart from a transport failure.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Object not found
    ObjectNotFound { bucket: String, key: String },

    /// The capability answered, but not with the status the operation expects
    UnexpectedStatus { operation: String, status: u16 },

    /// The response could not be consumed (wrong body kind, broken stream)
    MalformedResponse { operation: String, reason: String },

    /// The key cannot be expressed as a store path
    InvalidKey { key: String, reason: String },

    /// Access denied
    AccessDenied { key: String, operation: String },

    /// The store for a bucket could not be configured
    Configuration { message: String },

    /// Storage backend error
    BackendError { message: String },
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::ObjectNotFound { bucket, key } => {
                write!(f, "Object not found: {}/{}", bucket, key)
            }
            StorageError::UnexpectedStatus { operation, status } => {
                write!(f, "Unexpected status {} for operation '{}'", status, operation)
            }
            StorageError::MalformedResponse { operation, reason } => {
                write!(f, "Malformed response for operation '{}': {}", operation, reason)
            }
            StorageError::InvalidKey { key, reason } => {
                write!(f, "Invalid object key '{}': {}", key, reason)
            }
            StorageError::AccessDenied { key, operation } => {
                write!(
                    f,
                    "Access denied for operation '{}' on object: {}",
                    operation, key
                )
            }
            StorageError::Configuration { message } => {
                write!(f, "Storage configuration error: {}", message)
            }
            StorageError::BackendError { message } => {
                write!(f, "Storage backend error: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    /// Whether the error means the object simply is not there
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::ObjectNotFound { .. })
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = StorageError::ObjectNotFound {
            bucket: "media".to_string(),
            key: "a/b.txt".to_string(),
        };
        assert_eq!(err.to_string(), "Object not found: media/a/b.txt");
        assert!(err.is_not_found());

        let err = StorageError::UnexpectedStatus {
            operation: "deleteObject".to_string(),
            status: 200,
        };
        assert_eq!(
            err.to_string(),
            "Unexpected status 200 for operation 'deleteObject'"
        );
        assert!(!err.is_not_found());
    }
}
