use bytes::{Bytes, BytesMut};
use futures::{stream::BoxStream, StreamExt, TryStreamExt};

use crate::domain::errors::{StorageError, StorageResult};

/// Status code reported for a successful write
pub const STATUS_OK: u16 = 200;
/// Status code reported for a successful delete
pub const STATUS_NO_CONTENT: u16 = 204;

/// Transport-level metadata attached to every capability response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseMetadata {
    pub status_code: u16,
}

impl ResponseMetadata {
    pub fn new(status_code: u16) -> Self {
        Self { status_code }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PutObjectOutput {
    pub metadata: ResponseMetadata,
    pub e_tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteObjectOutput {
    pub metadata: ResponseMetadata,
}

#[derive(Debug)]
pub struct GetObjectOutput {
    pub metadata: ResponseMetadata,
    pub body: ObjectBody,
}

/// Payload of a read response.
///
/// Only a byte stream is considered readable content; anything else the
/// capability may hand back is `Unavailable`.
pub enum ObjectBody {
    Stream(BoxStream<'static, StorageResult<Bytes>>),
    Unavailable,
}

impl ObjectBody {
    /// A single-chunk stream over in-memory bytes
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        ObjectBody::Stream(futures::stream::once(async move { Ok(bytes) }).boxed())
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, ObjectBody::Stream(_))
    }

    /// Drain the body into one contiguous buffer
    pub async fn collect(self) -> StorageResult<Bytes> {
        match self {
            ObjectBody::Stream(mut stream) => {
                let mut buffer = BytesMut::new();
                while let Some(chunk) = stream.try_next().await? {
                    buffer.extend_from_slice(&chunk);
                }
                Ok(buffer.freeze())
            }
            ObjectBody::Unavailable => Err(StorageError::MalformedResponse {
                operation: "getObject".to_string(),
                reason: "body is not a byte stream".to_string(),
            }),
        }
    }
}

impl std::fmt::Debug for ObjectBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectBody::Stream(_) => write!(f, "ObjectBody::Stream(..)"),
            ObjectBody::Unavailable => write!(f, "ObjectBody::Unavailable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_collect_multiple_chunks() {
        let chunks = vec![
            Ok(Bytes::from_static(b"2024-01-02 ")),
            Ok(Bytes::from_static(b"03:04:05")),
        ];
        let body = ObjectBody::Stream(futures::stream::iter(chunks).boxed());

        let bytes = body.collect().await.unwrap();
        assert_eq!(&bytes[..], b"2024-01-02 03:04:05");
    }

    #[tokio::test]
    async fn test_collect_fails_on_broken_stream() {
        let chunks = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(StorageError::BackendError {
                message: "connection reset".to_string(),
            }),
        ];
        let body = ObjectBody::Stream(futures::stream::iter(chunks).boxed());

        assert!(body.collect().await.is_err());
    }

    #[tokio::test]
    async fn test_unavailable_body_is_malformed() {
        let err = ObjectBody::Unavailable.collect().await.unwrap_err();
        assert!(matches!(err, StorageError::MalformedResponse { .. }));
    }
}
