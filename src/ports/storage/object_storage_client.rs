use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{
    errors::StorageResult,
    models::{DeleteObjectOutput, GetObjectOutput, PutObjectOutput},
};

/// Port for the external object-storage capability.
/// This abstracts the actual S3-compatible client; every call names its
/// bucket explicitly so the facade can retarget without rebuilding it.
#[async_trait]
pub trait ObjectStorageClient: Send + Sync + 'static {
    /// Write an object
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
    ) -> StorageResult<PutObjectOutput>;

    /// Read an object
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<GetObjectOutput>;

    /// Check whether an object exists. A missing object is `Ok(false)`, but
    /// implementations may still fail for other reasons.
    async fn does_object_exist(&self, bucket: &str, key: &str) -> StorageResult<bool>;

    /// Delete an object
    async fn delete_object(&self, bucket: &str, key: &str) -> StorageResult<DeleteObjectOutput>;
}
