#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use s3_sdk_client::{
    ApacheObjectStoreAdapter, DeleteObjectOutput, GetObjectOutput, ObjectBody,
    ObjectStorageClient, PutObjectOutput, ResponseMetadata, StorageError, StorageResult,
};
use std::sync::Mutex;

/// Faults to inject into a FaultyStore
#[derive(Debug, Default, Clone)]
pub struct Faults {
    pub put_error: bool,
    pub put_status: Option<u16>,
    pub get_error: bool,
    pub get_status: Option<u16>,
    pub get_unavailable_body: bool,
    pub get_content: Option<Bytes>,
    pub exists_error: bool,
    pub delete_error: bool,
    pub delete_status: Option<u16>,
}

/// In-memory storage capability that can be told to misbehave.
/// Every call is recorded by operation name.
pub struct FaultyStore {
    inner: ApacheObjectStoreAdapter,
    faults: Faults,
    calls: Mutex<Vec<&'static str>>,
}

impl FaultyStore {
    pub fn new(faults: Faults) -> Self {
        Self {
            inner: ApacheObjectStoreAdapter::in_memory(),
            faults,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether the object is really there, bypassing injected faults
    pub async fn contains(&self, bucket: &str, key: &str) -> bool {
        self.inner.does_object_exist(bucket, key).await.unwrap()
    }

    fn record(&self, operation: &'static str) {
        self.calls.lock().unwrap().push(operation);
    }

    fn injected(operation: &str) -> StorageError {
        StorageError::BackendError {
            message: format!("injected {} failure", operation),
        }
    }
}

#[async_trait]
impl ObjectStorageClient for FaultyStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
    ) -> StorageResult<PutObjectOutput> {
        self.record("put");
        if self.faults.put_error {
            return Err(Self::injected("put"));
        }

        let mut output = self.inner.put_object(bucket, key, body).await?;
        if let Some(status) = self.faults.put_status {
            output.metadata = ResponseMetadata::new(status);
        }
        Ok(output)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<GetObjectOutput> {
        self.record("get");
        if self.faults.get_error {
            return Err(Self::injected("get"));
        }

        let mut output = self.inner.get_object(bucket, key).await?;
        if let Some(status) = self.faults.get_status {
            output.metadata = ResponseMetadata::new(status);
        }
        if self.faults.get_unavailable_body {
            output.body = ObjectBody::Unavailable;
        } else if let Some(content) = &self.faults.get_content {
            output.body = ObjectBody::from_bytes(content.clone());
        }
        Ok(output)
    }

    async fn does_object_exist(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        self.record("exists");
        if self.faults.exists_error {
            return Err(Self::injected("exists"));
        }
        self.inner.does_object_exist(bucket, key).await
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> StorageResult<DeleteObjectOutput> {
        self.record("delete");
        if self.faults.delete_error {
            return Err(Self::injected("delete"));
        }

        let mut output = self.inner.delete_object(bucket, key).await?;
        if let Some(status) = self.faults.delete_status {
            output.metadata = ResponseMetadata::new(status);
        }
        Ok(output)
    }
}
