use async_trait::async_trait;
use bytes::Bytes;
use futures::{StreamExt, TryStreamExt};
use object_store::{
    memory::InMemory, path::Path as ObjectPath, ObjectStore as ApacheObjectStore, PutPayload,
};
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use super::error::convert_error;
use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::{
            DeleteObjectOutput, GetObjectOutput, ObjectBody, PutObjectOutput, ResponseMetadata,
            STATUS_NO_CONTENT, STATUS_OK,
        },
    },
    ports::storage::ObjectStorageClient,
};

/// Builds the Apache object_store backend for a single bucket
pub trait StoreProvider: Send + Sync + 'static {
    fn build(&self, bucket: &str) -> StorageResult<Arc<dyn ApacheObjectStore>>;
}

/// Provider of process-local in-memory stores, one per bucket
#[derive(Debug, Default, Clone)]
pub struct InMemoryStoreProvider;

impl StoreProvider for InMemoryStoreProvider {
    fn build(&self, _bucket: &str) -> StorageResult<Arc<dyn ApacheObjectStore>> {
        Ok(Arc::new(InMemory::new()))
    }
}

/// Adapter that implements our ObjectStorageClient port using Apache object_store.
///
/// object_store binds a client to a bucket, so stores are built lazily per
/// bucket and cached for the adapter's lifetime.
pub struct ApacheObjectStoreAdapter {
    provider: Box<dyn StoreProvider>,
    stores: RwLock<HashMap<String, Arc<dyn ApacheObjectStore>>>,
}

impl ApacheObjectStoreAdapter {
    pub fn new(provider: impl StoreProvider) -> Self {
        Self {
            provider: Box::new(provider),
            stores: RwLock::new(HashMap::new()),
        }
    }

    /// Adapter backed by in-memory stores
    pub fn in_memory() -> Self {
        Self::new(InMemoryStoreProvider)
    }

    /// Build the store for `bucket` now instead of on first use
    pub fn prepare(&self, bucket: &str) -> StorageResult<()> {
        self.store_for(bucket).map(|_| ())
    }

    fn store_for(&self, bucket: &str) -> StorageResult<Arc<dyn ApacheObjectStore>> {
        if let Some(store) = self
            .stores
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(bucket)
        {
            return Ok(Arc::clone(store));
        }

        let mut stores = self.stores.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(store) = stores.get(bucket) {
            return Ok(Arc::clone(store));
        }

        let store = self.provider.build(bucket)?;
        stores.insert(bucket.to_string(), Arc::clone(&store));
        tracing::debug!(bucket, "object store initialized");
        Ok(store)
    }

    /// Keys are passed through verbatim; anything `Path::parse` would
    /// rewrite (leading or trailing `/`, the empty key) is rejected.
    fn to_object_path(key: &str) -> StorageResult<ObjectPath> {
        let invalid = |reason: String| StorageError::InvalidKey {
            key: key.to_string(),
            reason,
        };

        if key.is_empty() {
            return Err(invalid("key must not be empty".to_string()));
        }

        let path = ObjectPath::parse(key).map_err(|e| invalid(e.to_string()))?;
        if path.as_ref() != key {
            return Err(invalid(format!("key would be stored as '{}'", path)));
        }

        Ok(path)
    }
}

#[async_trait]
impl ObjectStorageClient for ApacheObjectStoreAdapter {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
    ) -> StorageResult<PutObjectOutput> {
        let store = self.store_for(bucket)?;
        let path = Self::to_object_path(key)?;

        let result = store
            .put(&path, PutPayload::from(body))
            .await
            .map_err(|e| convert_error(e, "putObject", bucket, key))?;

        Ok(PutObjectOutput {
            metadata: ResponseMetadata::new(STATUS_OK),
            e_tag: result.e_tag,
        })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<GetObjectOutput> {
        let store = self.store_for(bucket)?;
        let path = Self::to_object_path(key)?;

        let result = store
            .get(&path)
            .await
            .map_err(|e| convert_error(e, "getObject", bucket, key))?;

        let (bucket, key) = (bucket.to_string(), key.to_string());
        let stream = result
            .into_stream()
            .map_err(move |e| convert_error(e, "getObject", &bucket, &key))
            .boxed();

        Ok(GetObjectOutput {
            metadata: ResponseMetadata::new(STATUS_OK),
            body: ObjectBody::Stream(stream),
        })
    }

    async fn does_object_exist(&self, bucket: &str, key: &str) -> StorageResult<bool> {
        let store = self.store_for(bucket)?;
        let path = Self::to_object_path(key)?;

        match store.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(convert_error(e, "doesObjectExist", bucket, key)),
        }
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> StorageResult<DeleteObjectOutput> {
        let store = self.store_for(bucket)?;
        let path = Self::to_object_path(key)?;

        match store.delete(&path).await {
            // S3 answers 204 whether or not the key was there
            Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(DeleteObjectOutput {
                metadata: ResponseMetadata::new(STATUS_NO_CONTENT),
            }),
            Err(e) => Err(convert_error(e, "deleteObject", bucket, key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete_roundtrip() {
        let adapter = ApacheObjectStoreAdapter::in_memory();

        let put = adapter
            .put_object("media", "docs/readme.txt", Bytes::from("hello"))
            .await
            .unwrap();
        assert_eq!(put.metadata.status_code, STATUS_OK);

        assert!(adapter.does_object_exist("media", "docs/readme.txt").await.unwrap());

        let get = adapter.get_object("media", "docs/readme.txt").await.unwrap();
        assert_eq!(get.metadata.status_code, STATUS_OK);
        assert!(get.body.is_stream());
        assert_eq!(&get.body.collect().await.unwrap()[..], b"hello");

        let delete = adapter.delete_object("media", "docs/readme.txt").await.unwrap();
        assert_eq!(delete.metadata.status_code, STATUS_NO_CONTENT);
        assert!(!adapter.does_object_exist("media", "docs/readme.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_object_is_not_found() {
        let adapter = ApacheObjectStoreAdapter::in_memory();

        let err = adapter.get_object("media", "nope.txt").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(!adapter.does_object_exist("media", "nope.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_buckets_are_isolated() {
        let adapter = ApacheObjectStoreAdapter::in_memory();

        adapter
            .put_object("first", "shared.txt", Bytes::from("1"))
            .await
            .unwrap();

        assert!(adapter.does_object_exist("first", "shared.txt").await.unwrap());
        assert!(!adapter.does_object_exist("second", "shared.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_key_is_rejected() {
        let adapter = ApacheObjectStoreAdapter::in_memory();

        let err = adapter
            .put_object("media", "double//slash", Bytes::from("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey { .. }));
    }

    #[test]
    fn test_keys_are_not_normalized() {
        for key in ["/report.txt", "dir/", ""] {
            assert!(
                matches!(
                    ApacheObjectStoreAdapter::to_object_path(key),
                    Err(StorageError::InvalidKey { .. })
                ),
                "key {:?} should be rejected",
                key
            );
        }

        let path = ApacheObjectStoreAdapter::to_object_path("dir/report.txt").unwrap();
        assert_eq!(path.as_ref(), "dir/report.txt");
    }

    #[test]
    fn test_prepare_caches_store() {
        let adapter = ApacheObjectStoreAdapter::in_memory();
        adapter.prepare("media").unwrap();

        let first = adapter.store_for("media").unwrap();
        let second = adapter.store_for("media").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
