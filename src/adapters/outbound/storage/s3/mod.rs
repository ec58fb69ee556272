//! S3 store provider built on the object_store crate's `aws` backend

pub mod s3_provider;

pub use s3_provider::S3StoreProvider;
