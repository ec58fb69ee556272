mod storage_client;

pub use storage_client::{
    StorageClient, CHECK_TIMESTAMP_FORMAT, DEFAULT_CHECK_KEY, LINE_SEPARATOR,
};
