mod common;

use bytes::Bytes;
use common::{Faults, FaultyStore};
use s3_sdk_client::{
    create_in_memory_client, ClientConfig, S3Args, StorageClient, DEFAULT_CHECK_KEY,
};
use std::sync::Arc;

const BUCKET: &str = "check-bucket";

fn faulty_client(faults: Faults) -> (StorageClient, Arc<FaultyStore>) {
    let store = Arc::new(FaultyStore::new(faults));
    let config = ClientConfig::new(BUCKET, S3Args::new()).with_debugging(true);
    (StorageClient::with_store(config, store.clone()), store)
}

#[tokio::test]
async fn test_check_passes_on_healthy_store() {
    let client = create_in_memory_client(BUCKET, true);

    assert!(client.check().await);
    // Nothing is left behind at the default key
    assert!(!client.is_object_exist(DEFAULT_CHECK_KEY).await);
}

#[tokio::test]
async fn test_check_runs_full_chain_in_order() {
    let (client, store) = faulty_client(Faults::default());

    assert!(client.check().await);
    assert_eq!(store.calls(), vec!["put", "exists", "get", "delete"]);
    assert!(!store.contains(BUCKET, DEFAULT_CHECK_KEY).await);
}

#[tokio::test]
async fn test_check_with_custom_key() {
    let (client, store) = faulty_client(Faults::default());

    assert!(client.check_key("health/probe.txt").await);

    let logs = client.logs();
    assert_eq!(logs[0], "s3.check");
    assert!(logs[1].starts_with(r#"s3.putObject: {"Bucket":"check-bucket","Key":"health/probe.txt","Body":""#));
    assert!(!store.contains(BUCKET, "health/probe.txt").await);
}

#[tokio::test]
async fn test_check_short_circuits_on_failed_write() {
    let (client, store) = faulty_client(Faults {
        put_error: true,
        ..Faults::default()
    });

    assert!(!client.check().await);
    assert_eq!(store.calls(), vec!["put"]);
}

#[tokio::test]
async fn test_check_fails_when_object_not_confirmed() {
    let (client, store) = faulty_client(Faults {
        exists_error: true,
        ..Faults::default()
    });

    assert!(!client.check().await);
    assert_eq!(store.calls(), vec!["put", "exists"]);
    // No cleanup is attempted
    assert!(store.contains(BUCKET, DEFAULT_CHECK_KEY).await);
}

#[tokio::test]
async fn test_check_fails_on_unreadable_content() {
    let (client, store) = faulty_client(Faults {
        get_error: true,
        ..Faults::default()
    });

    assert!(!client.check().await);
    assert_eq!(store.calls(), vec!["put", "exists", "get"]);
}

#[tokio::test]
async fn test_check_fails_on_content_mismatch() {
    let (client, store) = faulty_client(Faults {
        get_content: Some(Bytes::from_static(b"1970-01-01 00:00:00")),
        ..Faults::default()
    });

    assert!(!client.check().await);
    assert_eq!(store.calls(), vec!["put", "exists", "get"]);
    assert!(store.contains(BUCKET, DEFAULT_CHECK_KEY).await);
}

#[tokio::test]
async fn test_check_fails_and_leaves_object_when_delete_fails() {
    let (client, store) = faulty_client(Faults {
        delete_error: true,
        ..Faults::default()
    });

    assert!(!client.check().await);
    assert_eq!(store.calls(), vec!["put", "exists", "get", "delete"]);
    assert!(store.contains(BUCKET, DEFAULT_CHECK_KEY).await);
}

#[tokio::test]
async fn test_check_fails_on_wrong_delete_status() {
    let (client, store) = faulty_client(Faults {
        delete_status: Some(200),
        ..Faults::default()
    });

    assert!(!client.check().await);
    assert_eq!(store.calls(), vec!["put", "exists", "get", "delete"]);
}
