//! Gateway behavior against the in-memory object store

use std::sync::Arc;

use bytes::Bytes;
use imagevault_gateway::{
    GatewayError, MemoryStoreProvider, ObjectStoreProvider, StorageConfig, StorageGateway,
};

const BUCKET: &str = "sample-images";

fn storage_config() -> StorageConfig {
    StorageConfig {
        bucket: BUCKET.to_string(),
        region: "us-east-1".to_string(),
        endpoint: None,
        access_key_id: "test-access-key".to_string(),
        secret_access_key: "test-secret-key".to_string(),
    }
}

fn gateway(provider: &MemoryStoreProvider) -> StorageGateway {
    StorageGateway::new(storage_config(), Arc::new(provider.clone()))
}

async fn seed(provider: &MemoryStoreProvider, key: &str, content_type: Option<&str>, data: &[u8]) {
    let store = provider.open().await.unwrap();
    store
        .put_object(BUCKET, key, Bytes::copy_from_slice(data), content_type)
        .await
        .unwrap();
}

fn assert_not_found(err: GatewayError, expected_message: &str) {
    match err {
        GatewayError::NotFound { message } => assert_eq!(message, expected_message),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn list_fails_when_bucket_is_missing() {
    let provider = MemoryStoreProvider::new();
    let err = gateway(&provider).list_objects().await.unwrap_err();
    assert_not_found(err, "Bucket was not found!");
}

#[tokio::test]
async fn download_fails_when_bucket_is_missing() {
    let provider = MemoryStoreProvider::new();
    let err = gateway(&provider).download_object("cat").await.unwrap_err();
    assert_not_found(err, "Bucket was not found!");
}

#[tokio::test]
async fn list_strips_the_prefix_and_keeps_native_order() {
    let provider = MemoryStoreProvider::with_bucket(BUCKET);
    seed(&provider, "images/zebra.png", None, b"z").await;
    seed(&provider, "images/ant.png", None, b"a").await;
    seed(&provider, "thumbnails/zebra.png", None, b"t").await;

    let files = gateway(&provider).list_objects().await.unwrap();
    assert_eq!(files, vec!["zebra.png", "ant.png"]);
}

#[tokio::test]
async fn list_of_an_empty_bucket_is_empty() {
    let provider = MemoryStoreProvider::with_bucket(BUCKET);
    let files = gateway(&provider).list_objects().await.unwrap();
    assert!(files.is_empty());
}

#[tokio::test]
async fn download_resolves_the_first_substring_match() {
    let provider = MemoryStoreProvider::with_bucket(BUCKET);
    seed(&provider, "images/catalog.png", None, b"catalog-bytes").await;
    seed(&provider, "images/cat.png", None, b"cat-bytes").await;

    // "catalog.png" was listed first and contains "cat", so the loose match
    // picks it over the exact name.
    let download = gateway(&provider).download_object("cat").await.unwrap();
    assert_eq!(download.file_name, "catalog.png");
    assert_eq!(download.bytes.as_ref(), b"catalog-bytes");
}

#[tokio::test]
async fn download_by_full_name_returns_bytes_and_content_type() {
    let provider = MemoryStoreProvider::with_bucket(BUCKET);
    seed(&provider, "images/cat.png", Some("image/png"), b"cat-bytes").await;

    let download = gateway(&provider).download_object("cat.png").await.unwrap();
    assert_eq!(download.file_name, "cat.png");
    assert_eq!(download.content_type.as_deref(), Some("image/png"));
    assert_eq!(download.bytes.as_ref(), b"cat-bytes");
}

#[tokio::test]
async fn download_without_a_match_is_not_found() {
    let provider = MemoryStoreProvider::with_bucket(BUCKET);
    seed(&provider, "images/cat.png", None, b"cat-bytes").await;

    let err = gateway(&provider).download_object("dog").await.unwrap_err();
    assert_not_found(err, "The specified image was not found!");
}

#[tokio::test]
async fn matching_is_case_sensitive() {
    let provider = MemoryStoreProvider::with_bucket(BUCKET);
    seed(&provider, "images/Cat.png", None, b"cat-bytes").await;

    let err = gateway(&provider).download_object("cat").await.unwrap_err();
    assert_not_found(err, "The specified image was not found!");
}

#[tokio::test]
async fn upload_creates_the_bucket_when_missing() {
    let provider = MemoryStoreProvider::new();
    let gw = gateway(&provider);

    gw.upload_object("dog.png", Bytes::from_static(b"dog-bytes"), Some("image/png"))
        .await
        .unwrap();

    assert_eq!(provider.create_calls(), 1);
    assert_eq!(gw.list_objects().await.unwrap(), vec!["dog.png"]);
}

#[tokio::test]
async fn upload_against_an_existing_bucket_issues_no_create() {
    let provider = MemoryStoreProvider::with_bucket(BUCKET);
    let gw = gateway(&provider);

    gw.upload_object("dog.png", Bytes::from_static(b"0123456789abcdefg"), None)
        .await
        .unwrap();

    assert_eq!(provider.create_calls(), 0);

    let store = provider.open().await.unwrap();
    let stored = store.get_object(BUCKET, "images/dog.png").await.unwrap();
    assert_eq!(stored.bytes.len(), 17);
}

#[tokio::test]
async fn upload_then_list_contains_the_file_exactly_once() {
    let provider = MemoryStoreProvider::with_bucket(BUCKET);
    let gw = gateway(&provider);

    gw.upload_object("a.png", Bytes::from_static(b"first"), None)
        .await
        .unwrap();

    let files = gw.list_objects().await.unwrap();
    assert_eq!(files.iter().filter(|name| *name == "a.png").count(), 1);
}

#[tokio::test]
async fn reupload_overwrites_and_download_returns_the_newest_bytes() {
    let provider = MemoryStoreProvider::with_bucket(BUCKET);
    let gw = gateway(&provider);

    gw.upload_object("a.png", Bytes::from_static(b"first"), None)
        .await
        .unwrap();
    gw.upload_object("a.png", Bytes::from_static(b"second"), None)
        .await
        .unwrap();

    assert_eq!(gw.list_objects().await.unwrap(), vec!["a.png"]);

    let download = gw.download_object("a.png").await.unwrap();
    assert_eq!(download.bytes.as_ref(), b"second");
}

#[tokio::test]
async fn zero_length_payloads_pass_through_unchecked() {
    let provider = MemoryStoreProvider::with_bucket(BUCKET);
    let gw = gateway(&provider);

    gw.upload_object("empty.png", Bytes::new(), None)
        .await
        .unwrap();

    let download = gw.download_object("empty.png").await.unwrap();
    assert!(download.bytes.is_empty());
}
