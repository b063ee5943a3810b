//! The object-store seam: the remote storage service as the gateway sees it

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::GatewayResult;

/// An object fetched from the remote store, fully buffered.
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Content-type the storage service attached at upload time, if any
    pub content_type: Option<String>,
    /// Complete object bytes
    pub bytes: Bytes,
}

/// One session against the remote object-storage service.
///
/// A session is opened per gateway call and dropped when the call ends;
/// sessions are never pooled or shared across concurrent operations.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Whether the bucket exists.
    async fn bucket_exists(&self, bucket: &str) -> GatewayResult<bool>;

    /// Create the bucket in the given region.
    async fn create_bucket(&self, bucket: &str, region: &str) -> GatewayResult<()>;

    /// List the keys under `prefix` in the service's native order.
    ///
    /// A single listing call: continuation beyond the service's page limit
    /// is not attempted, so very large buckets are truncated.
    async fn list_objects(&self, bucket: &str, prefix: &str) -> GatewayResult<Vec<String>>;

    /// Fetch one object, fully buffering its byte stream.
    async fn get_object(&self, bucket: &str, key: &str) -> GatewayResult<StoredObject>;

    /// Store one object. No explicit ACL is attached; bucket-level defaults
    /// apply. An existing object at `key` is silently overwritten.
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Bytes,
        content_type: Option<&str>,
    ) -> GatewayResult<()>;
}

/// Opens a fresh store session for each gateway operation.
#[async_trait]
pub trait ObjectStoreProvider: Send + Sync {
    async fn open(&self) -> GatewayResult<Box<dyn ObjectStore>>;
}
