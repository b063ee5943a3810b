//! The storage gateway: list, download by partial name, upload

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};

use crate::config::StorageConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::store::{ObjectStore, ObjectStoreProvider};

/// Key namespace all managed objects live under. An implementation-internal
/// partition, never exposed to callers as part of filenames.
const IMAGES_PREFIX: &str = "images";

/// A downloaded object: the buffered bytes, the content-type the storage
/// service reported at upload time, and the bare filename.
#[derive(Debug, Clone)]
pub struct ImageDownload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Gateway over a single images bucket on a remote object store.
///
/// Holds no mutable state between calls: each operation opens a fresh store
/// session, performs its round trips, and releases the session when the call
/// ends. Concurrent operations are therefore independent.
pub struct StorageGateway {
    config: StorageConfig,
    provider: Arc<dyn ObjectStoreProvider>,
}

impl StorageGateway {
    /// `config` is loaded once at process start and stays immutable for the
    /// gateway's lifetime.
    pub fn new(config: StorageConfig, provider: Arc<dyn ObjectStoreProvider>) -> Self {
        Self { config, provider }
    }

    /// List the bare filenames stored under the images prefix, in the
    /// storage service's native listing order.
    ///
    /// Fails with `NotFound` when the bucket does not exist. The listing is
    /// never cached, and only a single listing page is fetched.
    pub async fn list_objects(&self) -> GatewayResult<Vec<String>> {
        let store = self.provider.open().await?;
        self.require_bucket(store.as_ref()).await?;

        let keys = store
            .list_objects(&self.config.bucket, IMAGES_PREFIX)
            .await?;

        debug!(bucket = %self.config.bucket, count = keys.len(), "listed images");
        Ok(keys.iter().map(|key| file_name(key).to_string()).collect())
    }

    /// Resolve `partial_name` to the first stored filename containing it as
    /// a case-sensitive substring, in native listing order, and download
    /// that object.
    ///
    /// The match is deliberately loose: an ambiguous partial name resolves
    /// to whichever match the listing yields first. The whole object is
    /// buffered in memory before returning, which is acceptable only for
    /// the bounded image sizes this gateway serves.
    pub async fn download_object(&self, partial_name: &str) -> GatewayResult<ImageDownload> {
        let store = self.provider.open().await?;
        self.require_bucket(store.as_ref()).await?;

        let keys = store
            .list_objects(&self.config.bucket, IMAGES_PREFIX)
            .await?;

        let matched = keys
            .iter()
            .map(|key| file_name(key))
            .find(|name| name.contains(partial_name))
            .map(str::to_string)
            .ok_or_else(|| GatewayError::not_found("The specified image was not found!"))?;

        let key = format!("{IMAGES_PREFIX}/{matched}");
        let object = store.get_object(&self.config.bucket, &key).await?;

        debug!(
            bucket = %self.config.bucket,
            partial = partial_name,
            resolved = %matched,
            size = object.bytes.len(),
            "downloaded image"
        );

        Ok(ImageDownload {
            file_name: matched,
            content_type: object.content_type,
            bytes: object.bytes,
        })
    }

    /// Upload `bytes` to `images/<file_name>`, creating the bucket in the
    /// configured region first if it does not exist.
    ///
    /// The filename is used verbatim; re-uploading a filename silently
    /// overwrites the previous object (standard put semantics, no conflict
    /// detection). Success carries no payload.
    pub async fn upload_object(
        &self,
        file_name: &str,
        bytes: Bytes,
        content_type: Option<&str>,
    ) -> GatewayResult<()> {
        let store = self.provider.open().await?;

        if !store.bucket_exists(&self.config.bucket).await? {
            info!(bucket = %self.config.bucket, "bucket missing, creating it");
            store
                .create_bucket(&self.config.bucket, &self.config.region)
                .await?;
        }

        let key = format!("{IMAGES_PREFIX}/{file_name}");
        store
            .put_object(&self.config.bucket, &key, bytes, content_type)
            .await?;

        info!(bucket = %self.config.bucket, key = %key, "uploaded image");
        Ok(())
    }

    async fn require_bucket(&self, store: &dyn ObjectStore) -> GatewayResult<()> {
        if store.bucket_exists(&self.config.bucket).await? {
            Ok(())
        } else {
            Err(GatewayError::not_found("Bucket was not found!"))
        }
    }
}

/// Strip any path component from a key, leaving the bare filename.
fn file_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}
