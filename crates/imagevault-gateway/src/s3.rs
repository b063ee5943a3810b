//! S3-compatible implementation of the object-store seam
//!
//! Works with AWS S3 and S3-compatible services (MinIO, Garage, ...) through
//! an optional custom endpoint.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
use bytes::Bytes;
use tracing::{debug, info};

use crate::config::StorageConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::store::{ObjectStore, ObjectStoreProvider, StoredObject};

/// Opens one S3 client per gateway call from an immutable configuration.
pub struct S3StoreProvider {
    config: StorageConfig,
}

impl S3StoreProvider {
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    async fn build_client(&self) -> Client {
        let credentials = Credentials::new(
            self.config.access_key_id.clone(),
            self.config.secret_access_key.clone(),
            None,
            None,
            "imagevault",
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.config.region.clone()))
            .credentials_provider(credentials);

        if let Some(endpoint) = &self.config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Client::new(&sdk_config)
    }
}

#[async_trait]
impl ObjectStoreProvider for S3StoreProvider {
    async fn open(&self) -> GatewayResult<Box<dyn ObjectStore>> {
        let client = self.build_client().await;
        Ok(Box::new(S3ObjectStore { client }))
    }
}

/// One S3 session; dropped at the end of the gateway call that opened it.
struct S3ObjectStore {
    client: Client,
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn bucket_exists(&self, bucket: &str) -> GatewayResult<bool> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false)
                {
                    Ok(false)
                } else {
                    Err(translate(err, "head bucket"))
                }
            }
        }
    }

    async fn create_bucket(&self, bucket: &str, region: &str) -> GatewayResult<()> {
        let mut request = self.client.create_bucket().bucket(bucket);

        // us-east-1 is the default location; S3 rejects an explicit
        // constraint naming it.
        if region != "us-east-1" {
            let constraint = BucketLocationConstraint::from(region);
            let bucket_config = CreateBucketConfiguration::builder()
                .location_constraint(constraint)
                .build();
            request = request.create_bucket_configuration(bucket_config);
        }

        request
            .send()
            .await
            .map_err(|err| translate(err, "create bucket"))?;

        info!(bucket, region, "created bucket");
        Ok(())
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> GatewayResult<Vec<String>> {
        // One page only: the gateway never follows continuation tokens, so
        // listings beyond the service's page limit are truncated.
        let response = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .send()
            .await
            .map_err(|err| translate(err, "list objects"))?;

        let mut keys = Vec::new();
        if let Some(contents) = response.contents {
            for object in contents {
                if let Some(key) = object.key {
                    keys.push(key);
                }
            }
        }

        debug!(bucket, prefix, count = keys.len(), "listed objects");
        Ok(keys)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> GatewayResult<StoredObject> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| translate(err, "get object"))?;

        let content_type = response.content_type().map(str::to_string);
        let body = response
            .body
            .collect()
            .await
            .map_err(|err| GatewayError::internal(format!("failed to read object body: {err}")))?;

        let bytes = body.into_bytes();
        debug!(bucket, key, size = bytes.len(), "fetched object");

        Ok(StoredObject {
            content_type,
            bytes,
        })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Bytes,
        content_type: Option<&str>,
    ) -> GatewayResult<()> {
        let size = bytes.len();
        let mut request = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(bytes));

        if let Some(content_type) = content_type {
            request = request.content_type(content_type);
        }

        request
            .send()
            .await
            .map_err(|err| translate(err, "put object"))?;

        debug!(bucket, key, size, "stored object");
        Ok(())
    }
}

/// Map an SDK failure onto the gateway taxonomy. When the service answered,
/// its HTTP status and message are kept unmodified; everything else
/// (connector faults, timeouts, response parsing) is an internal error.
fn translate<E>(err: SdkError<E, HttpResponse>, operation: &str) -> GatewayError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    match &err {
        SdkError::ServiceError(context) => {
            let status = Some(context.raw().status().as_u16());
            let message = err
                .message()
                .map(str::to_string)
                .or_else(|| err.code().map(str::to_string))
                .unwrap_or_else(|| err.to_string());
            GatewayError::remote(status, message)
        }
        _ => GatewayError::internal(format!("{operation} failed: {err}")),
    }
}
