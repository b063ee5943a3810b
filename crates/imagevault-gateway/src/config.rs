//! Gateway configuration

use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, GatewayResult};

/// Connection settings for the remote object store.
///
/// Loaded once at process start and handed to the gateway as an immutable
/// value; the gateway never re-reads ambient environment state between
/// calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Target bucket name
    pub bucket: String,

    /// Storage region; also used when the gateway has to create the bucket
    #[serde(default = "default_region")]
    pub region: String,

    /// Custom endpoint URL for S3-compatible services (MinIO, Garage, ...)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Access key ID
    #[serde(default)]
    pub access_key_id: String,

    /// Secret access key
    #[serde(default)]
    pub secret_access_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: default_region(),
            endpoint: None,
            access_key_id: String::new(),
            secret_access_key: String::new(),
        }
    }
}

impl StorageConfig {
    /// Check the invariants the gateway relies on.
    pub fn validate(&self) -> GatewayResult<()> {
        if self.bucket.is_empty() {
            return Err(GatewayError::internal("bucket name must not be empty"));
        }
        if self.access_key_id.is_empty() || self.secret_access_key.is_empty() {
            return Err(GatewayError::internal("storage credentials are required"));
        }
        Ok(())
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}
