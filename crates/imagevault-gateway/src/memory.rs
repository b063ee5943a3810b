//! In-memory implementation of the object-store seam
//!
//! Serves as the storage double in tests: insertion order doubles as the
//! service's native listing order, which download resolution depends on.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use crate::error::{GatewayError, GatewayResult};
use crate::store::{ObjectStore, ObjectStoreProvider, StoredObject};

#[derive(Default)]
struct BucketState {
    /// Keys in insertion order; the listing order must stay deterministic.
    order: Mutex<Vec<String>>,
    objects: DashMap<String, StoredObject>,
}

#[derive(Default)]
struct MemoryState {
    buckets: DashMap<String, Arc<BucketState>>,
    create_calls: AtomicUsize,
}

/// Shared in-memory store; every opened session sees the same state.
#[derive(Default, Clone)]
pub struct MemoryStoreProvider {
    state: Arc<MemoryState>,
}

impl MemoryStoreProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-create a bucket without counting it as a session-driven create.
    pub fn with_bucket(bucket: &str) -> Self {
        let provider = Self::default();
        provider
            .state
            .buckets
            .insert(bucket.to_string(), Arc::default());
        provider
    }

    /// Number of create-bucket calls issued through sessions.
    pub fn create_calls(&self) -> usize {
        self.state.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStoreProvider for MemoryStoreProvider {
    async fn open(&self) -> GatewayResult<Box<dyn ObjectStore>> {
        Ok(Box::new(MemorySession {
            state: self.state.clone(),
        }))
    }
}

struct MemorySession {
    state: Arc<MemoryState>,
}

impl MemorySession {
    fn bucket(&self, bucket: &str) -> GatewayResult<Arc<BucketState>> {
        self.state
            .buckets
            .get(bucket)
            .map(|entry| entry.clone())
            .ok_or_else(|| GatewayError::remote(Some(404), format!("no such bucket: {bucket}")))
    }
}

#[async_trait]
impl ObjectStore for MemorySession {
    async fn bucket_exists(&self, bucket: &str) -> GatewayResult<bool> {
        Ok(self.state.buckets.contains_key(bucket))
    }

    async fn create_bucket(&self, bucket: &str, _region: &str) -> GatewayResult<()> {
        self.state.create_calls.fetch_add(1, Ordering::SeqCst);
        self.state
            .buckets
            .entry(bucket.to_string())
            .or_default();
        Ok(())
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> GatewayResult<Vec<String>> {
        let bucket_state = self.bucket(bucket)?;
        let order = bucket_state.order.lock().unwrap();
        Ok(order
            .iter()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> GatewayResult<StoredObject> {
        let bucket_state = self.bucket(bucket)?;
        bucket_state
            .objects
            .get(key)
            .map(|entry| entry.clone())
            .ok_or_else(|| GatewayError::remote(Some(404), format!("no such key: {key}")))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        bytes: Bytes,
        content_type: Option<&str>,
    ) -> GatewayResult<()> {
        let bucket_state = self.bucket(bucket)?;
        {
            let mut order = bucket_state.order.lock().unwrap();
            if !order.iter().any(|existing| existing == key) {
                order.push(key.to_string());
            }
        }
        bucket_state.objects.insert(
            key.to_string(),
            StoredObject {
                content_type: content_type.map(str::to_string),
                bytes,
            },
        );
        Ok(())
    }
}
