//! # Imagevault Gateway
//!
//! This crate exposes a remote object-storage bucket, under a fixed key
//! prefix reserved for images, through three operations: list available
//! objects, download one object by a partial name match, and upload a new
//! object (auto-creating the bucket if absent).
//!
//! The remote storage service is reached through the [`store::ObjectStore`]
//! seam; an S3-compatible implementation and an in-memory implementation for
//! tests are provided behind feature flags.

pub mod config;
pub mod error;
pub mod gateway;
pub mod store;

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "s3")]
pub mod s3;

pub use config::StorageConfig;
pub use error::{GatewayError, GatewayResult};
pub use gateway::{ImageDownload, StorageGateway};
pub use store::{ObjectStore, ObjectStoreProvider, StoredObject};

#[cfg(feature = "memory")]
pub use memory::MemoryStoreProvider;

#[cfg(feature = "s3")]
pub use s3::S3StoreProvider;
