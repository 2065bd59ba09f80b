//! bucketbridge - object storage as an injectable service
//!
//! A [`StorageService`] wraps one shared object store client built from a
//! [`StorageConfig`] and exposes bucket and object operations on it. Beyond
//! delegating, it only creates buckets on first write and skips removing
//! buckets that are already gone.
//!
//! ```rust,no_run
//! use bucketbridge::{byte_stream, StorageConfig, StorageService};
//!
//! # async fn run() -> Result<(), bucketbridge::StoreError> {
//! let config = StorageConfig::load()?;
//! let storage = StorageService::from_config(&config)?;
//!
//! let key = storage
//!     .save_file("docs", "a.txt", "text/plain", byte_stream("hello"))
//!     .await?;
//! assert_eq!(key, "a.txt");
//! # Ok(())
//! # }
//! ```

pub mod service;

pub use service::StorageService;

pub use bucketbridge_client::{ClientFactory, EphemeralClient, ObjectStoreClient, S3Client};
pub use bucketbridge_core::{
    byte_stream, collect_bytes, ByteStream, FileUpload, ObjectStream, ObjectSummary,
    StorageConfig, StoreError,
};
