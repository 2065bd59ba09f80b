//! Object store client trait

use async_trait::async_trait;
use bucketbridge_core::{ByteStream, ObjectStream, StoreError};

/// Remote primitives used by the storage facade.
///
/// Each method is a single call against the store. Implementations must be
/// safe to share between any number of concurrent callers.
#[async_trait]
pub trait ObjectStoreClient: Send + Sync {
    /// Check if a bucket exists
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError>;

    /// Create a bucket
    async fn create_bucket(&self, bucket: &str) -> Result<(), StoreError>;

    /// Delete a bucket
    async fn delete_bucket(&self, bucket: &str) -> Result<(), StoreError>;

    /// List all bucket names
    async fn list_buckets(&self) -> Result<Vec<String>, StoreError>;

    /// List the objects in a bucket
    async fn list_objects(&self, bucket: &str) -> Result<ObjectStream, StoreError>;

    /// Get an object's contents
    async fn get_object(&self, bucket: &str, key: &str) -> Result<ByteStream, StoreError>;

    /// Put an object
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: ByteStream,
    ) -> Result<(), StoreError>;

    /// Copy an object
    async fn copy_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<(), StoreError>;

    /// Delete an object
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StoreError>;
}
