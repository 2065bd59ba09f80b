//! Storage service

use bucketbridge_client::{ClientFactory, ObjectStoreClient};
use bucketbridge_core::{ByteStream, FileUpload, ObjectStream, StorageConfig, StoreError};
use std::sync::Arc;
use tracing::{debug, info};

/// Bucket and object operations over one shared store client.
///
/// Every call goes straight to the client and returns its errors unchanged.
/// Nothing about remote buckets or objects is cached between calls.
///
/// Writes create their bucket first when it is missing. The existence check
/// and the create are two separate requests, so concurrent first writers to
/// the same bucket can both try to create it; the loser sees the store's
/// "bucket already exists" error.
#[derive(Clone)]
pub struct StorageService {
    client: Arc<dyn ObjectStoreClient>,
}

impl StorageService {
    /// Create a service over an existing client handle
    pub fn new(client: Arc<dyn ObjectStoreClient>) -> Self {
        Self { client }
    }

    /// Create a service backed by an S3 client built from configuration
    pub fn from_config(config: &StorageConfig) -> Result<Self, StoreError> {
        Ok(Self::new(ClientFactory::shared(config)?))
    }

    /// Get reference to the client handle
    pub fn client(&self) -> &Arc<dyn ObjectStoreClient> {
        &self.client
    }

    /// List the objects in a bucket
    pub async fn list_objects(&self, bucket: &str) -> Result<ObjectStream, StoreError> {
        info!(bucket = %bucket, "Listing objects");
        self.client.list_objects(bucket).await
    }

    /// Open an object for reading. The caller drives the returned stream.
    pub async fn get_object(&self, bucket: &str, key: &str) -> Result<ByteStream, StoreError> {
        info!(bucket = %bucket, key = %key, "Getting object");
        self.client.get_object(bucket, key).await
    }

    /// Store an object, creating the bucket first if it does not exist.
    /// Returns the key the object was stored under.
    pub async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: ByteStream,
    ) -> Result<String, StoreError> {
        self.make_bucket(bucket).await?;

        info!(bucket = %bucket, key = %key, content_type = %content_type, "Saving object");
        self.client.put_object(bucket, key, content_type, body).await?;
        Ok(key.to_string())
    }

    /// Same as [`StorageService::put_object`]
    pub async fn save_file(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: ByteStream,
    ) -> Result<String, StoreError> {
        self.put_object(bucket, key, content_type, body).await
    }

    /// Store a fully received upload under its own content type
    pub async fn save_upload(
        &self,
        bucket: &str,
        key: &str,
        upload: &FileUpload,
    ) -> Result<String, StoreError> {
        let body = upload.clone().into_stream();
        self.put_object(bucket, key, &upload.content_type, body)
            .await
    }

    /// Copy an object to another key in the same bucket, creating the bucket
    /// first if it does not exist.
    pub async fn copy_object(
        &self,
        bucket: &str,
        src_key: &str,
        dest_key: &str,
    ) -> Result<(), StoreError> {
        self.copy_object_to(bucket, src_key, bucket, dest_key).await
    }

    /// Copy an object into another bucket. Only the source bucket is
    /// checked and created; the destination bucket must already exist.
    pub async fn copy_object_to(
        &self,
        src_bucket: &str,
        src_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<(), StoreError> {
        self.make_bucket(src_bucket).await?;

        info!(
            src_bucket = %src_bucket,
            src_key = %src_key,
            dest_bucket = %dest_bucket,
            dest_key = %dest_key,
            "Copying object"
        );
        self.client
            .copy_object(src_bucket, src_key, dest_bucket, dest_key)
            .await
    }

    /// Delete an object. Missing keys are left to the store to handle.
    pub async fn remove_object(&self, bucket: &str, key: &str) -> Result<(), StoreError> {
        info!(bucket = %bucket, key = %key, "Removing object");
        self.client.delete_object(bucket, key).await
    }

    /// Create a bucket unless it already exists
    pub async fn make_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        if !self.bucket_exists(bucket).await? {
            info!(bucket = %bucket, "Creating bucket");
            self.client.create_bucket(bucket).await?;
        }
        Ok(())
    }

    /// Delete a bucket if it exists
    pub async fn remove_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        if self.bucket_exists(bucket).await? {
            info!(bucket = %bucket, "Removing bucket");
            self.client.delete_bucket(bucket).await?;
        }
        Ok(())
    }

    /// List the names of all buckets
    pub async fn list_buckets(&self) -> Result<Vec<String>, StoreError> {
        info!("Listing buckets");
        self.client.list_buckets().await
    }

    pub async fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError> {
        debug!(bucket = %bucket, "Checking bucket");
        self.client.bucket_exists(bucket).await
    }
}
