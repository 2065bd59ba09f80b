//! In-memory object store client

use super::traits::ObjectStoreClient;
use async_trait::async_trait;
use bucketbridge_core::{
    byte_stream, collect_bytes, ByteStream, ObjectStream, ObjectSummary, StoreError,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::stream::{self, StreamExt};
use md5::{Digest, Md5};
use std::sync::Arc;

/// In-memory stored object
struct InMemoryObject {
    data: Bytes,
    etag: String,
    content_type: String,
    last_modified: DateTime<Utc>,
}

/// In-memory bucket
struct InMemoryBucket {
    objects: DashMap<String, InMemoryObject>,
}

impl InMemoryBucket {
    fn new() -> Self {
        Self {
            objects: DashMap::new(),
        }
    }
}

/// Object store kept entirely in process memory.
///
/// Follows S3 semantics where the facade can observe them: creating an
/// existing bucket fails, deleting a non-empty bucket fails, deleting a
/// missing key succeeds.
pub struct EphemeralClient {
    buckets: DashMap<String, Arc<InMemoryBucket>>,
}

impl Default for EphemeralClient {
    fn default() -> Self {
        Self::new()
    }
}

impl EphemeralClient {
    pub fn new() -> Self {
        Self {
            buckets: DashMap::new(),
        }
    }

    /// Content type an object was stored with
    pub fn content_type(&self, bucket: &str, key: &str) -> Option<String> {
        let bucket_ref = self.bucket(bucket).ok()?;
        bucket_ref
            .objects
            .get(key)
            .map(|obj| obj.content_type.clone())
    }

    fn bucket(&self, bucket: &str) -> Result<Arc<InMemoryBucket>, StoreError> {
        self.buckets
            .get(bucket)
            .map(|r| Arc::clone(r.value()))
            .ok_or_else(|| StoreError::NoSuchBucket(bucket.to_string()))
    }

    fn compute_etag(data: &[u8]) -> String {
        let mut hasher = Md5::new();
        hasher.update(data);
        format!("\"{}\"", hex::encode(hasher.finalize()))
    }

    fn insert(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<(), StoreError> {
        let bucket_ref = self.bucket(bucket)?;
        let etag = Self::compute_etag(&data);

        bucket_ref.objects.insert(
            key.to_string(),
            InMemoryObject {
                data,
                etag,
                content_type: content_type.to_string(),
                last_modified: Utc::now(),
            },
        );
        Ok(())
    }
}

#[async_trait]
impl ObjectStoreClient for EphemeralClient {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError> {
        Ok(self.buckets.contains_key(bucket))
    }

    async fn create_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        match self.buckets.entry(bucket.to_string()) {
            Entry::Occupied(_) => Err(StoreError::BucketAlreadyExists(bucket.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(Arc::new(InMemoryBucket::new()));
                Ok(())
            }
        }
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        let bucket_ref = self.bucket(bucket)?;
        if !bucket_ref.objects.is_empty() {
            return Err(StoreError::BucketNotEmpty(bucket.to_string()));
        }

        self.buckets.remove(bucket);
        Ok(())
    }

    async fn list_buckets(&self) -> Result<Vec<String>, StoreError> {
        let mut names: Vec<String> = self.buckets.iter().map(|r| r.key().clone()).collect();
        names.sort();
        Ok(names)
    }

    async fn list_objects(&self, bucket: &str) -> Result<ObjectStream, StoreError> {
        let bucket_ref = self.bucket(bucket)?;

        let mut objects: Vec<ObjectSummary> = bucket_ref
            .objects
            .iter()
            .map(|entry| ObjectSummary {
                key: entry.key().clone(),
                size: entry.data.len() as u64,
                etag: Some(entry.etag.clone()),
                last_modified: Some(entry.last_modified),
                storage_class: Some("STANDARD".to_string()),
            })
            .collect();

        // Sort by key
        objects.sort_by(|a, b| a.key.cmp(&b.key));

        Ok(stream::iter(objects.into_iter().map(Ok)).boxed())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ByteStream, StoreError> {
        let bucket_ref = self.bucket(bucket)?;

        let data = bucket_ref
            .objects
            .get(key)
            .map(|obj| obj.data.clone())
            .ok_or_else(|| StoreError::no_such_key(bucket, key))?;

        Ok(byte_stream(data))
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: ByteStream,
    ) -> Result<(), StoreError> {
        // Fail before draining the body
        self.bucket(bucket)?;
        let data = collect_bytes(body).await?;
        self.insert(bucket, key, content_type, data)
    }

    async fn copy_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<(), StoreError> {
        let src = self.bucket(src_bucket)?;
        let (data, content_type) = match src.objects.get(src_key) {
            Some(obj) => (obj.data.clone(), obj.content_type.clone()),
            None => return Err(StoreError::no_such_key(src_bucket, src_key)),
        };

        self.insert(dest_bucket, dest_key, &content_type, data)
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StoreError> {
        let bucket_ref = self.bucket(bucket)?;
        bucket_ref.objects.remove(key);
        Ok(())
    }
}
