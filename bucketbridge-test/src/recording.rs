//! Call-recording client double

use async_trait::async_trait;
use bucketbridge_client::{EphemeralClient, ObjectStoreClient};
use bucketbridge_core::{ByteStream, ObjectStream, StoreError};
use parking_lot::Mutex;
use std::sync::Arc;

/// One remote call, as seen by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCall {
    BucketExists {
        bucket: String,
        exists: bool,
    },
    CreateBucket(String),
    DeleteBucket(String),
    ListBuckets,
    ListObjects(String),
    GetObject {
        bucket: String,
        key: String,
    },
    PutObject {
        bucket: String,
        key: String,
        content_type: String,
    },
    CopyObject {
        src_bucket: String,
        src_key: String,
        dest_bucket: String,
        dest_key: String,
    },
    DeleteObject {
        bucket: String,
        key: String,
    },
}

impl ClientCall {
    pub fn bucket_exists(bucket: &str, exists: bool) -> Self {
        Self::BucketExists {
            bucket: bucket.to_string(),
            exists,
        }
    }

    pub fn create_bucket(bucket: &str) -> Self {
        Self::CreateBucket(bucket.to_string())
    }

    pub fn delete_bucket(bucket: &str) -> Self {
        Self::DeleteBucket(bucket.to_string())
    }

    pub fn put_object(bucket: &str, key: &str, content_type: &str) -> Self {
        Self::PutObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            content_type: content_type.to_string(),
        }
    }

    pub fn copy_object(src_bucket: &str, src_key: &str, dest_bucket: &str, dest_key: &str) -> Self {
        Self::CopyObject {
            src_bucket: src_bucket.to_string(),
            src_key: src_key.to_string(),
            dest_bucket: dest_bucket.to_string(),
            dest_key: dest_key.to_string(),
        }
    }

    pub fn delete_object(bucket: &str, key: &str) -> Self {
        Self::DeleteObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
        }
    }

    /// Bucket the call targets, if any. Copies report their source bucket.
    pub fn bucket(&self) -> Option<&str> {
        match self {
            Self::BucketExists { bucket, .. }
            | Self::GetObject { bucket, .. }
            | Self::PutObject { bucket, .. }
            | Self::DeleteObject { bucket, .. } => Some(bucket),
            Self::CreateBucket(bucket) | Self::DeleteBucket(bucket) | Self::ListObjects(bucket) => {
                Some(bucket)
            }
            Self::CopyObject { src_bucket, .. } => Some(src_bucket),
            Self::ListBuckets => None,
        }
    }
}

/// Client that records every call before delegating to an inner client.
///
/// `bucket_exists` is recorded once its answer is known, so the journal
/// shows what the caller saw. Failed existence checks are not recorded.
pub struct RecordingClient {
    inner: Arc<dyn ObjectStoreClient>,
    calls: Mutex<Vec<ClientCall>>,
}

impl RecordingClient {
    pub fn new(inner: Arc<dyn ObjectStoreClient>) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Recorder over a fresh in-memory store
    pub fn ephemeral() -> Self {
        Self::new(Arc::new(EphemeralClient::new()))
    }

    /// Create a bucket in the inner store without recording it
    pub async fn seed_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        self.inner.create_bucket(bucket).await
    }

    /// Snapshot of the journal
    pub fn calls(&self) -> Vec<ClientCall> {
        self.calls.lock().clone()
    }

    /// Number of recorded calls matching a predicate
    pub fn count(&self, pred: impl Fn(&ClientCall) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| pred(c)).count()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: ClientCall) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl ObjectStoreClient for RecordingClient {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError> {
        let exists = self.inner.bucket_exists(bucket).await?;
        self.record(ClientCall::bucket_exists(bucket, exists));
        Ok(exists)
    }

    async fn create_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        self.record(ClientCall::create_bucket(bucket));
        self.inner.create_bucket(bucket).await
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        self.record(ClientCall::delete_bucket(bucket));
        self.inner.delete_bucket(bucket).await
    }

    async fn list_buckets(&self) -> Result<Vec<String>, StoreError> {
        self.record(ClientCall::ListBuckets);
        self.inner.list_buckets().await
    }

    async fn list_objects(&self, bucket: &str) -> Result<ObjectStream, StoreError> {
        self.record(ClientCall::ListObjects(bucket.to_string()));
        self.inner.list_objects(bucket).await
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ByteStream, StoreError> {
        self.record(ClientCall::GetObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
        });
        self.inner.get_object(bucket, key).await
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: ByteStream,
    ) -> Result<(), StoreError> {
        self.record(ClientCall::put_object(bucket, key, content_type));
        self.inner.put_object(bucket, key, content_type, body).await
    }

    async fn copy_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<(), StoreError> {
        self.record(ClientCall::copy_object(src_bucket, src_key, dest_bucket, dest_key));
        self.inner
            .copy_object(src_bucket, src_key, dest_bucket, dest_key)
            .await
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StoreError> {
        self.record(ClientCall::delete_object(bucket, key));
        self.inner.delete_object(bucket, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_in_order() {
        let recorder = RecordingClient::ephemeral();

        assert!(!recorder.bucket_exists("docs").await.unwrap());
        recorder.create_bucket("docs").await.unwrap();
        assert!(recorder.bucket_exists("docs").await.unwrap());

        assert_eq!(
            recorder.calls(),
            vec![
                ClientCall::bucket_exists("docs", false),
                ClientCall::create_bucket("docs"),
                ClientCall::bucket_exists("docs", true),
            ]
        );
    }

    #[tokio::test]
    async fn test_seed_is_not_recorded() {
        let recorder = RecordingClient::ephemeral();
        recorder.seed_bucket("docs").await.unwrap();

        assert!(recorder.calls().is_empty());
        assert!(recorder.bucket_exists("docs").await.unwrap());
    }

    #[tokio::test]
    async fn test_failed_calls_are_still_recorded() {
        let recorder = RecordingClient::ephemeral();

        let result = recorder.delete_bucket("ghost").await;
        assert!(matches!(result, Err(StoreError::NoSuchBucket(_))));
        assert_eq!(recorder.calls(), vec![ClientCall::delete_bucket("ghost")]);
    }

    #[tokio::test]
    async fn test_count_and_clear() {
        let recorder = RecordingClient::ephemeral();
        recorder.list_buckets().await.unwrap();
        recorder.list_buckets().await.unwrap();

        assert_eq!(recorder.count(|c| *c == ClientCall::ListBuckets), 2);
        assert_eq!(recorder.count(|c| c.bucket().is_some()), 0);

        recorder.clear();
        assert!(recorder.calls().is_empty());
    }
}
