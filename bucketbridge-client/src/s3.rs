//! S3-compatible object store client

use super::traits::ObjectStoreClient;
use async_trait::async_trait;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream as SdkByteStream;
use aws_sdk_s3::types::{BucketLocationConstraint, CreateBucketConfiguration, Object};
use bucketbridge_core::{collect_bytes, ByteStream, ObjectStream, ObjectSummary, StoreError};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is in the `x-amz-copy-source` key
const COPY_SOURCE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Region that must not be sent as a location constraint
const US_EAST_1: &str = "us-east-1";

/// Client for MinIO and other S3-compatible stores.
///
/// Cloning is cheap; the underlying SDK client shares its connection pool.
#[derive(Clone, Debug)]
pub struct S3Client {
    client: aws_sdk_s3::Client,
    region: String,
}

impl S3Client {
    pub fn new(client: aws_sdk_s3::Client, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }

    /// Get reference to the SDK client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.client
    }

    fn bucket_configuration(&self) -> Option<CreateBucketConfiguration> {
        if self.region.is_empty() || self.region == US_EAST_1 {
            return None;
        }

        Some(
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(self.region.as_str()))
                .build(),
        )
    }
}

/// Map an SDK failure onto [`StoreError`], keeping the original error for
/// anything without a dedicated variant.
fn map_sdk_error<E, R>(err: SdkError<E, R>, bucket: &str, key: Option<&str>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let code = err
        .as_service_error()
        .and_then(|e| e.code())
        .map(str::to_owned);

    match (code.as_deref(), key) {
        (Some("NoSuchBucket"), _) => StoreError::NoSuchBucket(bucket.to_string()),
        (Some("NoSuchKey"), Some(key)) => StoreError::no_such_key(bucket, key),
        (Some("BucketAlreadyExists" | "BucketAlreadyOwnedByYou"), _) => {
            StoreError::BucketAlreadyExists(bucket.to_string())
        }
        (Some("BucketNotEmpty"), _) => StoreError::BucketNotEmpty(bucket.to_string()),
        _ => StoreError::backend(err),
    }
}

fn copy_source(bucket: &str, key: &str) -> String {
    format!("{}/{}", bucket, utf8_percent_encode(key, COPY_SOURCE))
}

fn summary_from(obj: &Object) -> ObjectSummary {
    ObjectSummary {
        key: obj.key().unwrap_or_default().to_string(),
        size: obj.size().and_then(|s| u64::try_from(s).ok()).unwrap_or(0),
        etag: obj.e_tag().map(str::to_string),
        last_modified: obj
            .last_modified()
            .and_then(|t| DateTime::<Utc>::from_timestamp(t.secs(), t.subsec_nanos())),
        storage_class: obj.storage_class().map(|c| c.as_str().to_string()),
    }
}

#[async_trait]
impl ObjectStoreClient for S3Client {
    async fn bucket_exists(&self, bucket: &str) -> Result<bool, StoreError> {
        match self.client.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => Ok(false),
            Err(err) => Err(map_sdk_error(err, bucket, None)),
        }
    }

    async fn create_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        self.client
            .create_bucket()
            .bucket(bucket)
            .set_create_bucket_configuration(self.bucket_configuration())
            .send()
            .await
            .map_err(|e| map_sdk_error(e, bucket, None))?;
        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<(), StoreError> {
        self.client
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, bucket, None))?;
        Ok(())
    }

    async fn list_buckets(&self) -> Result<Vec<String>, StoreError> {
        let output = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(StoreError::backend)?;

        Ok(output
            .buckets()
            .iter()
            .filter_map(|b| b.name().map(str::to_string))
            .collect())
    }

    async fn list_objects(&self, bucket: &str) -> Result<ObjectStream, StoreError> {
        let pages = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .into_paginator()
            .send();

        // Nothing is requested until the stream is polled
        let bucket = bucket.to_string();
        let objects = stream::unfold(pages, move |mut pages| {
            let bucket = bucket.clone();
            async move {
                let items: Vec<Result<ObjectSummary, StoreError>> = match pages.next().await? {
                    Ok(page) => page.contents().iter().map(|obj| Ok(summary_from(obj))).collect(),
                    Err(err) => vec![Err(map_sdk_error(err, &bucket, None))],
                };
                Some((stream::iter(items), pages))
            }
        })
        .flatten();

        Ok(objects.boxed())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ByteStream, StoreError> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, bucket, Some(key)))?;

        let chunks = stream::unfold(output.body, |mut body| async move {
            let chunk = body.next().await?;
            Some((chunk.map_err(|e| StoreError::Body(e.to_string())), body))
        });

        Ok(chunks.boxed())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        body: ByteStream,
    ) -> Result<(), StoreError> {
        // Single PutObject; the request needs a known content length
        let data = collect_bytes(body).await?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(SdkByteStream::from(data))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, bucket, Some(key)))?;
        Ok(())
    }

    async fn copy_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<(), StoreError> {
        self.client
            .copy_object()
            .copy_source(copy_source(src_bucket, src_key))
            .bucket(dest_bucket)
            .key(dest_key)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, src_bucket, Some(src_key)))?;
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), StoreError> {
        self.client
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, bucket, Some(key)))?;
        Ok(())
    }
}
