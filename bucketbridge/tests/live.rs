//! End-to-end test against a real MinIO
//!
//! Ignored by default. Run with a MinIO listening and
//! `BUCKETBRIDGE_LIVE_ENDPOINT` set:
//!
//! ```text
//! BUCKETBRIDGE_LIVE_ENDPOINT=http://127.0.0.1:9000 \
//! BUCKETBRIDGE_LIVE_ACCESS_KEY=minioadmin BUCKETBRIDGE_LIVE_SECRET_KEY=minioadmin \
//!     cargo test -p bucketbridge --test live -- --ignored
//! ```

use bucketbridge::{byte_stream, collect_bytes, ObjectSummary, StorageService, StoreError};
use bucketbridge_test::{init_tracing, LiveMinio};
use futures::TryStreamExt;

#[tokio::test]
#[ignore = "needs a running MinIO"]
async fn test_round_trip_against_minio() {
    init_tracing();
    let Some(live) = LiveMinio::from_env() else {
        eprintln!("BUCKETBRIDGE_LIVE_ENDPOINT not set, skipping");
        return;
    };
    live.wait_ready().await.unwrap();

    let service = StorageService::from_config(live.config()).unwrap();
    let bucket = LiveMinio::unique_bucket("bb-live");

    assert!(!service.bucket_exists(&bucket).await.unwrap());

    let key = service
        .save_file(&bucket, "dir/a b.txt", "text/plain", byte_stream("hello minio"))
        .await
        .unwrap();
    assert_eq!(key, "dir/a b.txt");
    assert!(service.list_buckets().await.unwrap().contains(&bucket));

    service
        .copy_object(&bucket, "dir/a b.txt", "copy.txt")
        .await
        .unwrap();

    let body = service.get_object(&bucket, "copy.txt").await.unwrap();
    assert_eq!(&collect_bytes(body).await.unwrap()[..], b"hello minio");

    let objects: Vec<ObjectSummary> = service
        .list_objects(&bucket)
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    let keys: Vec<&str> = objects.iter().map(|o| o.key.as_str()).collect();
    assert_eq!(keys, vec!["copy.txt", "dir/a b.txt"]);

    let missing = service.get_object(&bucket, "nope.txt").await;
    assert!(matches!(missing, Err(StoreError::NoSuchKey { .. })));
    assert!(missing.err().is_some_and(|e| e.is_not_found()));

    service.remove_object(&bucket, "dir/a b.txt").await.unwrap();
    service.remove_object(&bucket, "copy.txt").await.unwrap();
    service.remove_bucket(&bucket).await.unwrap();
    assert!(!service.bucket_exists(&bucket).await.unwrap());
}
