//! Value types passed across the client seam

use bytes::{Bytes, BytesMut};
use chrono::{DateTime, Utc};
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde::Serialize;

use crate::error::StoreError;

/// Object body, read or written chunk by chunk
pub type ByteStream = BoxStream<'static, Result<Bytes, StoreError>>;

/// Lazy listing of a bucket
pub type ObjectStream = BoxStream<'static, Result<ObjectSummary, StoreError>>;

/// Summary of an object in a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectSummary {
    pub key: String,
    pub size: u64,
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub storage_class: Option<String>,
}

/// An upload that has already been received in full, e.g. a multipart form
/// field, carrying its own content type.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub content_type: String,
    pub data: Bytes,
}

impl FileUpload {
    pub fn new(content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn into_stream(self) -> ByteStream {
        byte_stream(self.data)
    }
}

/// Wrap an in-memory buffer as a single-chunk body stream
pub fn byte_stream(data: impl Into<Bytes>) -> ByteStream {
    stream::once(futures::future::ready(Ok(data.into()))).boxed()
}

/// Drain a body stream into one buffer
pub async fn collect_bytes(mut body: ByteStream) -> Result<Bytes, StoreError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = body.try_next().await? {
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}
