//! Object store clients for bucketbridge
//!
//! [`ObjectStoreClient`] is the seam between the storage facade and the
//! remote store. [`S3Client`] talks to MinIO or any other S3-compatible
//! endpoint, [`EphemeralClient`] keeps everything in memory.

mod ephemeral;
mod factory;
mod s3;
mod traits;


pub use ephemeral::EphemeralClient;
pub use factory::ClientFactory;
pub use s3::S3Client;
pub use traits::ObjectStoreClient;

pub use bucketbridge_core::{ByteStream, ObjectStream, ObjectSummary, StoreError};
