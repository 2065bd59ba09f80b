//! Core types for bucketbridge
//!
//! This crate provides the connection configuration, the error type and the
//! value types shared by the client backends and the storage facade.

pub mod config;
pub mod error;
pub mod types;

pub use config::StorageConfig;
pub use error::StoreError;
pub use types::{byte_stream, collect_bytes, ByteStream, FileUpload, ObjectStream, ObjectSummary};
