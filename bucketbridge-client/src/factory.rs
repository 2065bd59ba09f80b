//! Client construction from configuration

use crate::s3::S3Client;
use crate::traits::ObjectStoreClient;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use bucketbridge_core::{StorageConfig, StoreError};
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

/// Provider name attached to the static credentials
const CREDENTIALS_PROVIDER: &str = "bucketbridge";

/// Builds the long-lived store client from a [`StorageConfig`].
pub struct ClientFactory;

impl ClientFactory {
    /// Build an S3 client bound to the configured endpoint, credentials and
    /// region. Only the static credentials from the configuration are used.
    pub fn build(config: &StorageConfig) -> Result<S3Client, StoreError> {
        let endpoint = validate_endpoint(&config.endpoint)?;

        if config.uses_default_credentials() {
            warn!(
                endpoint = %endpoint,
                "Using built-in default credentials for the object store"
            );
        }

        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER,
        );

        // MinIO serves buckets by path, not by virtual host
        let sdk_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(endpoint.clone())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        info!(endpoint = %endpoint, region = %config.region, "Created object store client");

        Ok(S3Client::new(
            aws_sdk_s3::Client::from_conf(sdk_config),
            config.region.clone(),
        ))
    }

    /// Build the client as a shareable handle
    pub fn shared(config: &StorageConfig) -> Result<Arc<dyn ObjectStoreClient>, StoreError> {
        Ok(Arc::new(Self::build(config)?))
    }
}

/// Check that the endpoint is an absolute http(s) URL with a host and return
/// it without a trailing slash.
fn validate_endpoint(endpoint: &str) -> Result<String, StoreError> {
    let invalid = |reason: String| StoreError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };

    let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}
