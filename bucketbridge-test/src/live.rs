//! Access to a real MinIO for end-to-end tests

use bucketbridge_core::StorageConfig;
use rand::Rng;
use std::time::Duration;
use tracing::info;

use crate::STARTUP_TIMEOUT_SECS;

/// Environment variable that enables live tests
pub const LIVE_ENDPOINT_VAR: &str = "BUCKETBRIDGE_LIVE_ENDPOINT";
pub const LIVE_ACCESS_KEY_VAR: &str = "BUCKETBRIDGE_LIVE_ACCESS_KEY";
pub const LIVE_SECRET_KEY_VAR: &str = "BUCKETBRIDGE_LIVE_SECRET_KEY";
pub const LIVE_REGION_VAR: &str = "BUCKETBRIDGE_LIVE_REGION";

/// Health endpoint served by MinIO
const HEALTH_PATH: &str = "/minio/health/live";

/// A MinIO instance reachable from the test process
pub struct LiveMinio {
    config: StorageConfig,
    http: reqwest::Client,
}

impl LiveMinio {
    /// Read the live store settings from the environment. Returns `None`
    /// when `BUCKETBRIDGE_LIVE_ENDPOINT` is unset.
    pub fn from_env() -> Option<Self> {
        let endpoint = std::env::var(LIVE_ENDPOINT_VAR).ok()?;
        let defaults = StorageConfig::default();

        let config = StorageConfig {
            endpoint,
            access_key: std::env::var(LIVE_ACCESS_KEY_VAR).unwrap_or(defaults.access_key),
            secret_key: std::env::var(LIVE_SECRET_KEY_VAR).unwrap_or(defaults.secret_key),
            region: std::env::var(LIVE_REGION_VAR).unwrap_or(defaults.region),
        };

        Some(Self::new(config))
    }

    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// URL of the MinIO liveness probe
    pub fn health_url(&self) -> String {
        format!("{}{}", self.config.endpoint.trim_end_matches('/'), HEALTH_PATH)
    }

    /// Poll the liveness probe until it answers with success
    pub async fn wait_ready(&self) -> anyhow::Result<()> {
        let url = self.health_url();
        let start = std::time::Instant::now();

        while start.elapsed() < Duration::from_secs(STARTUP_TIMEOUT_SECS) {
            if let Ok(response) = self.http.get(&url).send().await {
                if response.status().is_success() {
                    info!(endpoint = %self.config.endpoint, "MinIO ready");
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(250)).await;
        }

        anyhow::bail!("MinIO at {} not ready after {}s", url, STARTUP_TIMEOUT_SECS)
    }

    /// Bucket name that will not collide with other test runs
    pub fn unique_bucket(prefix: &str) -> String {
        let suffix: u32 = rand::thread_rng().gen();
        format!("{}-{:08x}", prefix, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_url() {
        let live = LiveMinio::new(StorageConfig {
            endpoint: "http://minio:9000/".to_string(),
            ..StorageConfig::default()
        });
        assert_eq!(live.health_url(), "http://minio:9000/minio/health/live");
    }

    #[test]
    fn test_unique_bucket_is_valid_name() {
        let name = LiveMinio::unique_bucket("bb-test");
        assert!(name.starts_with("bb-test-"));
        assert_eq!(name.len(), "bb-test-".len() + 8);
        assert!(name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }
}
