//! Storage connection configuration

use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Environment variable prefix (`MINIO_ENDPOINT`, `MINIO_ACCESS_KEY`, ...)
pub const ENV_PREFIX: &str = "MINIO";

/// Base name of the optional configuration file in the working directory
pub const CONFIG_FILE: &str = "bucketbridge";

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:9000";
pub const DEFAULT_ACCESS_KEY: &str = "access_key";
pub const DEFAULT_SECRET_KEY: &str = "secret_key";
pub const DEFAULT_REGION: &str = "eu-west-1";

/// Connection parameters for the object store.
///
/// Every field has a default, so an empty configuration is valid and points
/// at a local MinIO with its sample credentials.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_endpoint", alias = "url")]
    pub endpoint: String,

    #[serde(
        default = "default_access_key",
        alias = "accessKey",
        alias = "accesskey"
    )]
    pub access_key: String,

    #[serde(
        default = "default_secret_key",
        alias = "secretKey",
        alias = "secretkey"
    )]
    pub secret_key: String,

    #[serde(default = "default_region")]
    pub region: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            access_key: default_access_key(),
            secret_key: default_secret_key(),
            region: default_region(),
        }
    }
}

impl fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageConfig")
            .field("endpoint", &self.endpoint)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("region", &self.region)
            .finish()
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_access_key() -> String {
    DEFAULT_ACCESS_KEY.to_string()
}

fn default_secret_key() -> String {
    DEFAULT_SECRET_KEY.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
}

impl StorageConfig {
    /// Load configuration from the optional `bucketbridge.*` file and `MINIO_*`
    /// environment variables. Missing sources fall back to defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::from_sources(
            config::File::with_name(CONFIG_FILE).required(false),
            environment(),
        )
    }

    /// Load configuration from an explicit file, still overridable from the
    /// environment. The file must exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::from_sources(
            config::File::from(path.as_ref()).required(true),
            environment(),
        )
    }

    fn from_sources<S>(file: S, env: config::Environment) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?;

        config.try_deserialize::<StorageConfig>()
    }

    /// True when either credential is still the built-in placeholder.
    pub fn uses_default_credentials(&self) -> bool {
        self.access_key == DEFAULT_ACCESS_KEY || self.secret_key == DEFAULT_SECRET_KEY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env_vars(pairs: &[(&str, &str)]) -> config::Environment {
        let mut vars = config::Map::new();
        for (key, value) in pairs {
            vars.insert((*key).to_string(), (*value).to_string());
        }
        environment().source(Some(vars))
    }

    fn no_file() -> config::File<config::FileSourceFile, config::FileFormat> {
        config::File::with_name("bucketbridge-test-missing").required(false)
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_values() {
        let config = StorageConfig::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:9000");
        assert_eq!(config.access_key, "access_key");
        assert_eq!(config.secret_key, "secret_key");
        assert_eq!(config.region, "eu-west-1");
    }

    #[test]
    fn test_unset_sources_resolve_to_defaults() {
        let config = StorageConfig::from_sources(no_file(), env_vars(&[])).unwrap();
        assert_eq!(config, StorageConfig::default());
    }

    #[test]
    fn test_environment_overrides_defaults() {
        let config = StorageConfig::from_sources(
            no_file(),
            env_vars(&[
                ("MINIO_ENDPOINT", "https://minio.internal:9443"),
                ("MINIO_ACCESS_KEY", "svc-uploader"),
            ]),
        )
        .unwrap();

        assert_eq!(config.endpoint, "https://minio.internal:9443");
        assert_eq!(config.access_key, "svc-uploader");
        assert_eq!(config.secret_key, DEFAULT_SECRET_KEY);
        assert_eq!(config.region, DEFAULT_REGION);
    }

    #[test]
    fn test_unrelated_environment_is_ignored() {
        let config = StorageConfig::from_sources(
            no_file(),
            env_vars(&[("AWS_REGION", "us-east-2"), ("PATH", "/usr/bin")]),
        )
        .unwrap();
        assert_eq!(config, StorageConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let file = toml_file(
            r#"
endpoint = "http://storage:9000"
access_key = "reader"
secret_key = "hunter2"
"#,
        );

        let config = StorageConfig::from_sources(
            config::File::from(file.path()).required(true),
            env_vars(&[]),
        )
        .unwrap();

        assert_eq!(config.endpoint, "http://storage:9000");
        assert_eq!(config.access_key, "reader");
        assert_eq!(config.secret_key, "hunter2");
        assert_eq!(config.region, DEFAULT_REGION);
    }

    #[test]
    fn test_file_accepts_url_alias() {
        let file = toml_file("url = \"http://legacy:9000\"\n");

        let config = StorageConfig::from_sources(
            config::File::from(file.path()).required(true),
            env_vars(&[]),
        )
        .unwrap();

        assert_eq!(config.endpoint, "http://legacy:9000");
    }

    #[test]
    fn test_environment_wins_over_file() {
        let file = toml_file("region = \"us-west-2\"\n");

        let config = StorageConfig::from_sources(
            config::File::from(file.path()).required(true),
            env_vars(&[("MINIO_REGION", "ap-south-1")]),
        )
        .unwrap();

        assert_eq!(config.region, "ap-south-1");
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let result = StorageConfig::load_from("/nonexistent/bucketbridge.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_file_fails() {
        let file = toml_file("endpoint = [unterminated\n");

        let result = StorageConfig::from_sources(
            config::File::from(file.path()).required(true),
            env_vars(&[]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = StorageConfig {
            secret_key: "super-secret-value".to_string(),
            ..StorageConfig::default()
        };

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret-value"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("http://127.0.0.1:9000"));
    }

    #[test]
    fn test_uses_default_credentials() {
        assert!(StorageConfig::default().uses_default_credentials());

        let only_access = StorageConfig {
            access_key: "svc".to_string(),
            ..StorageConfig::default()
        };
        assert!(only_access.uses_default_credentials());

        let explicit = StorageConfig {
            access_key: "svc".to_string(),
            secret_key: "s3cr3t".to_string(),
            ..StorageConfig::default()
        };
        assert!(!explicit.uses_default_credentials());
    }
}
