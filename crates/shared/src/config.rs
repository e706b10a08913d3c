//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Object storage configuration.
    pub storage: StorageSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest accepted request body in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024 // 10 MiB
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Object storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// S3-compatible endpoint URL, e.g. `http://localhost:9000` for MinIO.
    pub endpoint: String,
    /// Destination bucket for uploads.
    pub bucket: String,
    /// Access key ID.
    pub access_key: String,
    /// Secret access key.
    pub secret_key: String,
    /// Region name. Self-hosted backends accept any value here.
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("DEPOT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage_vars() -> Vec<(&'static str, Option<&'static str>)> {
        vec![
            ("DEPOT__STORAGE__ENDPOINT", Some("http://localhost:9000")),
            ("DEPOT__STORAGE__BUCKET", Some("uploads")),
            ("DEPOT__STORAGE__ACCESS_KEY", Some("minioadmin")),
            ("DEPOT__STORAGE__SECRET_KEY", Some("minioadmin")),
        ]
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(storage_vars(), || {
            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.storage.endpoint, "http://localhost:9000");
            assert_eq!(config.storage.bucket, "uploads");
            assert_eq!(config.storage.access_key, "minioadmin");
        });
    }

    #[test]
    fn test_defaults_applied_when_unset() {
        temp_env::with_vars(storage_vars(), || {
            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.server.max_upload_bytes, 10 * 1024 * 1024);
            assert_eq!(config.storage.region, "us-east-1");
        });
    }

    #[test]
    fn test_server_overrides_from_environment() {
        let mut vars = storage_vars();
        vars.push(("DEPOT__SERVER__HOST", Some("127.0.0.1")));
        vars.push(("DEPOT__SERVER__PORT", Some("9090")));
        vars.push(("DEPOT__STORAGE__REGION", Some("auto")));
        temp_env::with_vars(vars, || {
            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.server.host, "127.0.0.1");
            assert_eq!(config.server.port, 9090);
            assert_eq!(config.storage.region, "auto");
        });
    }

    #[test]
    fn test_load_fails_without_storage_settings() {
        temp_env::with_vars(
            vec![
                ("DEPOT__STORAGE__ENDPOINT", None::<&str>),
                ("DEPOT__STORAGE__BUCKET", None),
                ("DEPOT__STORAGE__ACCESS_KEY", None),
                ("DEPOT__STORAGE__SECRET_KEY", None),
            ],
            || {
                assert!(AppConfig::load().is_err());
            },
        );
    }
}
