use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Upper bound on concurrent detail fetches during a fan-out
const MAX_FANOUT_CONCURRENCY: usize = 256;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Upstream base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("Invalid base_url: {0}. Must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid ttl_secs: {0}. Must be at least 1")]
    InvalidTtl(u64),

    #[error("Invalid max_artist_id: {0}. Must be at least 1")]
    InvalidMaxArtistId(u32),

    #[error("Invalid fanout_concurrency: {0}. Must be between 1 and 256")]
    InvalidFanoutConcurrency(usize),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .tourbook/config.yaml (project config)
    /// 3. .tourbook/local.yaml (local overrides, optional)
    /// 4. Environment variables (TOURBOOK_* prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".tourbook/config.yaml"))
            .merge(Yaml::file(".tourbook/local.yaml"))
            .merge(Env::prefixed("TOURBOOK_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Environment variables still override values from the file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("TOURBOOK_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let base_url = config.upstream.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
        }

        if config.upstream.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.upstream.timeout_secs));
        }

        if config.cache.ttl_secs == 0 {
            return Err(ConfigError::InvalidTtl(config.cache.ttl_secs));
        }

        if config.catalog.max_artist_id == 0 {
            return Err(ConfigError::InvalidMaxArtistId(config.catalog.max_artist_id));
        }

        let fanout = config.catalog.fanout_concurrency;
        if fanout == 0 || fanout > MAX_FANOUT_CONCURRENCY {
            return Err(ConfigError::InvalidFanoutConcurrency(fanout));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const OVERRIDE_VARS: [&str; 2] = ["TOURBOOK_CACHE__TTL_SECS", "TOURBOOK_UPSTREAM__BASE_URL"];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.upstream.base_url,
            "https://groupietrackers.herokuapp.com/api"
        );
        assert_eq!(config.upstream.timeout_secs, 30);
        assert_eq!(config.cache.ttl_secs, 300);
        assert_eq!(config.catalog.max_artist_id, 52);
        assert_eq!(config.catalog.fanout_concurrency, 16);
        assert_eq!(config.logging.level, "info");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
upstream:
  base_url: http://localhost:8080/api
  timeout_secs: 5
cache:
  ttl_secs: 60
catalog:
  max_artist_id: 10
  fanout_concurrency: 4
logging:
  level: debug
  format: json
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.upstream.base_url, "http://localhost:8080/api");
        assert_eq!(config.upstream.timeout_secs, 5);
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.catalog.max_artist_id, 10);
        assert_eq!(config.catalog.fanout_concurrency, 4);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.rotation, "daily");

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: Config = serde_yaml::from_str("cache:\n  ttl_secs: 5\n").unwrap();
        assert_eq!(config.cache.ttl_secs, 5);
        assert_eq!(config.catalog.max_artist_id, 52);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_validate_empty_base_url() {
        let mut config = Config::default();
        config.upstream.base_url = "  ".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::EmptyBaseUrl
        ));
    }

    #[test]
    fn test_validate_non_http_base_url() {
        let mut config = Config::default();
        config.upstream.base_url = "ftp://example.com".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidBaseUrl(url) => assert_eq!(url, "ftp://example.com"),
            other => panic!("Expected InvalidBaseUrl error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.upstream.timeout_secs = 0;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidTimeout(0)
        ));
    }

    #[test]
    fn test_validate_zero_ttl() {
        let mut config = Config::default();
        config.cache.ttl_secs = 0;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidTtl(0)
        ));
    }

    #[test]
    fn test_validate_zero_max_artist_id() {
        let mut config = Config::default();
        config.catalog.max_artist_id = 0;

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidMaxArtistId(0)
        ));
    }

    #[test]
    fn test_validate_fanout_bounds() {
        let mut config = Config::default();

        config.catalog.fanout_concurrency = 0;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidFanoutConcurrency(0)
        ));

        config.catalog.fanout_concurrency = 257;
        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidFanoutConcurrency(257)
        ));

        config.catalog.fanout_concurrency = 256;
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogFormat(format) => assert_eq!(format, "xml"),
            other => panic!("Expected InvalidLogFormat error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_rotation() {
        let mut config = Config::default();
        config.logging.rotation = "weekly".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config).unwrap_err(),
            ConfigError::InvalidLogRotation(_)
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cache:\n  ttl_secs: 42\ncatalog:\n  fanout_concurrency: 2").unwrap();

        // Serialized with the env override test through temp-env's lock.
        temp_env::with_vars_unset(OVERRIDE_VARS, || {
            let config = ConfigLoader::load_from_file(file.path()).unwrap();
            assert_eq!(config.cache.ttl_secs, 42);
            assert_eq!(config.catalog.fanout_concurrency, 2);
        });
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cache:\n  ttl_secs: 0").unwrap();

        temp_env::with_vars_unset(OVERRIDE_VARS, || {
            assert!(ConfigLoader::load_from_file(file.path()).is_err());
        });
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "cache:\n  ttl_secs: 42").unwrap();

        temp_env::with_vars(
            [
                ("TOURBOOK_CACHE__TTL_SECS", Some("7")),
                ("TOURBOOK_UPSTREAM__BASE_URL", Some("http://mirror.test/api")),
            ],
            || {
                let config = ConfigLoader::load_from_file(file.path()).unwrap();
                assert_eq!(config.cache.ttl_secs, 7);
                assert_eq!(config.upstream.base_url, "http://mirror.test/api");
            },
        );
    }
}
