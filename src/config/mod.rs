//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PUBSUB_PROXY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use pubsub_proxy::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.bind_addr());
//! ```

mod broker;
mod error;
mod server;

pub use broker::{BrokerBackend, BrokerConfig};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig, MAX_REQUEST_TIMEOUT_SECS};

use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "PUBSUB_PROXY";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a proxy
/// listening on `0.0.0.0:8080` with the in-memory broker.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Broker selection, publisher limits and Redis connection
    #[serde(default)]
    pub broker: BrokerConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PUBSUB_PROXY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PUBSUB_PROXY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PUBSUB_PROXY__BROKER__BACKEND=redis` -> `broker.backend = redis`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();
        Self::from_environment()
    }

    /// Like [`AppConfig::load`], but reads the given env file, which must exist.
    pub fn load_from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        dotenvy::from_path(path.as_ref())?;
        Self::from_environment()
    }

    fn from_environment() -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Redis settings are only checked when the Redis backend is selected.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.broker.validate()
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "PUBSUB_PROXY__SERVER__PORT",
        "PUBSUB_PROXY__SERVER__ENVIRONMENT",
        "PUBSUB_PROXY__BROKER__BACKEND",
        "PUBSUB_PROXY__BROKER__MAX_MESSAGE_BYTES",
        "PUBSUB_PROXY__BROKER__REDIS_URL",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.broker.backend, BrokerBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PUBSUB_PROXY__SERVER__PORT", "3000");
        env::set_var("PUBSUB_PROXY__BROKER__BACKEND", "redis");
        env::set_var("PUBSUB_PROXY__BROKER__MAX_MESSAGE_BYTES", "1024");
        env::set_var("PUBSUB_PROXY__BROKER__REDIS_URL", "redis://localhost:6379");
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.broker.backend, BrokerBackend::Redis);
        assert_eq!(config.broker.max_message_bytes, 1024);
        assert_eq!(config.broker.redis_url, "redis://localhost:6379");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PUBSUB_PROXY__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        assert!(result.unwrap().is_production());
    }

    #[test]
    fn test_redis_backend_requires_url() {
        let config = AppConfig {
            broker: BrokerConfig {
                backend: BrokerBackend::Redis,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("BROKER__REDIS_URL"))
        );
    }

    #[test]
    fn test_memory_backend_ignores_redis_settings() {
        let config = AppConfig {
            broker: BrokerConfig {
                redis_url: "not a url".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_env_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "PUBSUB_PROXY__SERVER__PORT=9090").unwrap();
        writeln!(file, "PUBSUB_PROXY__BROKER__BACKEND=redis").unwrap();
        writeln!(file, "PUBSUB_PROXY__BROKER__REDIS_URL=redis://cache:6379").unwrap();

        let result = AppConfig::load_from_env_file(file.path());
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.broker.backend, BrokerBackend::Redis);
        assert_eq!(config.broker.redis_url, "redis://cache:6379");
    }

    #[test]
    fn test_missing_env_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from_env_file(dir.path().join("missing.env"));
        assert!(matches!(result, Err(ConfigError::EnvFile(_))));
    }
}
