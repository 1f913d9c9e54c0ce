//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `NEXT_SUBSCRIPTION` prefix and nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use next_subscription::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod auth;
mod database;
mod encryption;
mod error;
mod server;

pub use auth::{AuthConfig, SESSION_COOKIE};
pub use database::DatabaseConfig;
pub use encryption::EncryptionConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the Next Subscription backend.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Authentication configuration (JWT sessions)
    pub auth: AuthConfig,

    /// Credential encryption configuration (AES-256-GCM key)
    pub encryption: EncryptionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `NEXT_SUBSCRIPTION` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `NEXT_SUBSCRIPTION__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `NEXT_SUBSCRIPTION__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required environment variables are missing
    /// or values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("NEXT_SUBSCRIPTION")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.encryption.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn valid() -> AppConfig {
        AppConfig {
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgresql://user@localhost/next_subscription".into(),
                ..Default::default()
            },
            auth: AuthConfig {
                jwt_secret: SecretString::new("0123456789abcdef0123456789abcdef".into()),
                ..Default::default()
            },
            encryption: EncryptionConfig {
                key: SecretString::new("0123456789abcdef0123456789abcdef".into()),
            },
        }
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn validation_fails_when_any_section_is_invalid() {
        let mut config = valid();
        config.database.url = String::new();
        assert!(config.validate().is_err());

        let mut config = valid();
        config.auth.jwt_secret = SecretString::new("short".into());
        assert!(config.validate().is_err());

        let mut config = valid();
        config.encryption.key = SecretString::new("short".into());
        assert!(config.validate().is_err());
    }
}
