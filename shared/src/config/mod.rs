//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Token signing, cookie delivery and password hashing
//! - `database` - Database connection, pool and store-call timeout
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server binding

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthConfig, CookieConfig, JwtConfig, PasswordConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Prefix for environment variable overrides, e.g. `AUTH__DATABASE__URL`
pub const ENV_PREFIX: &str = "AUTH";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Defaults for the given environment
    pub fn for_environment(environment: Environment) -> Self {
        let mut auth = AuthConfig::default();
        auth.cookie.secure = environment.is_production();

        Self {
            environment,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth,
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load configuration from defaults, an optional per-environment file and the
    /// process environment
    ///
    /// Later sources win: defaults, then `config/<environment>.toml`, then `AUTH__*`
    /// variables, then the legacy single-name variables (`REFRESH_TOKEN_SECRET`,
    /// `DATABASE_URL`, `JWT_PRIVATE_KEY_PATH`, `JWT_PUBLIC_KEY_PATH`, `PORT`).
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        let defaults = Self::for_environment(environment);

        let mut loaded: AppConfig = config::Config::builder()
            .add_source(config::Config::try_from(&defaults)?)
            .add_source(config::File::with_name(environment.config_file()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        loaded.apply_legacy_env();
        loaded.validate()?;
        Ok(loaded)
    }

    fn apply_legacy_env(&mut self) {
        if let Ok(secret) = std::env::var("REFRESH_TOKEN_SECRET") {
            self.auth.jwt.refresh_token_secret = secret;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(path) = std::env::var("JWT_PRIVATE_KEY_PATH") {
            self.auth.jwt.private_key_path = path;
        }
        if let Ok(path) = std::env::var("JWT_PUBLIC_KEY_PATH") {
            self.auth.jwt.public_key_path = path;
        }
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    /// Reject configurations the service must not start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let jwt = &self.auth.jwt;

        if jwt.refresh_token_secret.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "auth.jwt.refresh_token_secret must not be empty".to_string(),
            ));
        }
        if self.environment.is_production() && jwt.is_using_default_secret() {
            return Err(ConfigError::Invalid(
                "the development refresh secret cannot be used in production".to_string(),
            ));
        }
        if jwt.access_token_expiry <= 0 || jwt.refresh_token_expiry <= 0 {
            return Err(ConfigError::Invalid(
                "token lifetimes must be positive".to_string(),
            ));
        }
        if self.auth.cleanup_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "auth.cleanup_interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.database.query_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "database.query_timeout_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
