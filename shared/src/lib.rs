//! Shared configuration and common types for the auth service
//!
//! This crate provides functionality used across all server crates:
//! - Configuration types and the layered loader
//! - The error response body returned by the HTTP layer

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, CookieConfig, DatabaseConfig, Environment, JwtConfig,
    LogFormat, LoggingConfig, PasswordConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
