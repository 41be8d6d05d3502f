//! # Infrastructure Layer
//!
//! MySQL implementations of the core repository traits:
//! - **Database**: connection pool, migrations and health checks using SQLx
//! - **Repositories**: identity directory and refresh token revocation store

use authsvc_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
pub mod database;

pub use database::{DatabasePool, MySqlTokenRepository, MySqlUserRepository, PoolStatistics};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Database(e) => DomainError::store_unavailable(e.to_string()),
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
