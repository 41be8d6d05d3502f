//! Configuration for the authentication service

use std::time::Duration;

use authsvc_shared::DatabaseConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Upper bound on every repository call made by the engine
    pub store_timeout: Duration,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_millis(5000),
        }
    }
}

impl AuthServiceConfig {
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn store_timeout_ms(&self) -> u64 {
        self.store_timeout.as_millis() as u64
    }
}

impl From<&DatabaseConfig> for AuthServiceConfig {
    fn from(database: &DatabaseConfig) -> Self {
        Self {
            store_timeout: Duration::from_millis(database.query_timeout_ms),
        }
    }
}
