//! Periodic removal of expired refresh token records

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::errors::DomainError;
use crate::repositories::TokenRepository;

/// Background task that deletes expired revocation records
///
/// Expired records are already treated as not-found by lookups; this only
/// reclaims storage, including records orphaned by a failed signing step.
pub struct RefreshTokenCleanup<R: TokenRepository + 'static> {
    repository: Arc<R>,
}

impl<R: TokenRepository + 'static> RefreshTokenCleanup<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Run a single cleanup cycle
    ///
    /// # Returns
    /// * `Ok(count)` - Number of records deleted
    /// * `Err(DomainError)` - Store error
    pub async fn run_once(&self) -> Result<u64, DomainError> {
        let deleted = self.repository.delete_expired().await?;
        info!(deleted, "Expired refresh token records removed");
        Ok(deleted)
    }

    /// Start the cleanup loop as a background task
    ///
    /// The first cycle runs immediately. Failed cycles are logged and the
    /// loop keeps going.
    pub fn spawn(self, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                interval_secs = interval.as_secs(),
                "Refresh token cleanup started"
            );

            let mut timer = tokio::time::interval(interval);
            loop {
                timer.tick().await;
                if let Err(e) = self.run_once().await {
                    error!(error = %e, "Refresh token cleanup cycle failed");
                }
            }
        })
    }
}
