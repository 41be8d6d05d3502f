//! Revocation store contract for refresh token records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::{RecordId, RefreshTokenRecord};
use crate::domain::entities::user::UserId;
use crate::errors::DomainError;

/// Repository trait for refresh token records
///
/// A record's existence is what makes its refresh token valid. Revocation is
/// deletion; there is no status flag.
///
/// # Consistency
/// - `create` and `delete` must each be atomic
/// - no cross-record transactions are required
/// - outages surface as `DomainError::Store`
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Insert a new record for `user_id`
    ///
    /// # Returns
    /// * `Ok(RefreshTokenRecord)` - The stored record with its generated id
    /// * `Err(DomainError)` - Insert failed; nothing was persisted
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::{Duration, Utc};
    /// # use authsvc_core::repositories::TokenRepository;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let record = repo.create(7, Utc::now() + Duration::days(365)).await?;
    /// println!("Refresh token bound to record {}", record.id);
    /// # Ok(())
    /// # }
    /// ```
    async fn create(
        &self,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshTokenRecord, DomainError>;

    /// Look up an unexpired record by id and owner
    ///
    /// Both keys must match. A record id that belongs to another user is
    /// reported as `Ok(None)`.
    ///
    /// # Returns
    /// * `Ok(Some(record))` - The refresh token is still valid
    /// * `Ok(None)` - Revoked, expired or never existed
    /// * `Err(DomainError)` - Store error
    async fn find_active(
        &self,
        record_id: RecordId,
        user_id: UserId,
    ) -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Delete a record
    ///
    /// Idempotent: deleting an unknown id is not an error.
    ///
    /// # Returns
    /// * `Ok(true)` - A row was removed
    /// * `Ok(false)` - No such record
    async fn delete(&self, record_id: RecordId) -> Result<bool, DomainError>;

    /// Delete every record whose expiry has passed
    ///
    /// # Returns
    /// * `Ok(count)` - Number of records removed
    async fn delete_expired(&self) -> Result<u64, DomainError>;

    /// Count unexpired records owned by `user_id`
    async fn count_for_user(&self, user_id: UserId) -> Result<u64, DomainError>;
}
