//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::entities::token::{RecordId, RefreshTokenRecord};
use crate::domain::entities::user::UserId;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// In-memory revocation store
///
/// Supports outage and latency injection so callers can exercise the
/// fail-closed and timeout paths.
pub struct MockTokenRepository {
    records: Arc<RwLock<HashMap<RecordId, RefreshTokenRecord>>>,
    next_id: AtomicI64,
    unavailable: AtomicBool,
    latency_ms: AtomicU64,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
            unavailable: AtomicBool::new(false),
            latency_ms: AtomicU64::new(0),
        }
    }

    /// Make every call fail with a store error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Delay every call by `latency`
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    /// Insert a record directly, bypassing id generation
    pub async fn insert(&self, record: RefreshTokenRecord) {
        self.records.write().await.insert(record.id, record);
    }

    /// Whether a record with `record_id` exists, expired or not
    pub async fn contains(&self, record_id: RecordId) -> bool {
        self.records.read().await.contains_key(&record_id)
    }

    /// Total number of stored records, expired ones included
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn enter(&self) -> Result<(), DomainError> {
        let latency = self.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::store_unavailable("mock token store offline"));
        }
        Ok(())
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn create(
        &self,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshTokenRecord, DomainError> {
        self.enter().await?;

        let now = Utc::now();
        let record = RefreshTokenRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id,
            expires_at,
            created_at: now,
            updated_at: now,
        };

        self.records.write().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_active(
        &self,
        record_id: RecordId,
        user_id: UserId,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        self.enter().await?;

        let records = self.records.read().await;
        Ok(records
            .get(&record_id)
            .filter(|r| r.user_id == user_id && !r.is_expired())
            .cloned())
    }

    async fn delete(&self, record_id: RecordId) -> Result<bool, DomainError> {
        self.enter().await?;
        Ok(self.records.write().await.remove(&record_id).is_some())
    }

    async fn delete_expired(&self) -> Result<u64, DomainError> {
        self.enter().await?;

        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, r| !r.is_expired());
        Ok((before - records.len()) as u64)
    }

    async fn count_for_user(&self, user_id: UserId) -> Result<u64, DomainError> {
        self.enter().await?;

        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| r.user_id == user_id && !r.is_expired())
            .count() as u64)
    }
}
