//! MySQL implementation of the TokenRepository trait.
//!
//! One row per live refresh token. Revocation deletes the row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use authsvc_core::domain::entities::token::{RecordId, RefreshTokenRecord};
use authsvc_core::domain::entities::user::UserId;
use authsvc_core::errors::DomainError;
use authsvc_core::repositories::TokenRepository;

use super::{decode_error, store_error};

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshTokenRecord
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<RefreshTokenRecord, DomainError> {
        Ok(RefreshTokenRecord {
            id: row.try_get("id").map_err(|e| decode_error("id", e))?,
            user_id: row.try_get("user_id").map_err(|e| decode_error("user_id", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| decode_error("expires_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| decode_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| decode_error("updated_at", e))?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn create(
        &self,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshTokenRecord, DomainError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, expires_at, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(expires_at)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to save refresh token record", e))?;

        Ok(RefreshTokenRecord {
            id: result.last_insert_id() as RecordId,
            user_id,
            expires_at,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_active(
        &self,
        record_id: RecordId,
        user_id: UserId,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let result = sqlx::query(
            r#"
            SELECT id, user_id, expires_at, created_at, updated_at
            FROM refresh_tokens
            WHERE id = ? AND user_id = ? AND expires_at > ?
            LIMIT 1
            "#,
        )
        .bind(record_id)
        .bind(user_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to find refresh token record", e))?;

        result.as_ref().map(Self::row_to_record).transpose()
    }

    async fn delete(&self, record_id: RecordId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE id = ?")
            .bind(record_id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to delete refresh token record", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to delete expired refresh token records", e))?;

        Ok(result.rows_affected())
    }

    async fn count_for_user(&self, user_id: UserId) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM refresh_tokens WHERE user_id = ? AND expires_at > ?",
        )
        .bind(user_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("Failed to count refresh token records", e))?;

        Ok(count.max(0) as u64)
    }
}
