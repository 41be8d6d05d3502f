//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use authsvc_core::domain::entities::user::{NewUser, User, UserId, UserRole};
use authsvc_core::errors::{AuthError, DomainError};
use authsvc_core::repositories::UserRepository;

use super::{decode_error, store_error};

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_digest, role, created_at, updated_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let role: String = row.try_get("role").map_err(|e| decode_error("role", e))?;

        Ok(User {
            id: row.try_get("id").map_err(|e| decode_error("id", e))?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| decode_error("first_name", e))?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| decode_error("last_name", e))?,
            email: row.try_get("email").map_err(|e| decode_error("email", e))?,
            password_digest: row
                .try_get("password_digest")
                .map_err(|e| decode_error("password_digest", e))?,
            role: parse_role(&role)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| decode_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| decode_error("updated_at", e))?,
        })
    }
}

fn parse_role(role: &str) -> Result<UserRole, DomainError> {
    role.parse()
        .map_err(|message| DomainError::Internal { message })
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE email = ? LIMIT 1", USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find user by email", e))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ? LIMIT 1", USER_COLUMNS);

        let result = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("Failed to find user by id", e))?;

        result.as_ref().map(Self::row_to_user).transpose()
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let exists: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| store_error("Failed to check email existence", e))?;

        Ok(exists == 1)
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO users (
                first_name, last_name, email, password_digest, role, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_digest)
        .bind(user.role.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Auth(AuthError::DuplicateCredential)
            } else {
                store_error("Failed to create user", e)
            }
        })?;

        let id = result.last_insert_id() as UserId;
        tracing::debug!(user_id = id, "User row inserted");

        Ok(User {
            id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_digest: user.password_digest,
            role: user.role,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("admin").unwrap(), UserRole::Admin);
        assert_eq!(parse_role("customer").unwrap(), UserRole::Customer);
        assert!(matches!(
            parse_role("superuser"),
            Err(DomainError::Internal { .. })
        ));
    }

    #[test]
    fn test_io_error_is_not_unique_violation() {
        let err = sqlx::Error::PoolTimedOut;
        assert!(!is_unique_violation(&err));
    }
}
