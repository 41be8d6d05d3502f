//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::TokenError;

use super::user::{UserId, UserRole};

/// Access token lifetime (1 hour)
pub const ACCESS_TOKEN_EXPIRY_SECS: i64 = 60 * 60;

/// Refresh token lifetime (1 year)
pub const REFRESH_TOKEN_EXPIRY_SECS: i64 = 365 * 24 * 60 * 60;

/// JWT issuer
pub const JWT_ISSUER: &str = "auth-service";

/// Surrogate identifier of a refresh token record
pub type RecordId = i64;

/// Identity carried by both token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPayload {
    pub user_id: UserId,
    pub role: UserRole,
}

impl TokenPayload {
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (decimal user id)
    pub sub: String,

    /// Role at the time of issue
    pub role: UserRole,

    /// Issuer
    pub iss: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Refresh token record id; present on refresh tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// Creates claims for an access token
    pub fn new_access_token(payload: &TokenPayload, issuer: &str, lifetime_secs: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: payload.user_id.to_string(),
            role: payload.role,
            iss: issuer.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(lifetime_secs)).timestamp(),
            jti: None,
        }
    }

    /// Creates claims for a refresh token bound to `record_id`
    pub fn new_refresh_token(
        payload: &TokenPayload,
        record_id: RecordId,
        issuer: &str,
        lifetime_secs: i64,
    ) -> Self {
        Self {
            jti: Some(record_id.to_string()),
            ..Self::new_access_token(payload, issuer, lifetime_secs)
        }
    }

    /// Parses the subject as a user id
    pub fn user_id(&self) -> Result<UserId, TokenError> {
        self.sub.parse().map_err(|_| TokenError::InvalidToken)
    }

    /// Parses the token-identifier claim as a record id
    pub fn record_id(&self) -> Result<RecordId, TokenError> {
        self.jti
            .as_deref()
            .ok_or_else(|| TokenError::MissingClaim {
                claim: "jti".to_string(),
            })?
            .parse()
            .map_err(|_| TokenError::InvalidToken)
    }

    pub fn payload(&self) -> Result<TokenPayload, TokenError> {
        Ok(TokenPayload::new(self.user_id()?, self.role))
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Persisted revocation record backing one refresh token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    pub id: RecordId,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// A refresh token that passed signature, expiry and revocation checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSession {
    pub record_id: RecordId,
    pub user_id: UserId,
    pub role: UserRole,
}

impl RefreshSession {
    pub fn payload(&self) -> TokenPayload {
        TokenPayload::new(self.user_id, self.role)
    }
}

/// Token pair returned to the transport layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// RS256 access token
    pub access_token: String,

    /// HS256 refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_claims_have_no_jti() {
        let payload = TokenPayload::new(42, UserRole::Admin);
        let claims = Claims::new_access_token(&payload, JWT_ISSUER, ACCESS_TOKEN_EXPIRY_SECS);

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, UserRole::Admin);
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.jti, None);
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_EXPIRY_SECS);
        assert!(!claims.is_expired());

        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("jti").is_none());
    }

    #[test]
    fn test_refresh_claims_carry_record_id() {
        let payload = TokenPayload::new(42, UserRole::Customer);
        let claims =
            Claims::new_refresh_token(&payload, 913, JWT_ISSUER, REFRESH_TOKEN_EXPIRY_SECS);

        assert_eq!(claims.jti.as_deref(), Some("913"));
        assert_eq!(claims.record_id().unwrap(), 913);
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.exp - claims.iat, REFRESH_TOKEN_EXPIRY_SECS);
    }

    #[test]
    fn test_record_id_requires_jti() {
        let payload = TokenPayload::new(1, UserRole::Customer);
        let claims = Claims::new_access_token(&payload, JWT_ISSUER, 60);
        assert!(matches!(
            claims.record_id(),
            Err(TokenError::MissingClaim { ref claim }) if claim == "jti"
        ));
    }

    #[test]
    fn test_non_numeric_subject_is_invalid() {
        let payload = TokenPayload::new(1, UserRole::Customer);
        let mut claims = Claims::new_refresh_token(&payload, 5, JWT_ISSUER, 60);
        claims.sub = "not-a-number".to_string();
        claims.jti = Some("abc".to_string());

        assert_eq!(claims.user_id(), Err(TokenError::InvalidToken));
        assert_eq!(claims.record_id(), Err(TokenError::InvalidToken));
    }

    #[test]
    fn test_record_expiry() {
        let now = Utc::now();
        let mut record = RefreshTokenRecord {
            id: 1,
            user_id: 1,
            expires_at: now + Duration::days(1),
            created_at: now,
            updated_at: now,
        };
        assert!(!record.is_expired());

        record.expires_at = now - Duration::seconds(1);
        assert!(record.is_expired());
    }
}
