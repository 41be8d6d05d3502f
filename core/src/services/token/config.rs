//! Configuration for the token signer

use chrono::Duration;

use authsvc_shared::JwtConfig;

use crate::domain::entities::token::{
    ACCESS_TOKEN_EXPIRY_SECS, JWT_ISSUER, REFRESH_TOKEN_EXPIRY_SECS,
};

/// Configuration for the token signer
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// `iss` claim written and required on both token kinds
    pub issuer: String,
    /// Access token lifetime in seconds
    pub access_token_expiry_secs: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry_secs: i64,
    /// HS256 secret for refresh tokens
    pub refresh_token_secret: String,
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("issuer", &self.issuer)
            .field("access_token_expiry_secs", &self.access_token_expiry_secs)
            .field("refresh_token_expiry_secs", &self.refresh_token_expiry_secs)
            .field("refresh_token_secret", &"<redacted>")
            .finish()
    }
}

impl TokenServiceConfig {
    pub fn new(refresh_token_secret: impl Into<String>) -> Self {
        Self {
            issuer: JWT_ISSUER.to_string(),
            access_token_expiry_secs: ACCESS_TOKEN_EXPIRY_SECS,
            refresh_token_expiry_secs: REFRESH_TOKEN_EXPIRY_SECS,
            refresh_token_secret: refresh_token_secret.into(),
        }
    }

    /// Refresh lifetime, used for the backing record's expiry
    pub fn refresh_lifetime(&self) -> Duration {
        Duration::seconds(self.refresh_token_expiry_secs)
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            issuer: jwt.issuer.clone(),
            access_token_expiry_secs: jwt.access_token_expiry,
            refresh_token_expiry_secs: jwt.refresh_token_expiry,
            refresh_token_secret: jwt.refresh_token_secret.clone(),
        }
    }
}
