//! Authentication and token configuration

use serde::{Deserialize, Serialize};

/// Placeholder refresh secret used by development defaults
pub const DEVELOPMENT_REFRESH_SECRET: &str = "development-refresh-secret-change-in-production";

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Issuer claim placed into both access and refresh tokens
    pub issuer: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,

    /// Path to the PEM-encoded RSA private key used for access tokens
    pub private_key_path: String,

    /// Path to the PEM-encoded RSA public key used to verify access tokens
    pub public_key_path: String,

    /// Pre-shared secret for HS256 refresh tokens
    pub refresh_token_secret: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            issuer: String::from("auth-service"),
            access_token_expiry: 3600,          // 1 hour
            refresh_token_expiry: 365 * 86400,  // 1 year
            private_key_path: String::from("certs/private.pem"),
            public_key_path: String::from("certs/public.pem"),
            refresh_token_secret: String::from(DEVELOPMENT_REFRESH_SECRET),
        }
    }
}

impl JwtConfig {
    /// Create a JWT configuration with the given refresh secret
    pub fn new(refresh_token_secret: impl Into<String>) -> Self {
        Self {
            refresh_token_secret: refresh_token_secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Set both key file paths
    pub fn with_key_paths(
        mut self,
        private_key_path: impl Into<String>,
        public_key_path: impl Into<String>,
    ) -> Self {
        self.private_key_path = private_key_path.into();
        self.public_key_path = public_key_path.into();
        self
    }

    /// Check if the placeholder refresh secret is still in use
    pub fn is_using_default_secret(&self) -> bool {
        self.refresh_token_secret == DEVELOPMENT_REFRESH_SECRET
    }
}

/// Cookie attributes for token delivery
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie domain
    pub domain: String,

    /// Cookie secure flag (HTTPS only)
    #[serde(default)]
    pub secure: bool,

    /// SameSite attribute: "Strict", "Lax" or "None"
    #[serde(default = "default_same_site")]
    pub same_site: String,

    /// HttpOnly flag
    #[serde(default = "default_http_only")]
    pub http_only: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            domain: String::from("localhost"),
            secure: false,
            same_site: default_same_site(),
            http_only: default_http_only(),
        }
    }
}

/// Password hashing parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasswordConfig {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 10 }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    #[serde(default)]
    pub jwt: JwtConfig,

    /// Cookie configuration
    #[serde(default)]
    pub cookie: CookieConfig,

    /// Password hashing configuration
    #[serde(default)]
    pub password: PasswordConfig,

    /// Interval between expired refresh token sweeps, in seconds (0 disables)
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

fn default_same_site() -> String {
    String::from("Strict")
}

fn default_http_only() -> bool {
    true
}

fn default_cleanup_interval() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.issuer, "auth-service");
        assert_eq!(config.access_token_expiry, 3600);
        assert_eq!(config.refresh_token_expiry, 31_536_000);
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14)
            .with_key_paths("keys/a.pem", "keys/b.pem");

        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 1_209_600);
        assert_eq!(config.private_key_path, "keys/a.pem");
        assert_eq!(config.public_key_path, "keys/b.pem");
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_cookie_config_default() {
        let config = CookieConfig::default();
        assert_eq!(config.domain, "localhost");
        assert_eq!(config.same_site, "Strict");
        assert!(config.http_only);
        assert!(!config.secure);
    }
}
