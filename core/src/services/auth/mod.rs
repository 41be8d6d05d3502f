//! Authentication service module
//!
//! Orchestrates the credential verifier, the token signer and the revocation
//! store to implement register, login, refresh, logout and self lookup.

mod config;
mod email_utils;
mod service;


use async_trait::async_trait;

use crate::domain::entities::token::RefreshSession;
use crate::errors::DomainError;

pub use config::AuthServiceConfig;
pub use email_utils::mask_email;
pub use service::AuthService;

/// Refresh-token check used by the transport layer
///
/// Object safe so middleware can hold it as `Arc<dyn RefreshTokenAuthenticator>`
/// without knowing the repository types.
#[async_trait]
pub trait RefreshTokenAuthenticator: Send + Sync {
    /// Verify signature and expiry, then confirm the backing record exists
    async fn authenticate_refresh_token(&self, token: &str) -> Result<RefreshSession, DomainError>;
}
