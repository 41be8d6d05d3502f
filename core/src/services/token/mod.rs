//! Token signing and revocation-record maintenance
//!
//! - RS256 access tokens signed with the RSA key pair
//! - HS256 refresh tokens signed with the pre-shared secret
//! - Background cleanup of expired refresh token records

mod cleanup;
mod config;
mod key_manager;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::RefreshTokenCleanup;
pub use config::TokenServiceConfig;
pub use key_manager::Rs256KeyManager;
pub use service::TokenSigner;

/// Test key pair bundled with the crate
#[cfg(any(test, feature = "mock"))]
pub mod test_keys {
    pub const PRIVATE_KEY_PEM: &str = include_str!("../../../keys/test_private_key.pem");
    pub const PUBLIC_KEY_PEM: &str = include_str!("../../../keys/test_public_key.pem");
    pub const OTHER_PRIVATE_KEY_PEM: &str =
        include_str!("../../../keys/test_other_private_key.pem");
}
