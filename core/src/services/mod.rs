//! Business services containing domain logic and use cases.

pub mod auth;
pub mod credential;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, RefreshTokenAuthenticator};
pub use credential::{BcryptPasswordHasher, CredentialVerifier, PasswordHasher};
pub use token::{RefreshTokenCleanup, Rs256KeyManager, TokenServiceConfig, TokenSigner};
