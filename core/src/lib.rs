//! # Auth Service Core
//!
//! Domain layer of the auth service: entities, the error taxonomy, repository
//! interfaces, and the token lifecycle engine built on top of them.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Claims, NewUser, RecordId, RefreshSession, RefreshTokenRecord, TokenPair, TokenPayload, User,
    UserId, UserProfile, UserRole,
};
pub use domain::value_objects::{AuthResponse, LoginCredentials, Registration};
pub use errors::{AuthError, DomainError, DomainResult, StoreError, TokenError};
pub use repositories::{TokenRepository, UserRepository};
pub use services::{
    AuthService, AuthServiceConfig, BcryptPasswordHasher, PasswordHasher,
    RefreshTokenAuthenticator, RefreshTokenCleanup, Rs256KeyManager, TokenServiceConfig,
    TokenSigner,
};
