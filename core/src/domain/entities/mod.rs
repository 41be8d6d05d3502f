//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{
    Claims, RecordId, RefreshSession, RefreshTokenRecord, TokenPair, TokenPayload,
    ACCESS_TOKEN_EXPIRY_SECS, JWT_ISSUER, REFRESH_TOKEN_EXPIRY_SECS,
};
pub use user::{NewUser, User, UserId, UserProfile, UserRole};
