//! Error types for credential, token and store failures
//!
//! Messages here are the ones returned to clients. `InvalidCredentials` deliberately
//! carries one message for both the unknown-email and wrong-password cases.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email is already registered")]
    DuplicateCredential,

    #[error("Email or password does not match")]
    InvalidCredentials,

    #[error("User referenced by the token no longer exists")]
    StaleSubject,
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },

    #[error("Signing key unavailable: {message}")]
    KeyUnavailable { message: String },
}

/// Persistence-layer errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store unavailable: {message}")]
    Unavailable { message: String },

    #[error("Store call timed out after {millis} ms")]
    Timeout { millis: u64 },
}
