//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, StoreError, TokenError};

use authsvc_shared::error_codes;
use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Shorthand for a store outage
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        DomainError::Store(StoreError::Unavailable {
            message: message.into(),
        })
    }

    /// Shorthand for missing or unusable signing material
    pub fn key_unavailable(message: impl Into<String>) -> Self {
        DomainError::Token(TokenError::KeyUnavailable {
            message: message.into(),
        })
    }

    /// Stable machine-readable code for the error
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation { .. } => error_codes::VALIDATION_ERROR,
            DomainError::Internal { .. } => error_codes::INTERNAL_ERROR,
            DomainError::Auth(AuthError::DuplicateCredential) => error_codes::DUPLICATE_CREDENTIAL,
            DomainError::Auth(AuthError::InvalidCredentials) => error_codes::INVALID_CREDENTIALS,
            DomainError::Auth(AuthError::StaleSubject) => error_codes::STALE_SUBJECT,
            DomainError::Token(TokenError::TokenRevoked) => error_codes::TOKEN_REVOKED,
            DomainError::Token(TokenError::TokenExpired) => error_codes::TOKEN_EXPIRED,
            DomainError::Token(TokenError::InvalidToken) => error_codes::TOKEN_INVALID,
            DomainError::Token(TokenError::MissingClaim { .. }) => error_codes::MISSING_CLAIM,
            DomainError::Token(TokenError::KeyUnavailable { .. }) => error_codes::KEY_UNAVAILABLE,
            DomainError::Store(_) => error_codes::STORE_UNAVAILABLE,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message_is_generic() {
        let err = DomainError::from(AuthError::InvalidCredentials);
        let message = err.to_string();
        assert!(!message.to_lowercase().contains("not found"));
        assert!(!message.to_lowercase().contains("wrong password"));
        assert_eq!(err.error_code(), "INVALID_CREDENTIALS");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DomainError::from(TokenError::TokenRevoked).error_code(),
            "TOKEN_REVOKED"
        );
        assert_eq!(
            DomainError::store_unavailable("down").error_code(),
            "STORE_UNAVAILABLE"
        );
        assert_eq!(
            DomainError::Store(StoreError::Timeout { millis: 10 }).error_code(),
            "STORE_UNAVAILABLE"
        );
        assert_eq!(
            DomainError::key_unavailable("missing").error_code(),
            "KEY_UNAVAILABLE"
        );
    }
}
