//! MySQL repository implementations

mod token_repository_impl;
mod user_repository_impl;

pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;

/// Map a query failure to a store outage
pub(crate) fn store_error(context: &str, e: sqlx::Error) -> authsvc_core::errors::DomainError {
    tracing::error!(error = %e, "{}", context);
    authsvc_core::errors::DomainError::store_unavailable(format!("{}: {}", context, e))
}

/// Map a row decoding failure
pub(crate) fn decode_error(column: &str, e: sqlx::Error) -> authsvc_core::errors::DomainError {
    authsvc_core::errors::DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}
