//! Mapping of domain errors to HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use authsvc_core::errors::{AuthError, DomainError, TokenError};
use authsvc_shared::ErrorResponse;

use crate::dto::error::{ErrorResponseExt, FieldError};

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. }
        | DomainError::Auth(AuthError::DuplicateCredential)
        | DomainError::Auth(AuthError::InvalidCredentials)
        | DomainError::Auth(AuthError::StaleSubject) => StatusCode::BAD_REQUEST,
        DomainError::Token(TokenError::KeyUnavailable { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Client-facing message; server-side failures never echo internals
fn public_message(error: &DomainError) -> String {
    match error {
        DomainError::Token(TokenError::KeyUnavailable { .. }) | DomainError::Internal { .. } => {
            "An internal error occurred".to_string()
        }
        DomainError::Store(_) => "Service temporarily unavailable".to_string(),
        other => other.to_string(),
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let status = status_for(error);

    if status.is_server_error() {
        tracing::error!(error = %error, code = error.error_code(), "Request failed");
    } else {
        tracing::debug!(error = %error, code = error.error_code(), "Request rejected");
    }

    ErrorResponse::new(error.error_code(), public_message(error)).to_response(status)
}

/// 400 response listing each rejected field
pub fn handle_validation_errors(errors: Vec<FieldError>) -> HttpResponse {
    let error = DomainError::Validation {
        message: "Request validation failed".to_string(),
    };
    tracing::debug!(fields = errors.len(), "Request validation failed");

    ErrorResponse::new(error.error_code(), public_message(&error))
        .add_detail("errors", errors)
        .to_response(status_for(&error))
}

/// Domain error usable as an actix error (extractors, middleware)
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(&self.0)
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}
