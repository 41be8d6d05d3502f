use actix_web::{web, HttpResponse};

use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::RefreshContext;

use authsvc_core::repositories::{TokenRepository, UserRepository};
use authsvc_core::services::credential::PasswordHasher;

use super::{token_response, AppState};

/// Handler for POST /auth/refresh
///
/// Guarded by `RefreshTokenAuth`, which has already verified the
/// `refreshToken` cookie and its backing record. The presented token is
/// spent; new cookies replace both tokens.
///
/// ## Errors
/// - 401 Unauthorized: Missing, invalid, expired or revoked refresh token
/// - 400 Bad Request: The user no longer exists
pub async fn refresh<U, T, H>(
    state: web::Data<AppState<U, T, H>>,
    session: RefreshContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    H: PasswordHasher,
{
    match state.auth_service.refresh(session.0).await {
        Ok(auth) => token_response(HttpResponse::Ok(), &state.cookies, &auth),
        Err(error) => handle_domain_error(&error),
    }
}
