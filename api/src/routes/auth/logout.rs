use actix_web::{web, HttpResponse};

use crate::cookies::clear_token_cookies;
use crate::dto::auth::LogoutResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::{AuthContext, RefreshContext};

use authsvc_core::errors::TokenError;
use authsvc_core::repositories::{TokenRepository, UserRepository};
use authsvc_core::services::credential::PasswordHasher;

use super::AppState;

/// Handler for POST /auth/logout
///
/// Requires a valid access token and a live refresh token belonging to the
/// same user. Deletes the refresh token's record and clears both cookies.
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid tokens, or tokens of different users
pub async fn logout<U, T, H>(
    state: web::Data<AppState<U, T, H>>,
    auth: AuthContext,
    session: RefreshContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    H: PasswordHasher,
{
    if auth.user_id != session.0.user_id {
        tracing::warn!(
            access_user_id = auth.user_id,
            refresh_user_id = session.0.user_id,
            "Logout rejected: token owners differ"
        );
        return handle_domain_error(&TokenError::InvalidToken.into());
    }

    match state.auth_service.logout(session.0).await {
        Ok(()) => {
            let mut builder = HttpResponse::Ok();
            clear_token_cookies(&mut builder, &state.cookies);
            builder.json(LogoutResponse {})
        }
        Err(error) => handle_domain_error(&error),
    }
}
