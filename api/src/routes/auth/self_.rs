use actix_web::{web, HttpResponse};

use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

use authsvc_core::repositories::{TokenRepository, UserRepository};
use authsvc_core::services::credential::PasswordHasher;

use super::AppState;

/// Handler for GET /auth/self
///
/// Returns the caller's profile. The credential digest is never included.
pub async fn current_user<U, T, H>(
    state: web::Data<AppState<U, T, H>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    H: PasswordHasher,
{
    match state.auth_service.current_user(auth.user_id).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(error) => handle_domain_error(&error),
    }
}
