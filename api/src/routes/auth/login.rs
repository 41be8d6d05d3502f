use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::LoginRequest;
use crate::dto::field_errors;
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use authsvc_core::repositories::{TokenRepository, UserRepository};
use authsvc_core::services::credential::PasswordHasher;

use super::{token_response, AppState};

/// Handler for POST /auth/login
///
/// Returns `{"id": ...}` and sets both token cookies. Unknown email and
/// wrong password produce the same 400 response.
pub async fn login<U, T, H>(
    state: web::Data<AppState<U, T, H>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    H: PasswordHasher,
{
    let request = request.into_inner().normalized();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(field_errors(&errors));
    }

    match state.auth_service.login(request.into()).await {
        Ok(auth) => token_response(HttpResponse::Ok(), &state.cookies, &auth),
        Err(error) => handle_domain_error(&error),
    }
}
