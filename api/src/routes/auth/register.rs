use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::dto::auth::RegisterRequest;
use crate::dto::field_errors;
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use authsvc_core::repositories::{TokenRepository, UserRepository};
use authsvc_core::services::credential::PasswordHasher;

use super::{token_response, AppState};

/// Handler for POST /auth/register
///
/// # Request Body
///
/// ```json
/// {
///     "firstName": "Ada",
///     "lastName": "Lovelace",
///     "email": "ada@example.com",
///     "password": "at-least-8-chars"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// `{"id": 1}` with `accessToken` and `refreshToken` cookies.
///
/// ## Errors
/// - 400 Bad Request: Field validation failed or email already registered
/// - 503 Service Unavailable: Store unavailable
pub async fn register<U, T, H>(
    state: web::Data<AppState<U, T, H>>,
    request: web::Json<RegisterRequest>,
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

    match state.auth_service.register(request.into()).await {
        Ok(auth) => token_response(HttpResponse::Created(), &state.cookies, &auth),
        Err(error) => handle_domain_error(&error),
    }
}
