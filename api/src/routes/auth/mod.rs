//! Authentication route handlers
//!
//! - Registration and login with email and password
//! - Refresh token rotation
//! - Logout
//! - Current user lookup

pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod self_;

use std::sync::Arc;

use actix_web::HttpResponse;

use authsvc_core::domain::value_objects::AuthResponse;
use authsvc_core::repositories::{TokenRepository, UserRepository};
use authsvc_core::services::auth::AuthService;
use authsvc_core::services::credential::PasswordHasher;
use authsvc_shared::CookieConfig;

use crate::cookies::set_token_cookies;
use crate::dto::auth::IdResponse;

/// Default JSON body limit (256 KiB)
pub const DEFAULT_JSON_LIMIT: usize = 256 * 1024;

/// Shared state for the auth routes
pub struct AppState<U, T, H>
where
    U: UserRepository,
    T: TokenRepository,
    H: PasswordHasher,
{
    pub auth_service: Arc<AuthService<U, T, H>>,
    pub cookies: CookieConfig,
    /// Maximum accepted JSON body, in bytes
    pub json_limit: usize,
}

impl<U, T, H> AppState<U, T, H>
where
    U: UserRepository,
    T: TokenRepository,
    H: PasswordHasher,
{
    pub fn new(auth_service: Arc<AuthService<U, T, H>>, cookies: CookieConfig) -> Self {
        Self {
            auth_service,
            cookies,
            json_limit: DEFAULT_JSON_LIMIT,
        }
    }

    pub fn with_json_limit(mut self, limit: usize) -> Self {
        self.json_limit = limit;
        self
    }
}

impl<U, T, H> Clone for AppState<U, T, H>
where
    U: UserRepository,
    T: TokenRepository,
    H: PasswordHasher,
{
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            cookies: self.cookies.clone(),
            json_limit: self.json_limit,
        }
    }
}

/// `{id}` body with both token cookies
pub(crate) fn token_response(
    mut builder: actix_web::HttpResponseBuilder,
    cookies: &CookieConfig,
    auth: &AuthResponse,
) -> HttpResponse {
    set_token_cookies(&mut builder, cookies, &auth.tokens);
    builder.json(IdResponse { id: auth.user_id })
}
