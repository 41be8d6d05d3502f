//! Application wiring
//!
//! [`configure`] registers the shared state, the JSON extractor settings and
//! every route. It is used by the binary and by the integration tests.

use std::sync::Arc;

use actix_web::{error::InternalError, http::StatusCode, web, HttpResponse};

use authsvc_core::errors::DomainError;
use authsvc_core::repositories::{TokenRepository, UserRepository};
use authsvc_core::services::auth::RefreshTokenAuthenticator;
use authsvc_core::services::credential::PasswordHasher;
use authsvc_infra::DatabasePool;
use authsvc_shared::{error_codes, ErrorResponse};

use crate::dto::ErrorResponseExt;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::{JwtAuth, RefreshTokenAuth};
use crate::routes::auth::{
    login::login, logout::logout, refresh::refresh, register::register, self_::current_user,
    AppState,
};

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "auth-service";

/// Register state and routes on an actix `App`
pub fn configure<U, T, H>(state: AppState<U, T, H>, cfg: &mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    H: PasswordHasher,
{
    let signer = Arc::clone(state.auth_service.signer());
    let authenticator: Arc<dyn RefreshTokenAuthenticator> = state.auth_service.clone();
    let json_limit = state.json_limit;

    cfg.app_data(web::Data::new(state))
        .app_data(web::Data::from(signer))
        .app_data(web::Data::from(authenticator))
        .app_data(json_config(json_limit))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(register::<U, T, H>))
                .route("/login", web::post().to(login::<U, T, H>))
                .service(
                    web::resource("/refresh")
                        .wrap(RefreshTokenAuth)
                        .route(web::post().to(refresh::<U, T, H>)),
                )
                .service(
                    web::resource("/logout")
                        .wrap(RefreshTokenAuth)
                        .wrap(JwtAuth)
                        .route(web::post().to(logout::<U, T, H>)),
                )
                .service(
                    web::resource("/self")
                        .wrap(JwtAuth)
                        .route(web::get().to(current_user::<U, T, H>)),
                ),
        )
        .default_service(web::route().to(not_found));
}

/// JSON extractor settings; malformed bodies get the standard error body
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let response = handle_domain_error(&DomainError::Validation {
                message: err.to_string(),
            });
            InternalError::from_response(err, response).into()
        })
}

/// Health check endpoint handler
///
/// Pings the database when a pool is registered as app data. A failed ping
/// turns the response into 503.
async fn health_check(pool: Option<web::Data<DatabasePool>>) -> HttpResponse {
    let (healthy, database) = match pool {
        Some(pool) => {
            let up = matches!(pool.health_check().await, Ok(true));
            let stats = pool.get_statistics();
            (
                up,
                serde_json::json!({
                    "status": if up { "up" } else { "down" },
                    "connections": stats.connections,
                    "idleConnections": stats.idle_connections,
                    "maxConnections": stats.max_connections,
                }),
            )
        }
        None => (true, serde_json::json!({ "status": "unconfigured" })),
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    HttpResponse::build(status).json(serde_json::json!({
        "status": if healthy { "healthy" } else { "unhealthy" },
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "database": database,
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    )
    .to_response(StatusCode::NOT_FOUND)
}
