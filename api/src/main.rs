use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

use authsvc_api::{configure, telemetry, AppState};
use authsvc_core::services::auth::{AuthService, AuthServiceConfig};
use authsvc_core::services::credential::BcryptPasswordHasher;
use authsvc_core::services::token::{RefreshTokenCleanup, TokenSigner};
use authsvc_infra::database::{DatabasePool, MySqlTokenRepository, MySqlUserRepository};
use authsvc_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    telemetry::init(&config.logging).context("Failed to initialize logging")?;

    info!(
        environment = ?config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting auth service"
    );

    if config.auth.jwt.is_using_default_secret() {
        warn!("Using the development refresh token secret; set REFRESH_TOKEN_SECRET");
    }

    let signer = Arc::new(
        TokenSigner::from_config(&config.auth.jwt).context("Failed to load signing keys")?,
    );

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("Failed to connect to the database")?;
    if config.database.run_migrations {
        pool.run_migrations()
            .await
            .context("Failed to run database migrations")?;
    }

    let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
    let tokens = Arc::new(MySqlTokenRepository::new(pool.get_pool().clone()));
    let hasher = Arc::new(BcryptPasswordHasher::new(config.auth.password.bcrypt_cost));

    let auth_service = Arc::new(AuthService::new(
        users,
        Arc::clone(&tokens),
        signer,
        hasher,
        AuthServiceConfig::from(&config.database),
    ));

    let cleanup = RefreshTokenCleanup::new(tokens)
        .spawn(Duration::from_secs(config.auth.cleanup_interval_secs));

    let state = AppState::new(auth_service, config.auth.cookie.clone())
        .with_json_limit(config.server.max_payload_size);

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Binding HTTP server");

    let health_pool = web::Data::new(pool.clone());

    let mut server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(TracingLogger::default())
            .app_data(health_pool.clone())
            .configure(move |cfg| configure(state, cfg))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await;

    cleanup.abort();
    pool.close().await;
    info!("Auth service stopped");

    result.context("HTTP server failed")
}
