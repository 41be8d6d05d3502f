//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;

use authsvc_api::AppState;
use authsvc_core::repositories::{MockTokenRepository, MockUserRepository};
use authsvc_core::services::auth::{AuthService, AuthServiceConfig};
use authsvc_core::services::credential::BcryptPasswordHasher;
use authsvc_core::services::token::test_keys::{PRIVATE_KEY_PEM, PUBLIC_KEY_PEM};
use authsvc_core::services::token::{Rs256KeyManager, TokenServiceConfig, TokenSigner};
use authsvc_shared::CookieConfig;

pub type TestState = AppState<MockUserRepository, MockTokenRepository, BcryptPasswordHasher>;

pub struct Harness {
    pub state: TestState,
    pub users: Arc<MockUserRepository>,
    pub tokens: Arc<MockTokenRepository>,
}

pub fn harness() -> Harness {
    let keys = Rs256KeyManager::from_pem_strings(PRIVATE_KEY_PEM, PUBLIC_KEY_PEM).unwrap();
    let signer = TokenSigner::new(keys, TokenServiceConfig::new("http-test-secret")).unwrap();
    let users = Arc::new(MockUserRepository::new());
    let tokens = Arc::new(MockTokenRepository::new());

    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        tokens.clone(),
        Arc::new(signer),
        Arc::new(BcryptPasswordHasher::new(4)),
        AuthServiceConfig::default(),
    ));

    Harness {
        state: AppState::new(auth_service, CookieConfig::default()),
        users,
        tokens,
    }
}

/// Tokens and id handed out by register or login
#[derive(Debug, Clone)]
pub struct Issued {
    pub id: i64,
    pub access_token: String,
    pub refresh_token: String,
}

pub fn cookie_value<B>(resp: &ServiceResponse<B>, name: &str) -> Option<String> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
}

pub fn response_cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

pub fn registration_body(email: &str) -> serde_json::Value {
    serde_json::json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": email,
        "password": "password1",
    })
}

/// Build the test service from a `Harness`
macro_rules! init_app {
    ($harness:expr) => {{
        let state = $harness.state.clone();
        actix_web::test::init_service(
            actix_web::App::new().configure(move |cfg| authsvc_api::configure(state, cfg)),
        )
        .await
    }};
}

/// Register `$email` and return the issued tokens
macro_rules! register_user {
    ($app:expr, $email:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/auth/register")
            .set_json($crate::common::registration_body($email))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);

        let access_token =
            $crate::common::cookie_value(&resp, authsvc_api::cookies::ACCESS_TOKEN_COOKIE)
                .expect("access cookie");
        let refresh_token =
            $crate::common::cookie_value(&resp, authsvc_api::cookies::REFRESH_TOKEN_COOKIE)
                .expect("refresh cookie");
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;

        $crate::common::Issued {
            id: body["id"].as_i64().expect("numeric id"),
            access_token,
            refresh_token,
        }
    }};
}
