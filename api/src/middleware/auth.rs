//! Token authentication middleware for protecting API endpoints.
//!
//! - [`JwtAuth`] verifies the access token from the `Authorization: Bearer`
//!   header or the `accessToken` cookie and injects [`AuthContext`].
//! - [`RefreshTokenAuth`] verifies the `refreshToken` cookie, runs the
//!   revocation check and injects [`RefreshContext`].
//!
//! Rejections are rendered as the standard JSON error body.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use authsvc_core::{
    domain::entities::{
        token::RefreshSession,
        user::{UserId, UserRole},
    },
    errors::{DomainError, TokenError},
    services::{auth::RefreshTokenAuthenticator, token::TokenSigner},
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use crate::cookies::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::handlers::error::{handle_domain_error, ApiError};

/// User authentication context injected into requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: UserId,
    pub role: UserRole,
}

/// Refresh session injected into requests after the revocation check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshContext(pub RefreshSession);

/// Access token middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Access token middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match authenticate_access(&req) {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(e) => Ok(reject(req, &e)),
            }
        })
    }
}

fn authenticate_access(req: &ServiceRequest) -> Result<AuthContext, DomainError> {
    let signer = req
        .app_data::<web::Data<TokenSigner>>()
        .ok_or_else(|| DomainError::key_unavailable("Token signer not configured"))?;

    let token = extract_bearer_token(req)
        .or_else(|| req.cookie(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_string()))
        .ok_or(DomainError::Token(TokenError::InvalidToken))?;

    let claims = signer.verify_access_token(&token)?;
    Ok(AuthContext {
        user_id: claims.user_id()?,
        role: claims.role,
    })
}

/// Refresh token middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct RefreshTokenAuth;

impl<S, B> Transform<S, ServiceRequest> for RefreshTokenAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RefreshTokenAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RefreshTokenAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Refresh token middleware service
pub struct RefreshTokenAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RefreshTokenAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let authenticator = req
            .app_data::<web::Data<dyn RefreshTokenAuthenticator>>()
            .cloned();
        let token = req
            .cookie(REFRESH_TOKEN_COOKIE)
            .map(|c| c.value().to_string());

        Box::pin(async move {
            let authenticator = match authenticator {
                Some(authenticator) => authenticator,
                None => {
                    let e = DomainError::Internal {
                        message: "Refresh token authenticator not configured".to_string(),
                    };
                    return Ok(reject(req, &e));
                }
            };

            let token = match token {
                Some(token) if !token.is_empty() => token,
                _ => return Ok(reject(req, &TokenError::InvalidToken.into())),
            };

            match authenticator.authenticate_refresh_token(&token).await {
                Ok(session) => {
                    req.extensions_mut().insert(RefreshContext(session));
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(e) => Ok(reject(req, &e)),
            }
        })
    }
}

fn reject<B>(req: ServiceRequest, error: &DomainError) -> ServiceResponse<EitherBody<B>> {
    let (req, _payload) = req.into_parts();
    ServiceResponse::new(req, handle_domain_error(error)).map_into_right_body()
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .copied()
            .ok_or_else(|| ApiError(TokenError::InvalidToken.into()));

        ready(result)
    }
}

impl FromRequest for RefreshContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<RefreshContext>()
            .copied()
            .ok_or_else(|| ApiError(TokenError::InvalidToken.into()));

        ready(result)
    }
}
