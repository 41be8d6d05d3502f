//! Token lifecycle engine

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::domain::entities::token::{
    Claims, RecordId, RefreshSession, TokenPair, TokenPayload,
};
use crate::domain::entities::user::{NewUser, UserId, UserProfile, UserRole};
use crate::domain::value_objects::{AuthResponse, LoginCredentials, Registration};
use crate::errors::{AuthError, DomainError, DomainResult, StoreError, TokenError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::credential::{CredentialVerifier, PasswordHasher};
use crate::services::token::TokenSigner;

use super::config::AuthServiceConfig;
use super::email_utils::mask_email;
use super::RefreshTokenAuthenticator;

/// Authentication service coordinating credentials, signing and revocation
///
/// Holds no mutable state. Every repository call is bounded by
/// `AuthServiceConfig::store_timeout`.
pub struct AuthService<U, T, H>
where
    U: UserRepository,
    T: TokenRepository,
    H: PasswordHasher,
{
    /// Identity directory
    user_repository: Arc<U>,
    /// Revocation store
    token_repository: Arc<T>,
    signer: Arc<TokenSigner>,
    credentials: CredentialVerifier<H>,
    config: AuthServiceConfig,
}

impl<U, T, H> AuthService<U, T, H>
where
    U: UserRepository,
    T: TokenRepository,
    H: PasswordHasher,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Identity directory
    /// * `token_repository` - Revocation store for refresh token records
    /// * `signer` - Token signer holding the key material
    /// * `hasher` - Password hashing primitive
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        token_repository: Arc<T>,
        signer: Arc<TokenSigner>,
        hasher: Arc<H>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            token_repository,
            signer,
            credentials: CredentialVerifier::new(hasher),
            config,
        }
    }

    pub fn signer(&self) -> &Arc<TokenSigner> {
        &self.signer
    }

    /// Create an account and sign the user in
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - New user id and token pair
    /// * `Err(DomainError)` - `DuplicateCredential` if the email is taken
    pub async fn register(&self, registration: Registration) -> DomainResult<AuthResponse> {
        let Registration {
            first_name,
            last_name,
            email,
            password,
        } = registration;

        let exists = self
            .bounded(self.user_repository.exists_by_email(&email))
            .await?;
        if exists {
            warn!(email = %mask_email(&email), "Registration rejected: email already registered");
            return Err(AuthError::DuplicateCredential.into());
        }

        let password_digest = self.credentials.hash(&password).await?;

        let user = self
            .bounded(self.user_repository.create(NewUser {
                first_name,
                last_name,
                email,
                password_digest,
                role: UserRole::Customer,
            }))
            .await?;

        let payload = TokenPayload::new(user.id, user.role);
        let (tokens, record_id) = self.issue_token_pair(&payload).await?;

        info!(user_id = user.id, record_id, "User registered");
        Ok(AuthResponse::new(user.id, tokens))
    }

    /// Verify credentials and issue a token pair
    ///
    /// Unknown email and wrong password both yield `InvalidCredentials`.
    pub async fn login(&self, credentials: LoginCredentials) -> DomainResult<AuthResponse> {
        let user = self
            .bounded(self.user_repository.find_by_email(&credentials.email))
            .await?;

        let user = match user {
            Some(user) => user,
            None => {
                warn!(email = %mask_email(&credentials.email), "Login failed");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self
            .credentials
            .verify(&credentials.password, &user.password_digest)
            .await
        {
            warn!(email = %mask_email(&credentials.email), "Login failed");
            return Err(AuthError::InvalidCredentials.into());
        }

        let payload = TokenPayload::new(user.id, user.role);
        let (tokens, record_id) = self.issue_token_pair(&payload).await?;

        info!(user_id = user.id, record_id, "User logged in");
        Ok(AuthResponse::new(user.id, tokens))
    }

    /// Rotate a refresh token
    ///
    /// `session` must come from [`Self::check_revocation`]. The role is taken
    /// from the presented token, not re-read. The new record is created before
    /// the old one is deleted.
    pub async fn refresh(&self, session: RefreshSession) -> DomainResult<AuthResponse> {
        let payload = session.payload();
        let access_token = self.signer.issue_access_token(&payload)?;

        let user = self
            .bounded(self.user_repository.find_by_id(session.user_id))
            .await?;
        if user.is_none() {
            warn!(user_id = session.user_id, "Refresh rejected: user no longer exists");
            return Err(AuthError::StaleSubject.into());
        }

        let record = self
            .bounded(
                self.token_repository
                    .create(session.user_id, self.refresh_expiry()),
            )
            .await?;

        self.bounded(self.token_repository.delete(session.record_id))
            .await?;

        let refresh_token = self.signer.issue_refresh_token(&payload, record.id)?;

        info!(
            user_id = session.user_id,
            old_record_id = session.record_id,
            new_record_id = record.id,
            "Refresh token rotated"
        );

        Ok(AuthResponse::new(
            session.user_id,
            self.token_pair(access_token, refresh_token),
        ))
    }

    /// Revoke the refresh token named by `session`
    ///
    /// Deleting an already-deleted record succeeds.
    pub async fn logout(&self, session: RefreshSession) -> DomainResult<()> {
        let removed = self
            .bounded(self.token_repository.delete(session.record_id))
            .await?;

        info!(
            user_id = session.user_id,
            record_id = session.record_id,
            removed,
            "User logged out"
        );
        Ok(())
    }

    /// Resolve the user behind an access token
    pub async fn current_user(&self, user_id: UserId) -> DomainResult<UserProfile> {
        self.bounded(self.user_repository.find_by_id(user_id))
            .await?
            .map(|user| user.profile())
            .ok_or_else(|| AuthError::StaleSubject.into())
    }

    /// Confirm that validated refresh claims are backed by a live record
    ///
    /// Fails closed: a store error or timeout is reported as `TokenRevoked`.
    pub async fn check_revocation(&self, claims: &Claims) -> DomainResult<RefreshSession> {
        let record_id = claims.record_id()?;
        let user_id = claims.user_id()?;

        let lookup = tokio::time::timeout(
            self.config.store_timeout,
            self.token_repository.find_active(record_id, user_id),
        )
        .await;

        match lookup {
            Ok(Ok(Some(_))) => Ok(RefreshSession {
                record_id,
                user_id,
                role: claims.role,
            }),
            Ok(Ok(None)) => {
                warn!(user_id, record_id, "Refresh token revoked or unknown");
                Err(TokenError::TokenRevoked.into())
            }
            Ok(Err(e)) => {
                error!(user_id, record_id, error = %e, "Revocation lookup failed; rejecting token");
                Err(TokenError::TokenRevoked.into())
            }
            Err(_) => {
                error!(
                    user_id,
                    record_id,
                    timeout_ms = self.config.store_timeout_ms(),
                    "Revocation lookup timed out; rejecting token"
                );
                Err(TokenError::TokenRevoked.into())
            }
        }
    }

    /// Verify a raw refresh token and run the revocation check
    pub async fn authenticate_refresh_token(&self, token: &str) -> DomainResult<RefreshSession> {
        let claims = self.signer.verify_refresh_token(token)?;
        self.check_revocation(&claims).await
    }

    /// Verify a raw access token
    pub fn authenticate_access_token(&self, token: &str) -> DomainResult<Claims> {
        self.signer.verify_access_token(token)
    }

    async fn issue_token_pair(
        &self,
        payload: &TokenPayload,
    ) -> DomainResult<(TokenPair, RecordId)> {
        let access_token = self.signer.issue_access_token(payload)?;

        let record = self
            .bounded(
                self.token_repository
                    .create(payload.user_id, self.refresh_expiry()),
            )
            .await?;

        let refresh_token = self.signer.issue_refresh_token(payload, record.id)?;
        Ok((self.token_pair(access_token, refresh_token), record.id))
    }

    fn token_pair(&self, access_token: String, refresh_token: String) -> TokenPair {
        let config = self.signer.config();
        TokenPair {
            access_token,
            refresh_token,
            access_expires_in: config.access_token_expiry_secs,
            refresh_expires_in: config.refresh_token_expiry_secs,
        }
    }

    fn refresh_expiry(&self) -> chrono::DateTime<Utc> {
        Utc::now() + self.signer.config().refresh_lifetime()
    }

    async fn bounded<R, F>(&self, call: F) -> DomainResult<R>
    where
        F: Future<Output = DomainResult<R>>,
    {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                let millis = self.config.store_timeout_ms();
                error!(timeout_ms = millis, "Store call timed out");
                Err(StoreError::Timeout { millis }.into())
            }
        }
    }
}

#[async_trait]
impl<U, T, H> RefreshTokenAuthenticator for AuthService<U, T, H>
where
    U: UserRepository,
    T: TokenRepository,
    H: PasswordHasher,
{
    async fn authenticate_refresh_token(&self, token: &str) -> Result<RefreshSession, DomainError> {
        AuthService::authenticate_refresh_token(self, token).await
    }
}
