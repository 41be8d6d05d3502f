//! Access and refresh token signing

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::error;

use crate::domain::entities::token::{Claims, RecordId, TokenPayload};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;
use super::key_manager::Rs256KeyManager;

/// Signs and verifies both token kinds
///
/// Access tokens use RS256 with the RSA key pair; refresh tokens use HS256
/// with the pre-shared secret. Issuing never touches the revocation store.
pub struct TokenSigner {
    config: TokenServiceConfig,
    keys: Rs256KeyManager,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    access_validation: Validation,
    refresh_validation: Validation,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("config", &self.config)
            .field("keys", &self.keys)
            .finish()
    }
}

impl TokenSigner {
    /// Creates a signer from loaded key material
    ///
    /// # Returns
    ///
    /// * `Ok(TokenSigner)` - Ready to issue tokens
    /// * `Err(DomainError)` - `KeyUnavailable` when the refresh secret is empty
    pub fn new(keys: Rs256KeyManager, config: TokenServiceConfig) -> Result<Self, DomainError> {
        if config.refresh_token_secret.is_empty() {
            return Err(DomainError::key_unavailable("Refresh token secret is empty"));
        }

        let secret = config.refresh_token_secret.as_bytes();
        let refresh_encoding_key = EncodingKey::from_secret(secret);
        let refresh_decoding_key = DecodingKey::from_secret(secret);

        Ok(Self {
            access_validation: validation_for(Algorithm::RS256, &config.issuer),
            refresh_validation: validation_for(Algorithm::HS256, &config.issuer),
            config,
            keys,
            refresh_encoding_key,
            refresh_decoding_key,
        })
    }

    /// Loads the RSA keys from the configured paths and builds a signer
    pub fn from_config(jwt: &authsvc_shared::JwtConfig) -> Result<Self, DomainError> {
        let keys = Rs256KeyManager::new(&jwt.private_key_path, &jwt.public_key_path)?;
        Self::new(keys, TokenServiceConfig::from(jwt))
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues an RS256 access token; the claims never carry `jti`
    pub fn issue_access_token(&self, payload: &TokenPayload) -> Result<String, DomainError> {
        let claims = Claims::new_access_token(
            payload,
            &self.config.issuer,
            self.config.access_token_expiry_secs,
        );

        encode(
            &Header::new(Algorithm::RS256),
            &claims,
            self.keys.encoding_key(),
        )
        .map_err(|e| {
            error!(error = %e, "Failed to sign access token");
            DomainError::key_unavailable(format!("Access token signing failed: {}", e))
        })
    }

    /// Issues an HS256 refresh token bound to `record_id`
    pub fn issue_refresh_token(
        &self,
        payload: &TokenPayload,
        record_id: RecordId,
    ) -> Result<String, DomainError> {
        let claims = Claims::new_refresh_token(
            payload,
            record_id,
            &self.config.issuer,
            self.config.refresh_token_expiry_secs,
        );

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.refresh_encoding_key,
        )
        .map_err(|e| {
            error!(error = %e, "Failed to sign refresh token");
            DomainError::key_unavailable(format!("Refresh token signing failed: {}", e))
        })
    }

    /// Verifies an access token's signature, issuer and expiry
    ///
    /// A token carrying `jti` is a refresh token presented in the wrong place
    /// and is rejected as invalid.
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = decode::<Claims>(token, self.keys.decoding_key(), &self.access_validation)
            .map_err(map_jwt_error)?
            .claims;

        if claims.jti.is_some() {
            return Err(TokenError::InvalidToken.into());
        }
        claims.user_id()?;
        Ok(claims)
    }

    /// Verifies a refresh token's signature, issuer and expiry
    ///
    /// Does not consult the revocation store.
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = decode::<Claims>(token, &self.refresh_decoding_key, &self.refresh_validation)
            .map_err(map_jwt_error)?
            .claims;

        claims.record_id()?;
        claims.user_id()?;
        Ok(claims)
    }
}

fn validation_for(algorithm: Algorithm, issuer: &str) -> Validation {
    let mut validation = Validation::new(algorithm);
    validation.set_issuer(&[issuer]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);
    validation.validate_exp = true;
    validation.leeway = 0;
    validation
}

fn map_jwt_error(e: jsonwebtoken::errors::Error) -> DomainError {
    match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::TokenExpired.into(),
        ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim {
            claim: claim.clone(),
        }
        .into(),
        _ => TokenError::InvalidToken.into(),
    }
}
