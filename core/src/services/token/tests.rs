use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use super::test_keys::{OTHER_PRIVATE_KEY_PEM, PRIVATE_KEY_PEM, PUBLIC_KEY_PEM};
use super::{Rs256KeyManager, TokenServiceConfig, TokenSigner};
use crate::domain::entities::token::{Claims, TokenPayload, JWT_ISSUER};
use crate::domain::entities::user::UserRole;
use crate::errors::{DomainError, TokenError};

const SECRET: &str = "test-refresh-secret";

fn signer_with(private_pem: &str, config: TokenServiceConfig) -> TokenSigner {
    let keys = Rs256KeyManager::from_pem_strings(private_pem, PUBLIC_KEY_PEM).unwrap();
    TokenSigner::new(keys, config).unwrap()
}

fn signer() -> TokenSigner {
    signer_with(PRIVATE_KEY_PEM, TokenServiceConfig::new(SECRET))
}

fn payload() -> TokenPayload {
    TokenPayload::new(42, UserRole::Manager)
}

fn token_error(result: Result<Claims, DomainError>) -> TokenError {
    match result {
        Err(DomainError::Token(e)) => e,
        other => panic!("expected token error, got {:?}", other),
    }
}

#[test]
fn test_access_token_round_trip() {
    let signer = signer();
    let token = signer.issue_access_token(&payload()).unwrap();

    assert_eq!(token.split('.').count(), 3);
    let header = jsonwebtoken::decode_header(&token).unwrap();
    assert_eq!(header.alg, Algorithm::RS256);

    let claims = signer.verify_access_token(&token).unwrap();
    assert_eq!(claims.sub, "42");
    assert_eq!(claims.role, UserRole::Manager);
    assert_eq!(claims.iss, JWT_ISSUER);
    assert_eq!(claims.jti, None);
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn test_refresh_token_round_trip() {
    let signer = signer();
    let token = signer.issue_refresh_token(&payload(), 77).unwrap();

    let header = jsonwebtoken::decode_header(&token).unwrap();
    assert_eq!(header.alg, Algorithm::HS256);

    let claims = signer.verify_refresh_token(&token).unwrap();
    assert_eq!(claims.jti.as_deref(), Some("77"));
    assert_eq!(claims.record_id().unwrap(), 77);
    assert_eq!(claims.payload().unwrap(), payload());
    assert_eq!(claims.exp - claims.iat, 365 * 24 * 60 * 60);
}

#[test]
fn test_token_kinds_are_not_interchangeable() {
    let signer = signer();
    let access = signer.issue_access_token(&payload()).unwrap();
    let refresh = signer.issue_refresh_token(&payload(), 1).unwrap();

    assert_eq!(
        token_error(signer.verify_refresh_token(&access)),
        TokenError::InvalidToken
    );
    assert_eq!(
        token_error(signer.verify_access_token(&refresh)),
        TokenError::InvalidToken
    );
}

#[test]
fn test_access_token_signed_by_other_key_rejected() {
    let forger = signer_with(OTHER_PRIVATE_KEY_PEM, TokenServiceConfig::new(SECRET));
    let forged = forger.issue_access_token(&payload()).unwrap();

    assert_eq!(
        token_error(signer().verify_access_token(&forged)),
        TokenError::InvalidToken
    );
}

#[test]
fn test_refresh_token_with_other_secret_rejected() {
    let other = signer_with(PRIVATE_KEY_PEM, TokenServiceConfig::new("another-secret"));
    let token = other.issue_refresh_token(&payload(), 3).unwrap();

    assert_eq!(
        token_error(signer().verify_refresh_token(&token)),
        TokenError::InvalidToken
    );
}

#[test]
fn test_expired_tokens_rejected() {
    let mut config = TokenServiceConfig::new(SECRET);
    config.access_token_expiry_secs = -120;
    config.refresh_token_expiry_secs = -120;
    let signer = signer_with(PRIVATE_KEY_PEM, config);

    let access = signer.issue_access_token(&payload()).unwrap();
    let refresh = signer.issue_refresh_token(&payload(), 9).unwrap();

    assert_eq!(
        token_error(signer.verify_access_token(&access)),
        TokenError::TokenExpired
    );
    assert_eq!(
        token_error(signer.verify_refresh_token(&refresh)),
        TokenError::TokenExpired
    );
}

#[test]
fn test_wrong_issuer_rejected() {
    let mut config = TokenServiceConfig::new(SECRET);
    config.issuer = "someone-else".to_string();
    let foreign = signer_with(PRIVATE_KEY_PEM, config);
    let token = foreign.issue_access_token(&payload()).unwrap();

    assert_eq!(
        token_error(signer().verify_access_token(&token)),
        TokenError::InvalidToken
    );
}

#[test]
fn test_refresh_token_without_jti_is_missing_claim() {
    let claims = Claims::new_access_token(&payload(), JWT_ISSUER, 600);
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert_eq!(
        token_error(signer().verify_refresh_token(&token)),
        TokenError::MissingClaim {
            claim: "jti".to_string()
        }
    );
}

#[test]
fn test_garbage_is_invalid() {
    let signer = signer();
    assert_eq!(
        token_error(signer.verify_access_token("not.a.jwt")),
        TokenError::InvalidToken
    );
    assert_eq!(
        token_error(signer.verify_refresh_token("")),
        TokenError::InvalidToken
    );
}

#[test]
fn test_empty_secret_refused() {
    let keys = Rs256KeyManager::from_pem_strings(PRIVATE_KEY_PEM, PUBLIC_KEY_PEM).unwrap();
    let err = TokenSigner::new(keys, TokenServiceConfig::new("")).unwrap_err();
    assert_eq!(err.error_code(), "KEY_UNAVAILABLE");
}

#[test]
fn test_debug_hides_secret() {
    let rendered = format!("{:?}", signer());
    assert!(!rendered.contains(SECRET));
}
