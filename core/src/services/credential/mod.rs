//! Credential hashing and verification

mod hasher;
mod verifier;

pub use hasher::{BcryptPasswordHasher, PasswordHasher, BCRYPT_DIGEST_LEN, BCRYPT_PREFIX};
pub use verifier::CredentialVerifier;
