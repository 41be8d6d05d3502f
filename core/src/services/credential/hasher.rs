//! Password hashing primitive

use crate::errors::DomainError;

/// Prefix of digests produced by [`BcryptPasswordHasher`]
pub const BCRYPT_PREFIX: &str = "$2b$";

/// Length of a bcrypt digest
pub const BCRYPT_DIGEST_LEN: usize = 60;

/// Hashing capability the engine depends on
///
/// Implementations are CPU-bound and synchronous; [`super::CredentialVerifier`]
/// moves them off the async executor.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Produce an algorithm-prefixed digest of `secret`
    fn hash(&self, secret: &str) -> Result<String, DomainError>;

    /// Compare `candidate` against `digest`
    ///
    /// A malformed digest returns `false`.
    fn verify(&self, candidate: &str, digest: &str) -> bool;
}

/// bcrypt-backed hasher
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(10)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, secret: &str) -> Result<String, DomainError> {
        bcrypt::hash(secret, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
    }

    fn verify(&self, candidate: &str, digest: &str) -> bool {
        bcrypt::verify(candidate, digest).unwrap_or(false)
    }
}
