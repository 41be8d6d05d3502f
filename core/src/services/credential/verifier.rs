//! Async wrapper around the hashing primitive

use std::sync::Arc;

use crate::errors::DomainError;

use super::hasher::PasswordHasher;

/// Runs hashing on the blocking pool
///
/// Stateless apart from the shared hasher; cheap to clone.
pub struct CredentialVerifier<H: PasswordHasher> {
    hasher: Arc<H>,
}

impl<H: PasswordHasher> Clone for CredentialVerifier<H> {
    fn clone(&self) -> Self {
        Self {
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<H: PasswordHasher> CredentialVerifier<H> {
    pub fn new(hasher: Arc<H>) -> Self {
        Self { hasher }
    }

    /// Hash a new secret
    pub async fn hash(&self, secret: &str) -> Result<String, DomainError> {
        let hasher = Arc::clone(&self.hasher);
        let secret = secret.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&secret))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Hashing task failed: {}", e),
            })?
    }

    /// Check `candidate` against a stored digest
    ///
    /// Never errors: a malformed digest or a failed task is a mismatch.
    pub async fn verify(&self, candidate: &str, digest: &str) -> bool {
        let hasher = Arc::clone(&self.hasher);
        let candidate = candidate.to_owned();
        let digest = digest.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&candidate, &digest))
            .await
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::credential::BcryptPasswordHasher;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let verifier = CredentialVerifier::new(Arc::new(BcryptPasswordHasher::new(4)));
        let digest = verifier.hash("correct horse").await.unwrap();

        assert!(verifier.verify("correct horse", &digest).await);
        assert!(!verifier.verify("battery staple", &digest).await);
        assert!(!verifier.verify("correct horse", "$2b$garbage").await);
    }
}
