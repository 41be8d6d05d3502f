//! RS256 key management for access token signing and verification

use std::fs;
use std::path::{Path, PathBuf};

use jsonwebtoken::{DecodingKey, EncodingKey};
use tracing::error;

use crate::errors::DomainError;

/// RSA key pair used for access tokens
///
/// Loaded once at startup and immutable afterwards.
#[derive(Clone)]
pub struct Rs256KeyManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    private_key_path: PathBuf,
    public_key_path: PathBuf,
}

impl std::fmt::Debug for Rs256KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rs256KeyManager")
            .field("private_key_path", &self.private_key_path)
            .field("public_key_path", &self.public_key_path)
            .finish()
    }
}

impl Rs256KeyManager {
    /// Creates a new RS256 key manager from key file paths
    ///
    /// # Arguments
    ///
    /// * `private_key_path` - Path to the PEM-encoded (PKCS#1) private key
    /// * `public_key_path` - Path to the PEM-encoded public key
    ///
    /// # Returns
    ///
    /// * `Ok(Rs256KeyManager)` - Both keys loaded and parsed
    /// * `Err(DomainError)` - `KeyUnavailable` when a file is missing or malformed
    ///
    /// # Example
    ///
    /// ```no_run
    /// use authsvc_core::services::token::Rs256KeyManager;
    ///
    /// let keys = Rs256KeyManager::new("certs/private.pem", "certs/public.pem")?;
    /// # Ok::<(), authsvc_core::errors::DomainError>(())
    /// ```
    pub fn new<P: AsRef<Path>>(
        private_key_path: P,
        public_key_path: P,
    ) -> Result<Self, DomainError> {
        let private_key_path = private_key_path.as_ref().to_path_buf();
        let public_key_path = public_key_path.as_ref().to_path_buf();

        let private_key_pem = read_pem(&private_key_path, "private")?;
        let public_key_pem = read_pem(&public_key_path, "public")?;

        let mut manager = Self::from_pem_bytes(&private_key_pem, &public_key_pem)?;
        manager.private_key_path = private_key_path;
        manager.public_key_path = public_key_path;
        Ok(manager)
    }

    /// Creates a key manager from PEM strings (tests and embedded keys)
    pub fn from_pem_strings(
        private_key_pem: &str,
        public_key_pem: &str,
    ) -> Result<Self, DomainError> {
        Self::from_pem_bytes(private_key_pem.as_bytes(), public_key_pem.as_bytes())
    }

    fn from_pem_bytes(private_key_pem: &[u8], public_key_pem: &[u8]) -> Result<Self, DomainError> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem).map_err(|e| {
            DomainError::key_unavailable(format!("Invalid private key format: {}", e))
        })?;

        let decoding_key = DecodingKey::from_rsa_pem(public_key_pem).map_err(|e| {
            DomainError::key_unavailable(format!("Invalid public key format: {}", e))
        })?;

        Ok(Self {
            encoding_key,
            decoding_key,
            private_key_path: PathBuf::from("memory"),
            public_key_path: PathBuf::from("memory"),
        })
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Returns the paths the keys were loaded from (`memory` for PEM strings)
    pub fn key_paths(&self) -> (&Path, &Path) {
        (&self.private_key_path, &self.public_key_path)
    }
}

fn read_pem(path: &Path, kind: &str) -> Result<Vec<u8>, DomainError> {
    fs::read(path).map_err(|e| {
        error!(path = %path.display(), error = %e, "Failed to read {} key", kind);
        DomainError::key_unavailable(format!("Failed to read {} key: {}", kind, e))
    })
}
