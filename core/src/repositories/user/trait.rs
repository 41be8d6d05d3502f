//! User repository trait defining the interface for the identity directory.
//!
//! The directory is the system of record for users. Lookups by email expect
//! the address to be normalized already (trimmed and lowercased).

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User, UserId};
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use authsvc_core::domain::entities::user::{NewUser, User, UserId};
/// use authsvc_core::errors::DomainError;
/// use authsvc_core::repositories::UserRepository;
///
/// struct MySqlUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for MySqlUserRepository {
///     async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> { Ok(false) }
/// #   async fn create(&self, user: NewUser) -> Result<User, DomainError> { unimplemented!() }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered with that email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by id
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Check whether an email is already registered
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Insert a new user
    ///
    /// Email uniqueness is enforced here as well as by the caller's
    /// pre-check, so a concurrent registration still loses cleanly.
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user with generated id and timestamps
    /// * `Err(DomainError::Auth(AuthError::DuplicateCredential))` - Email taken
    /// * `Err(DomainError)` - Store error
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;
}
