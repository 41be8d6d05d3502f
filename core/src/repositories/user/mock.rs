//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{NewUser, User, UserId};
use crate::errors::{AuthError, DomainError};

use super::trait_::UserRepository;

/// Mock user repository for testing
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    next_id: AtomicI64,
    unavailable: AtomicBool,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every call fail with a store error
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Remove a user, simulating deletion by another system
    pub async fn delete(&self, id: UserId) -> bool {
        self.users.write().await.remove(&id).is_some()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::store_unavailable("mock user store offline"));
        }
        Ok(())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email == email))
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::DuplicateCredential.into());
        }

        let now = Utc::now();
        let stored = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_digest: user.password_digest,
            role: user.role,
            created_at: now,
            updated_at: now,
        };

        users.insert(stored.id, stored.clone());
        Ok(stored)
    }
}
