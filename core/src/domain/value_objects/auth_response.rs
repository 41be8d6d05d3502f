//! Authentication result handed back to the transport layer.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::UserId;

/// Outcome of register, login and refresh
///
/// The transport layer returns `user_id` in the body and delivers the two
/// tokens out of band (cookies).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub user_id: UserId,
    pub tokens: TokenPair,
}

impl AuthResponse {
    pub fn new(user_id: UserId, tokens: TokenPair) -> Self {
        Self { user_id, tokens }
    }
}
