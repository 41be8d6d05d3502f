pub mod auth;

pub use auth::{AuthContext, JwtAuth, RefreshContext, RefreshTokenAuth};
