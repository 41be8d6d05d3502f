//! HTTP transport for the auth service
//!
//! Request validation, cookie delivery, token middleware and the route
//! handlers over [`authsvc_core::AuthService`].

pub mod app;
pub mod cookies;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::configure;
pub use routes::auth::AppState;
