pub mod auth;
pub mod error;

pub use error::{field_errors, ErrorResponse, ErrorResponseExt, FieldError};
