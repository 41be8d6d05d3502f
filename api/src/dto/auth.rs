use serde::{Deserialize, Serialize};
use validator::Validate;

use authsvc_core::domain::entities::user::UserId;
use authsvc_core::domain::value_objects::{LoginCredentials, Registration};

/// Body of POST /auth/register
#[derive(Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    #[serde(default)]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    #[serde(default)]
    pub last_name: String,

    #[validate(email(message = "Email must be a valid address"))]
    #[serde(default)]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[serde(default)]
    pub password: String,
}

impl RegisterRequest {
    /// Trim names, trim and lowercase the email
    pub fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: normalize_email(&self.email),
            password: self.password,
        }
    }
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Registration {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
        }
    }
}

/// Body of POST /auth/login
#[derive(Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid address"))]
    #[serde(default)]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn normalized(self) -> Self {
        Self {
            email: normalize_email(&self.email),
            password: self.password,
        }
    }
}

impl From<LoginRequest> for LoginCredentials {
    fn from(req: LoginRequest) -> Self {
        LoginCredentials {
            email: req.email,
            password: req.password,
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Body returned by register, login and refresh; tokens travel as cookies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            first_name: " Ada ".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_register_normalization() {
        let req = register("  Ada@Example.COM ", "password1").normalized();
        assert_eq!(req.email, "ada@example.com");
        assert_eq!(req.first_name, "Ada");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_rules() {
        assert!(register("a@b.com", "short").validate().is_err());
        assert!(register("not-an-email", "password1").validate().is_err());

        let mut req = register("a@b.com", "password1");
        req.first_name = String::new();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("first_name"));
    }

    #[test]
    fn test_login_rules() {
        let ok = LoginRequest {
            email: "a@b.com".to_string(),
            password: "x".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty = LoginRequest {
            email: "a@b.com".to_string(),
            password: String::new(),
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_register_body_is_camel_case() {
        let req: RegisterRequest = serde_json::from_value(serde_json::json!({
            "firstName": "A",
            "lastName": "B",
            "email": "a@b.com",
            "password": "password1"
        }))
        .unwrap();
        assert_eq!(req.first_name, "A");
        assert_eq!(req.last_name, "B");
    }
}
