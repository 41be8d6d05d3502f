//! Already-validated request fields consumed by the auth service.
//!
//! Field validation happens in the request layer; these types only carry the
//! accepted values. `Debug` never prints the raw password.

/// Fields for a new account
#[derive(Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"****")
            .finish()
    }
}

/// Email and password presented at login
#[derive(Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"****")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_masks_password() {
        let registration = Registration {
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "a@b.com".to_string(),
            password: "password1".to_string(),
        };
        let login = LoginCredentials {
            email: "a@b.com".to_string(),
            password: "password1".to_string(),
        };

        assert!(!format!("{:?}", registration).contains("password1"));
        assert!(!format!("{:?}", login).contains("password1"));
    }
}
