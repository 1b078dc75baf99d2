use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request DTO for user login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginRequestDto {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_validation() {
        assert!(LoginRequestDto::new(" admin@desa.id ", "x").validate().is_ok());
        assert!(LoginRequestDto::new("admin", "x").validate().is_err());
        assert!(LoginRequestDto::new("admin@desa.id", "").validate().is_err());
    }
}
