use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::features::auth::model::UserRole;

/// Request DTO for creating an admin panel account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(
        length(min = 3, max = 50, message = "Username must be 3-50 characters"),
        regex(
            path = "*crate::shared::validation::USERNAME_REGEX",
            message = "Username must start with letter or underscore and contain only alphanumeric characters and underscores"
        )
    )]
    pub username: String,

    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    pub name: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    pub role: UserRole,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "Phone must be an Indonesian mobile number"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Request DTO for a partial account update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDto {
    #[validate(email(message = "Invalid email format"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[validate(
        length(min = 3, max = 50, message = "Username must be 3-50 characters"),
        regex(
            path = "*crate::shared::validation::USERNAME_REGEX",
            message = "Username must start with letter or underscore and contain only alphanumeric characters and underscores"
        )
    )]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[validate(length(min = 1, max = 128, message = "Name must be 1-128 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "Phone must be an Indonesian mobile number"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[validate(url(message = "Avatar must be a valid URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Request DTO for changing a password
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_password_change"))]
pub struct ChangePasswordDto {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,

    #[serde(skip_serializing)]
    pub confirm_password: String,
}

fn validate_password_change(dto: &ChangePasswordDto) -> Result<(), ValidationError> {
    if dto.new_password != dto.confirm_password {
        let mut err = ValidationError::new("password_mismatch");
        err.message = Some("Password confirmation does not match".into());
        return Err(err);
    }
    if dto.new_password == dto.current_password {
        let mut err = ValidationError::new("password_unchanged");
        err.message = Some("New password must differ from the current one".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;

    #[test]
    fn test_create_user_validation() {
        let mut dto = CreateUserDto {
            email: SafeEmail().fake(),
            username: "operator_1".into(),
            name: "Operator Satu".into(),
            password: "rahasia123".into(),
            role: UserRole::Operator,
            phone: None,
        };
        assert!(dto.validate().is_ok());

        dto.username = "1operator".into();
        dto.password = "pendek".into();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_password_change_rules() {
        let mut dto = ChangePasswordDto {
            current_password: "lama12345".into(),
            new_password: "baru12345".into(),
            confirm_password: "baru12346".into(),
        };
        assert!(dto.validate().is_err());

        dto.confirm_password = "baru12345".into();
        assert!(dto.validate().is_ok());

        let body = serde_json::to_value(&dto).unwrap();
        assert!(body.get("confirmPassword").is_none());
        assert_eq!(body["newPassword"], "baru12345");
    }
}
