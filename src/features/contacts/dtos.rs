use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::contacts::model::ContactType;

/// Request DTO for adding a directory contact
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactDto {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Position is required"))]
    pub position: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "Phone must be an Indonesian mobile number"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "WhatsApp must be an Indonesian mobile number"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(rename = "type")]
    pub contact_type: ContactType,

    #[serde(default)]
    pub order: i32,
}

/// Request DTO for a partial contact update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactDto {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Position must not be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "Phone must be an Indonesian mobile number"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "WhatsApp must be an Indonesian mobile number"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<ContactType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}
