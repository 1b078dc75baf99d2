use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::umkm::model::{OperatingHours, Product, SocialMedia};
use crate::shared::types::Coordinates;

/// Request DTO for registering a business
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUmkmDto {
    #[validate(length(min = 2, max = 150, message = "Name must be 2-150 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, max = 100, message = "Category is required"))]
    pub category: String,

    #[validate(length(min = 1, message = "Owner is required"))]
    pub owner: String,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "Phone must be an Indonesian mobile number"
    ))]
    pub phone: String,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "WhatsApp must be an Indonesian mobile number"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    #[validate(url(message = "Website must be a valid URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default)]
    pub social_media: SocialMedia,

    #[serde(default)]
    pub images: Vec<String>,

    #[validate(nested)]
    #[serde(default)]
    pub products: Vec<Product>,

    #[serde(default)]
    pub operating_hours: OperatingHours,
}

/// Request DTO for a partial business update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUmkmDto {
    #[validate(length(min = 2, max = 150, message = "Name must be 2-150 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Category must not be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

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

    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    #[validate(url(message = "Website must be a valid URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,

    #[validate(nested)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_hours: Option<OperatingHours>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: f64) -> Product {
        Product {
            name: name.into(),
            description: None,
            price,
            unit: Some("pcs".into()),
            image: None,
            available: Some(true),
        }
    }

    fn dto() -> CreateUmkmDto {
        CreateUmkmDto {
            name: "Batik Tulis Lestari".into(),
            description: "Batik tulis motif desa".into(),
            category: "Kerajinan".into(),
            owner: "Pak Harjo".into(),
            phone: "081298765432".into(),
            whatsapp: None,
            email: Some("batik@lestari.id".into()),
            address: "Dusun Krajan RT 02".into(),
            coordinates: None,
            website: None,
            social_media: SocialMedia::default(),
            images: Vec::new(),
            products: vec![product("Kain batik", 350000.0)],
            operating_hours: OperatingHours::default(),
        }
    }

    #[test]
    fn test_valid_umkm() {
        assert!(dto().validate().is_ok());
    }

    #[test]
    fn test_invalid_product_fails_whole_dto() {
        let mut dto = dto();
        dto.products.push(product("", -5.0));
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_contact_fields() {
        let mut dto = dto();
        dto.email = Some("bukan-email".into());
        dto.website = Some("lestari".into());
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("website"));
    }

    #[test]
    fn test_empty_update_is_valid_and_sends_nothing() {
        let dto = UpdateUmkmDto::default();
        assert!(dto.validate().is_ok());
        assert_eq!(serde_json::to_value(&dto).unwrap(), serde_json::json!({}));
    }
}
