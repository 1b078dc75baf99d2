use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVillageProfileDto {
    #[validate(length(min = 1, max = 50, message = "Section must be 1-50 characters"))]
    pub section: String,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub order: i32,

    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVillageProfileDto {
    #[validate(length(min = 1, max = 50, message = "Section must be 1-50 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}
