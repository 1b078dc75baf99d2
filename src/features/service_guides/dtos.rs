use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::service_guides::model::ServiceCategory;
use crate::shared::validation::slugify;

/// Request DTO for publishing a service guide
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceGuideDto {
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    pub title: String,

    #[validate(regex(
        path = "*crate::shared::validation::SLUG_REGEX",
        message = "Slug may only contain lowercase letters, digits and single hyphens"
    ))]
    pub slug: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    pub category: ServiceCategory,

    #[serde(default)]
    pub requirements: Vec<String>,

    #[validate(length(min = 1, message = "At least one step is required"))]
    pub steps: Vec<String>,

    #[serde(default)]
    pub documents: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,

    #[serde(default)]
    pub is_featured: bool,
}

impl CreateServiceGuideDto {
    pub fn new(title: impl Into<String>, content: impl Into<String>, category: ServiceCategory) -> Self {
        let title = title.into();
        Self {
            slug: slugify(&title),
            title,
            description: None,
            content: content.into(),
            category,
            requirements: Vec::new(),
            steps: Vec::new(),
            documents: Vec::new(),
            contact: None,
            is_featured: false,
        }
    }
}

/// Request DTO for a partial service guide update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceGuideDto {
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[validate(regex(
        path = "*crate::shared::validation::SLUG_REGEX",
        message = "Slug may only contain lowercase letters, digits and single hyphens"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ServiceCategory>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<Vec<String>>,

    #[validate(length(min = 1, message = "At least one step is required"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}
