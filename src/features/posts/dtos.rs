use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::features::posts::model::{PostCategory, PostStatus};
use crate::shared::validation::slugify;

/// Request DTO for creating a post
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostDto {
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    pub title: String,

    #[validate(regex(
        path = "*crate::shared::validation::SLUG_REGEX",
        message = "Slug may only contain lowercase letters, digits and single hyphens"
    ))]
    pub slug: String,

    #[validate(length(max = 500, message = "Excerpt must not exceed 500 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[validate(url(message = "Cover image must be a valid URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    pub category: PostCategory,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub status: PostStatus,
}

impl CreatePostDto {
    /// Draft with the slug derived from the title
    pub fn new(title: impl Into<String>, content: impl Into<String>, category: PostCategory) -> Self {
        let title = title.into();
        Self {
            slug: slugify(&title),
            title,
            excerpt: None,
            content: content.into(),
            cover_image: None,
            category,
            tags: Vec::new(),
            featured: false,
            status: PostStatus::Draft,
        }
    }
}

/// Request DTO for a partial post update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostDto {
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[validate(regex(
        path = "*crate::shared::validation::SLUG_REGEX",
        message = "Slug may only contain lowercase letters, digits and single hyphens"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    #[validate(length(max = 500, message = "Excerpt must not exceed 500 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[validate(url(message = "Cover image must be a valid URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<PostCategory>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
}
