use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::resource::{Resource, ResourceFlag};
use crate::features::village_profile::dtos::{CreateVillageProfileDto, UpdateVillageProfileDto};
use crate::features::village_profile::params::VillageProfileParams;
use crate::shared::json::{self, JsonObject};
use crate::shared::types::ListShape;

/// One section of the village profile page (history, vision, geography, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VillageProfile {
    pub id: String,
    /// Free-text key, e.g. `sejarah`
    pub section: String,
    pub title: String,
    /// HTML or markdown
    pub content: String,
    pub images: Vec<String>,
    pub order: i32,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VillageProfileFlag {
    Published,
}

impl ResourceFlag for VillageProfileFlag {
    fn segment(&self) -> &'static str {
        "publish"
    }

    fn field(&self) -> &'static str {
        "isPublished"
    }
}

impl Resource for VillageProfile {
    const NAME: &'static str = "village-profile";
    const PATH: &'static str = "/village-profile";
    const LIST_SHAPE: ListShape = ListShape {
        list_keys: &["profiles", "sections", "villageProfiles"],
        meta_keys: &["pagination"],
    };
    const SINGULAR_KEYS: &'static [&'static str] = &["profile", "villageProfile", "section"];

    type Params = VillageProfileParams;
    type Flag = VillageProfileFlag;
    type CreateDto = CreateVillageProfileDto;
    type UpdateDto = UpdateVillageProfileDto;

    fn from_json(obj: &JsonObject) -> Option<Self> {
        let mut images = json::string_list(obj, &["images", "gallery"]);
        if images.is_empty() {
            images.extend(json::non_empty_string(obj, &["image"]));
        }

        Some(Self {
            id: json::id(obj)?,
            section: json::string_or_default(obj, &["section", "key"]),
            title: json::string_or_default(obj, &["title"]),
            content: json::string_or_default(obj, &["content", "body"]),
            images,
            order: json::i32_or(obj, &["order", "sortOrder"], 0),
            is_published: json::bool_or(obj, &["isPublished", "published"], false),
            created_at: json::datetime(obj, &["createdAt", "created_at"]).unwrap_or_default(),
            updated_at: json::datetime(obj, &["updatedAt", "updated_at"]).unwrap_or_default(),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }
}
