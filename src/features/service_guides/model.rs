use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::resource::{Resource, ResourceFlag};
use crate::features::service_guides::dtos::{CreateServiceGuideDto, UpdateServiceGuideDto};
use crate::features::service_guides::params::ServiceGuideParams;
use crate::shared::json::{self, JsonObject};
use crate::shared::types::ListShape;
use crate::shared::wire::{wire_enum, WireEnum};

wire_enum! {
    pub enum ServiceCategory {
        Kependudukan => "KEPENDUDUKAN",
        Perizinan => "PERIZINAN",
        SuratKeterangan => "SURAT_KETERANGAN",
        BantuanSosial => "BANTUAN_SOSIAL",
        Pertanahan => "PERTANAHAN",
        Lainnya => "LAINNYA",
    }
}

impl Default for ServiceCategory {
    fn default() -> Self {
        ServiceCategory::Lainnya
    }
}

/// How to obtain one public service (ID card, letters, permits, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceGuide {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub content: String,
    pub category: ServiceCategory,
    pub requirements: Vec<String>,
    pub steps: Vec<String>,
    pub documents: Vec<String>,
    pub contact: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceGuideFlag {
    Active,
    Featured,
}

impl ResourceFlag for ServiceGuideFlag {
    fn segment(&self) -> &'static str {
        match self {
            ServiceGuideFlag::Active => "activate",
            ServiceGuideFlag::Featured => "feature",
        }
    }

    fn field(&self) -> &'static str {
        match self {
            ServiceGuideFlag::Active => "isActive",
            ServiceGuideFlag::Featured => "isFeatured",
        }
    }
}

impl Resource for ServiceGuide {
    const NAME: &'static str = "service-guides";
    const PATH: &'static str = "/service-guides";
    const LIST_SHAPE: ListShape = ListShape {
        list_keys: &["serviceGuides", "guides", "services"],
        meta_keys: &["pagination"],
    };
    const SINGULAR_KEYS: &'static [&'static str] = &["serviceGuide", "guide", "service"];

    type Params = ServiceGuideParams;
    type Flag = ServiceGuideFlag;
    type CreateDto = CreateServiceGuideDto;
    type UpdateDto = UpdateServiceGuideDto;

    fn from_json(obj: &JsonObject) -> Option<Self> {
        Some(Self {
            id: json::id(obj)?,
            title: json::string_or_default(obj, &["title", "name"]),
            slug: json::string_or_default(obj, &["slug"]),
            description: json::non_empty_string(obj, &["description", "summary"]),
            content: json::string_or_default(obj, &["content", "body"]),
            category: json::string(obj, &["category"])
                .and_then(|c| ServiceCategory::from_wire(&c))
                .unwrap_or_default(),
            requirements: json::string_list(obj, &["requirements", "persyaratan"]),
            steps: json::string_list(obj, &["steps", "procedures", "prosedur"]),
            documents: json::string_list(obj, &["documents", "forms"]),
            contact: json::non_empty_string(obj, &["contact", "contactInfo"]),
            is_active: json::bool_or(obj, &["isActive", "active"], true),
            is_featured: json::bool_or(obj, &["isFeatured", "featured"], false),
            created_at: json::datetime(obj, &["createdAt", "created_at"]).unwrap_or_default(),
            updated_at: json::datetime(obj, &["updatedAt", "updated_at"]).unwrap_or_default(),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> Option<&str> {
        Some(self.slug.as_str()).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lists_keep_order() {
        let guide = ServiceGuide::from_json(
            json!({
                "id": "g1",
                "title": "Pembuatan KTP",
                "slug": "pembuatan-ktp",
                "category": "kependudukan",
                "requirements": ["Kartu Keluarga", "Surat pengantar RT"],
                "steps": "Datang ke kantor desa\nIsi formulir\nFoto di kecamatan",
                "documents": [{"name": "Formulir F-1.07", "url": "/f107.pdf"}]
            })
            .as_object()
            .unwrap(),
        )
        .unwrap();

        assert_eq!(guide.category, ServiceCategory::Kependudukan);
        assert_eq!(guide.requirements.len(), 2);
        assert_eq!(guide.steps[2], "Foto di kecamatan");
        assert_eq!(guide.documents, vec!["/f107.pdf"]);
        assert_eq!(guide.slug(), Some("pembuatan-ktp"));
    }

    #[test]
    fn test_missing_lists_are_empty() {
        let guide = ServiceGuide::from_json(json!({"id": "g2"}).as_object().unwrap()).unwrap();
        assert!(guide.requirements.is_empty());
        assert!(guide.steps.is_empty());
        assert_eq!(guide.category, ServiceCategory::Lainnya);
        assert_eq!(guide.slug(), None);
    }
}
