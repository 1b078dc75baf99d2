use serde::Deserialize;

use crate::features::service_guides::model::ServiceCategory;
use crate::shared::constants::SERVICE_GUIDES_PAGE_SIZE;
use crate::shared::params::{loose_bool_opt, loose_wire, PageParams, QueryParams, QueryPayload};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceGuideParams {
    #[serde(flatten)]
    pub page: PageParams,
    #[serde(default, deserialize_with = "loose_wire")]
    pub category: Option<ServiceCategory>,
    #[serde(default, deserialize_with = "loose_bool_opt")]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "loose_bool_opt")]
    pub is_featured: Option<bool>,
}

impl QueryParams for ServiceGuideParams {
    const DEFAULT_LIMIT: u32 = SERVICE_GUIDES_PAGE_SIZE;

    fn normalized(&self) -> Self {
        Self {
            page: self.page.normalized(Self::DEFAULT_LIMIT),
            ..self.clone()
        }
    }

    fn write_payload(&self, payload: &mut QueryPayload) {
        self.page.write_payload(payload);
        payload
            .wire("category", self.category)
            .flag("isActive", self.is_active)
            .flag("isFeatured", self.is_featured);
    }

    fn page_params(&self) -> &PageParams {
        &self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload() {
        let params = ServiceGuideParams::from_value(&json!({
            "category": "surat keterangan",
            "isFeatured": true,
            "search": ""
        }))
        .unwrap();
        let payload = params.to_payload();
        assert_eq!(payload.get("category"), Some("SURAT_KETERANGAN"));
        assert_eq!(payload.get("isFeatured"), Some("true"));
        assert_eq!(payload.get("limit"), Some("10"));
        assert!(!payload.contains_key("search"));
    }
}
