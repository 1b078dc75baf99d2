use serde::Deserialize;

use crate::shared::constants::UMKM_PAGE_SIZE;
use crate::shared::params::{
    blank, blank_as_none, loose_bool_opt, PageParams, QueryParams, QueryPayload,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UmkmParams {
    #[serde(flatten)]
    pub page: PageParams,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "loose_bool_opt")]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "loose_bool_opt")]
    pub featured: Option<bool>,
    #[serde(default, deserialize_with = "loose_bool_opt")]
    pub verified: Option<bool>,
}

impl UmkmParams {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Default::default()
        }
    }
}

impl QueryParams for UmkmParams {
    const DEFAULT_LIMIT: u32 = UMKM_PAGE_SIZE;

    fn normalized(&self) -> Self {
        Self {
            page: self.page.normalized(Self::DEFAULT_LIMIT),
            category: blank(self.category.as_deref()),
            is_active: self.is_active,
            featured: self.featured,
            verified: self.verified,
        }
    }

    fn write_payload(&self, payload: &mut QueryPayload) {
        self.page.write_payload(payload);
        payload
            .text("category", self.category.as_deref())
            .flag("isActive", self.is_active)
            .flag("featured", self.featured)
            .flag("verified", self.verified);
    }

    fn page_params(&self) -> &PageParams {
        &self.page
    }
}
