use serde::Deserialize;

use crate::shared::constants::VILLAGE_PROFILE_PAGE_SIZE;
use crate::shared::params::{
    blank, blank_as_none, loose_bool_opt, PageParams, QueryParams, QueryPayload,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VillageProfileParams {
    #[serde(flatten)]
    pub page: PageParams,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub section: Option<String>,
    #[serde(default, deserialize_with = "loose_bool_opt")]
    pub is_published: Option<bool>,
}

impl QueryParams for VillageProfileParams {
    const DEFAULT_LIMIT: u32 = VILLAGE_PROFILE_PAGE_SIZE;

    fn normalized(&self) -> Self {
        Self {
            page: self.page.normalized(Self::DEFAULT_LIMIT),
            section: blank(self.section.as_deref()),
            is_published: self.is_published,
        }
    }

    fn write_payload(&self, payload: &mut QueryPayload) {
        self.page.write_payload(payload);
        payload
            .text("section", self.section.as_deref())
            .flag("isPublished", self.is_published);
    }

    fn page_params(&self) -> &PageParams {
        &self.page
    }
}
