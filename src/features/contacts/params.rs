use serde::Deserialize;

use crate::features::contacts::model::ContactType;
use crate::shared::constants::CONTACTS_PAGE_SIZE;
use crate::shared::params::{
    blank, blank_as_none, loose_bool_opt, loose_wire, PageParams, QueryParams, QueryPayload,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactParams {
    #[serde(flatten)]
    pub page: PageParams,
    #[serde(rename = "type", default, deserialize_with = "loose_wire")]
    pub contact_type: Option<ContactType>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "loose_bool_opt")]
    pub is_active: Option<bool>,
}

impl QueryParams for ContactParams {
    const DEFAULT_LIMIT: u32 = CONTACTS_PAGE_SIZE;

    fn normalized(&self) -> Self {
        Self {
            page: self.page.normalized(Self::DEFAULT_LIMIT),
            contact_type: self.contact_type,
            department: blank(self.department.as_deref()),
            is_active: self.is_active,
        }
    }

    fn write_payload(&self, payload: &mut QueryPayload) {
        self.page.write_payload(payload);
        payload
            .wire("type", self.contact_type)
            .text("department", self.department.as_deref())
            .flag("isActive", self.is_active);
    }

    fn page_params(&self) -> &PageParams {
        &self.page
    }
}
