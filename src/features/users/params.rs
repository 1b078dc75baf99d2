use serde::Deserialize;

use crate::features::auth::model::UserRole;
use crate::shared::constants::USERS_PAGE_SIZE;
use crate::shared::params::{loose_bool_opt, loose_wire, PageParams, QueryParams, QueryPayload};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserParams {
    #[serde(flatten)]
    pub page: PageParams,
    #[serde(default, deserialize_with = "loose_wire")]
    pub role: Option<UserRole>,
    #[serde(default, deserialize_with = "loose_bool_opt")]
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "loose_bool_opt")]
    pub verified: Option<bool>,
}

impl UserParams {
    pub fn role(role: UserRole) -> Self {
        Self {
            role: Some(role),
            ..Default::default()
        }
    }
}

impl QueryParams for UserParams {
    const DEFAULT_LIMIT: u32 = USERS_PAGE_SIZE;

    fn normalized(&self) -> Self {
        Self {
            page: self.page.normalized(Self::DEFAULT_LIMIT),
            ..self.clone()
        }
    }

    fn write_payload(&self, payload: &mut QueryPayload) {
        self.page.write_payload(payload);
        payload
            .wire("role", self.role)
            .flag("isActive", self.is_active)
            .flag("verified", self.verified);
    }

    fn page_params(&self) -> &PageParams {
        &self.page
    }
}
