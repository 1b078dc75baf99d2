use std::sync::Arc;

use crate::core::error::Result;
use crate::core::resource::{Resource, ResourceService};
use crate::features::village_profile::model::{VillageProfile, VillageProfileFlag};
use crate::features::village_profile::params::VillageProfileParams;
use crate::shared::constants::MAX_PAGE_SIZE;
use crate::shared::params::{PageParams, QueryPayload, SortOrder};

pub type VillageProfileService = ResourceService<VillageProfile>;

impl ResourceService<VillageProfile> {
    /// Section by its key, e.g. `sejarah` or `visi-misi`
    pub async fn section(&self, section: &str) -> Result<Arc<Option<VillageProfile>>> {
        let mut payload = QueryPayload::default();
        payload.text("section", Some(section));
        let path = format!(
            "{}/section/{}",
            VillageProfile::PATH,
            urlencoding::encode(section)
        );
        self.custom("section", path, payload, VillageProfile::from_body)
            .await
    }

    /// Published sections in page order
    pub async fn published_sections(&self) -> Result<Vec<VillageProfile>> {
        let params = VillageProfileParams {
            page: PageParams {
                sort_by: Some("order".to_string()),
                sort_order: Some(SortOrder::Asc),
                ..PageParams::new(1, MAX_PAGE_SIZE)
            },
            is_published: Some(true),
            ..Default::default()
        };
        let page = self.list(&params).await?;

        let mut sections: Vec<VillageProfile> =
            page.data.iter().filter(|p| p.is_published).cloned().collect();
        sections.sort_by_key(|p| p.order);
        Ok(sections)
    }

    pub async fn set_published(&self, id: &str, published: bool) -> Result<Option<VillageProfile>> {
        self.set_flag(id, VillageProfileFlag::Published, published)
            .await
    }
}
