use std::sync::Arc;

use crate::core::error::Result;
use crate::core::resource::ResourceService;
use crate::features::service_guides::model::{ServiceGuide, ServiceGuideFlag};

pub type ServiceGuideService = ResourceService<ServiceGuide>;

impl ResourceService<ServiceGuide> {
    pub async fn get_by_slug(&self, slug: &str) -> Result<Arc<Option<ServiceGuide>>> {
        self.get(slug).await
    }

    pub async fn set_active(&self, id: &str, active: bool) -> Result<Option<ServiceGuide>> {
        self.set_flag(id, ServiceGuideFlag::Active, active).await
    }

    pub async fn set_featured(&self, id: &str, featured: bool) -> Result<Option<ServiceGuide>> {
        self.set_flag(id, ServiceGuideFlag::Featured, featured).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::UserRole;
    use crate::features::service_guides::dtos::UpdateServiceGuideDto;
    use crate::shared::test_helpers::TestContext;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_update_by_id_invalidates_slug_entry() {
        let server = MockServer::start();
        let ctx = TestContext::signed_in(&server, UserRole::Editor).await;
        let service = ServiceGuideService::new(ctx.api.clone());

        let by_slug = server.mock(|when, then| {
            when.method(GET).path("/service-guides/pembuatan-ktp");
            then.status(200).json_body(json!({
                "data": {"id": "g1", "slug": "pembuatan-ktp", "title": "Pembuatan KTP"}
            }));
        });
        let update = server.mock(|when, then| {
            when.method(PATCH)
                .path("/service-guides/g1")
                .json_body(json!({"title": "Pembuatan KTP-el"}));
            then.status(200).json_body(json!({
                "data": {"id": "g1", "slug": "pembuatan-ktp", "title": "Pembuatan KTP-el"}
            }));
        });

        service.get_by_slug("pembuatan-ktp").await.unwrap();
        let dto = UpdateServiceGuideDto {
            title: Some("Pembuatan KTP-el".into()),
            ..Default::default()
        };
        let updated = service.update("g1", &dto).await.unwrap().unwrap();
        assert_eq!(updated.title, "Pembuatan KTP-el");
        update.assert_calls(1);

        service.get_by_slug("pembuatan-ktp").await.unwrap();
        by_slug.assert_calls(2);
    }
}
