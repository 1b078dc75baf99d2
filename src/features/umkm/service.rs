use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::Value;

use crate::core::error::Result;
use crate::core::resource::ResourceService;
use crate::features::umkm::model::{Umkm, UmkmFlag};
use crate::shared::params::QueryPayload;

pub type UmkmService = ResourceService<Umkm>;

impl ResourceService<Umkm> {
    pub async fn get_by_slug(&self, slug: &str) -> Result<Arc<Option<Umkm>>> {
        self.get(slug).await
    }

    /// Distinct category names in use, sorted
    pub async fn categories(&self) -> Result<Arc<Vec<String>>> {
        self.custom(
            "categories",
            "/umkm/categories".to_string(),
            QueryPayload::default(),
            parse_categories,
        )
        .await
    }

    pub async fn set_verified(&self, id: &str, verified: bool) -> Result<Option<Umkm>> {
        self.set_flag(id, UmkmFlag::Verified, verified).await
    }

    pub async fn set_featured(&self, id: &str, featured: bool) -> Result<Option<Umkm>> {
        self.set_flag(id, UmkmFlag::Featured, featured).await
    }

    pub async fn set_active(&self, id: &str, active: bool) -> Result<Option<Umkm>> {
        self.set_flag(id, UmkmFlag::Active, active).await
    }
}

/// `["A", ...]`, `{"categories": [...]}` or `{"data": [...]}`; items may be
/// strings or `{name}` / `{category}` objects
fn parse_categories(body: &Value) -> Vec<String> {
    let items = match body {
        Value::Array(items) => Some(items),
        Value::Object(obj) => ["categories", "data"]
            .iter()
            .filter_map(|k| obj.get(*k))
            .find_map(|v| match v {
                Value::Object(inner) => inner.get("categories").and_then(Value::as_array),
                other => other.as_array(),
            }),
        _ => None,
    };

    let unique: BTreeSet<String> = items
        .into_iter()
        .flatten()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Object(o) => ["name", "category"]
                .iter()
                .find_map(|k| o.get(*k).and_then(Value::as_str))
                .map(|s| s.trim().to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect();
    unique.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::UserRole;
    use crate::features::umkm::params::UmkmParams;
    use crate::shared::test_helpers::TestContext;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_parse_categories_shapes() {
        let expected = vec!["Kerajinan".to_string(), "Makanan".to_string()];
        assert_eq!(parse_categories(&json!(["Makanan", "Kerajinan", "Makanan", ""])), expected);
        assert_eq!(
            parse_categories(&json!({"data": [{"name": "Kerajinan"}, {"category": "Makanan"}]})),
            expected
        );
        assert_eq!(
            parse_categories(&json!({"data": {"categories": ["Makanan", " Kerajinan "]}})),
            expected
        );
        assert!(parse_categories(&json!({"message": "ok"})).is_empty());
    }

    #[tokio::test]
    async fn test_categories_are_cached() {
        let server = MockServer::start();
        let ctx = TestContext::anonymous(&server).await;
        let service = UmkmService::new(ctx.api.clone());

        let mock = server.mock(|when, then| {
            when.method(GET).path("/umkm/categories");
            then.status(200).json_body(json!({"categories": ["Makanan", "Jasa"]}));
        });

        let first = service.categories().await.unwrap();
        let second = service.categories().await.unwrap();
        assert_eq!(*first, vec!["Jasa", "Makanan"]);
        assert!(Arc::ptr_eq(&first, &second));
        mock.assert_calls(1);
    }

    #[tokio::test]
    async fn test_featured_toggle_invalidates_list_and_detail() {
        let server = MockServer::start();
        let ctx = TestContext::signed_in(&server, UserRole::Admin).await;
        let service = UmkmService::new(ctx.api.clone());

        let list = server.mock(|when, then| {
            when.method(GET).path("/umkm");
            then.status(200).json_body(json!({
                "data": [{"id": "u1", "name": "Warung Bu Tini", "featured": false}],
                "meta": {"total": 1, "page": 1, "limit": 12, "totalPages": 1}
            }));
        });
        let detail = server.mock(|when, then| {
            when.method(GET).path("/umkm/u1");
            then.status(200)
                .json_body(json!({"data": {"id": "u1", "name": "Warung Bu Tini", "featured": false}}));
        });
        let toggle = server.mock(|when, then| {
            when.method(PATCH)
                .path("/umkm/u1/feature")
                .header("authorization", format!("Bearer {}", ctx.token))
                .json_body(json!({"featured": true}));
            then.status(200)
                .json_body(json!({"data": {"id": "u1", "name": "Warung Bu Tini", "featured": true}}));
        });

        let params = UmkmParams::default();
        let before = service.list(&params).await.unwrap();
        assert!(!before.data[0].featured);
        service.get("u1").await.unwrap();

        let mutation = service.flag_mutation();
        let updated = mutation
            .mutate_async(("u1".into(), UmkmFlag::Featured, true))
            .await
            .unwrap()
            .unwrap();
        assert!(updated.featured);
        toggle.assert_calls(1);

        service.list(&params).await.unwrap();
        service.get("u1").await.unwrap();
        list.assert_calls(2);
        detail.assert_calls(2);
    }

    #[tokio::test]
    async fn test_unrelated_lists_survive_detail_fetch() {
        let server = MockServer::start();
        let ctx = TestContext::anonymous(&server).await;
        let service = UmkmService::new(ctx.api.clone());

        let list = server.mock(|when, then| {
            when.method(GET).path("/umkm").query_param("category", "Makanan");
            then.status(200).json_body(json!({"umkm": [{"id": "u1"}]}));
        });
        let _detail = server.mock(|when, then| {
            when.method(GET).path("/umkm/u1");
            then.status(200).json_body(json!({"umkm": {"id": "u1"}}));
        });

        let params = UmkmParams::category("Makanan");
        service.list(&params).await.unwrap();
        service.get("u1").await.unwrap();
        service.list(&params).await.unwrap();
        list.assert_calls(1);
    }
}
