use serde::Deserialize;

use crate::features::posts::model::{PostCategory, PostStatus};
use crate::shared::constants::POSTS_PAGE_SIZE;
use crate::shared::params::{
    blank, blank_as_none, loose_bool_opt, loose_wire, PageParams, QueryParams, QueryPayload,
};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostParams {
    #[serde(flatten)]
    pub page: PageParams,
    #[serde(default, deserialize_with = "loose_wire")]
    pub category: Option<PostCategory>,
    #[serde(default, deserialize_with = "loose_wire")]
    pub status: Option<PostStatus>,
    #[serde(default, deserialize_with = "loose_bool_opt")]
    pub featured: Option<bool>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub tag: Option<String>,
}

impl PostParams {
    pub fn page(page: u32) -> Self {
        Self {
            page: PageParams {
                page: Some(page),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Published posts only, as the public site lists them
    pub fn published() -> Self {
        Self {
            status: Some(PostStatus::Published),
            ..Default::default()
        }
    }
}

impl QueryParams for PostParams {
    const DEFAULT_LIMIT: u32 = POSTS_PAGE_SIZE;

    fn normalized(&self) -> Self {
        Self {
            page: self.page.normalized(Self::DEFAULT_LIMIT),
            category: self.category,
            status: self.status,
            featured: self.featured,
            tag: blank(self.tag.as_deref()),
        }
    }

    fn write_payload(&self, payload: &mut QueryPayload) {
        self.page.write_payload(payload);
        payload
            .wire("category", self.category)
            .wire("status", self.status)
            .flag("featured", self.featured)
            .text("tag", self.tag.as_deref());
    }

    fn page_params(&self) -> &PageParams {
        &self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn expected_default_payload() -> QueryPayload {
        let mut payload = QueryPayload::default();
        payload
            .text("page", Some("1"))
            .text("limit", Some("9"))
            .text("sortBy", Some("createdAt"))
            .text("sortOrder", Some("desc"));
        payload
    }

    #[test]
    fn test_blank_and_null_filters_are_not_sent() {
        let raw = PostParams::from_value(&json!({
            "page": 1,
            "limit": 9,
            "category": "",
            "status": null
        }))
        .unwrap();
        let payload = raw.to_payload();

        assert_eq!(payload, expected_default_payload());
        assert!(!payload.contains_key("category"));
        assert!(!payload.contains_key("status"));
    }

    #[test]
    fn test_empty_filter_equivalence() {
        let a = PostParams::from_value(&json!({"category": ""})).unwrap();
        let b = PostParams::from_value(&json!({"category": null})).unwrap();
        let c = PostParams::from_value(&json!({})).unwrap();
        assert_eq!(a.to_payload(), b.to_payload());
        assert_eq!(b.to_payload(), c.to_payload());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let raw = PostParams::from_value(&json!({
            "page": "2",
            "search": " jalan ",
            "category": "pembangunan",
            "featured": "true",
            "tag": "  "
        }))
        .unwrap();

        let once = raw.normalized();
        assert_eq!(once.normalized(), once);
        assert_eq!(once.to_payload(), raw.to_payload());
        assert_eq!(once.featured, Some(true));
        assert_eq!(once.tag, None);
    }

    #[test]
    fn test_booleans_stringified_only_in_payload() {
        let params = PostParams {
            featured: Some(false),
            ..Default::default()
        };
        assert_eq!(params.normalized().featured, Some(false));
        assert_eq!(params.to_payload().get("featured"), Some("false"));
    }

    #[test]
    fn test_unknown_category_means_no_filter() {
        let params = PostParams::from_value(&json!({"category": "GOSIP"})).unwrap();
        assert_eq!(params.category, None);
    }
}
