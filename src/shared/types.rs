use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::shared::json::{self, JsonObject};

// =============================================================================
// PAGINATION
// =============================================================================

/// One page of a list query: the normalized entities plus pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total: u32,
    pub page: u32,
    pub limit: u32,
    pub total_pages: Option<u32>,
}

impl PaginationMeta {
    /// Metadata for a page whose backend did not report any
    pub fn synthesized(len: usize, page: u32, limit: u32) -> Self {
        Self::from_parts(len as u32, page, limit, None)
    }

    fn from_parts(total: u32, page: u32, limit: u32, total_pages: Option<u32>) -> Self {
        let total_pages = total_pages.or_else(|| {
            if limit == 0 {
                None
            } else {
                Some(total.div_ceil(limit))
            }
        });
        Self {
            total,
            page: page.max(1),
            limit,
            total_pages,
        }
    }

    /// Parse metadata, accepting the several spellings the backend has used.
    /// `total` never drops below the number of entities actually returned.
    pub fn from_json(meta: &JsonObject, len: usize, page: u32, limit: u32) -> Self {
        let total = json::u32_or(meta, &["total", "totalItems", "totalCount", "count"], 0)
            .max(len as u32);
        let page = json::u32_or(meta, &["page", "currentPage"], page);
        let limit = json::u32_or(meta, &["limit", "perPage", "pageSize"], limit);
        let total_pages = json::opt_u32(meta, &["totalPages", "pages", "lastPage"]);
        Self::from_parts(total, page, limit, total_pages)
    }

    pub fn has_next_page(&self) -> bool {
        self.total_pages.is_some_and(|pages| self.page < pages)
    }
}

impl<T> Paginated<T> {
    pub fn empty(page: u32, limit: u32) -> Self {
        Self {
            data: Vec::new(),
            meta: PaginationMeta::synthesized(0, page, limit),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Where a resource's list response may keep its entities and metadata
#[derive(Debug, Clone, Copy)]
pub struct ListShape {
    pub list_keys: &'static [&'static str],
    pub meta_keys: &'static [&'static str],
}

/// Normalize a list response body into a page of entities.
///
/// An unlocatable array yields an empty page rather than an error. Items that
/// are not objects or fail `parse` are skipped.
pub fn normalize_list<T>(
    body: &Value,
    shape: ListShape,
    page: u32,
    limit: u32,
    parse: impl Fn(&JsonObject) -> Option<T>,
) -> Paginated<T> {
    let Some(items) = json::locate_list(body, shape.list_keys) else {
        tracing::warn!(
            "List payload has no array under {:?} or generic keys; treating as empty",
            shape.list_keys
        );
        return Paginated::empty(page, limit);
    };

    let data: Vec<T> = items
        .iter()
        .filter_map(Value::as_object)
        .filter_map(&parse)
        .collect();

    let meta = match json::locate_meta(body, shape.meta_keys) {
        Some(meta) => PaginationMeta::from_json(meta, data.len(), page, limit),
        None => PaginationMeta::synthesized(data.len(), page, limit),
    };

    Paginated { data, meta }
}

// =============================================================================
// GEO
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Coordinates under `keys` as `{lat, lng}`, `{latitude, longitude}`,
    /// `[lat, lng]` or `"lat,lng"`, else flat `latitude`/`longitude` fields.
    /// Out-of-range pairs are dropped.
    pub fn from_json(obj: &JsonObject, keys: &[&str]) -> Option<Self> {
        let nested = json::field(obj, keys).and_then(|value| match value {
            Value::Object(o) => Self::from_pair(
                json::opt_f64(o, &["lat", "latitude"]),
                json::opt_f64(o, &["lng", "lon", "longitude"]),
            ),
            Value::Array(items) if items.len() == 2 => Self::from_pair(
                json::loose_f64(&items[0]),
                json::loose_f64(&items[1]),
            ),
            Value::String(s) => {
                let mut parts = s.split(',').map(|p| p.trim().parse::<f64>().ok());
                Self::from_pair(parts.next().flatten(), parts.next().flatten())
            }
            _ => None,
        });

        nested.or_else(|| {
            Self::from_pair(
                json::opt_f64(obj, &["latitude", "lat"]),
                json::opt_f64(obj, &["longitude", "lng"]),
            )
        })
    }

    fn from_pair(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        let (lat, lng) = (lat?, lng?);
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Some(Self { lat, lng })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SHAPE: ListShape = ListShape {
        list_keys: &["posts"],
        meta_keys: &["pagination"],
    };

    fn parse_id(o: &JsonObject) -> Option<String> {
        json::id(o)
    }

    #[test]
    fn test_resource_keys() {
        let body = json!({
            "posts": [{"id": "a"}, {"id": "b"}],
            "pagination": {"total": 20, "page": 2, "limit": 2, "totalPages": 10}
        });
        let page = normalize_list(&body, SHAPE, 1, 9, parse_id);
        assert_eq!(page.data, vec!["a", "b"]);
        assert_eq!(
            page.meta,
            PaginationMeta {
                total: 20,
                page: 2,
                limit: 2,
                total_pages: Some(10)
            }
        );
        assert!(page.meta.has_next_page());
    }

    #[test]
    fn test_generic_keys_and_computed_pages() {
        let body = json!({"data": [{"id": 1}], "meta": {"total": 19, "page": 1, "limit": 9}});
        let page = normalize_list(&body, SHAPE, 1, 9, parse_id);
        assert_eq!(page.data, vec!["1"]);
        assert_eq!(page.meta.total_pages, Some(3));
    }

    #[test]
    fn test_total_never_below_len() {
        let body = json!({"data": [{"id": 1}, {"id": 2}], "meta": {"total": 0}});
        let page = normalize_list(&body, SHAPE, 1, 9, parse_id);
        assert_eq!(page.meta.total, 2);
    }

    #[test]
    fn test_missing_meta_is_synthesized() {
        let body = json!([{"id": 1}, "garbage", {"title": "no id"}]);
        let page = normalize_list(&body, SHAPE, 3, 9, parse_id);
        assert_eq!(page.len(), 1);
        assert_eq!(page.meta.page, 3);
        assert_eq!(page.meta.total, 1);
    }

    #[test]
    fn test_unlocatable_list_is_empty() {
        let page = normalize_list(&json!({"message": "ok"}), SHAPE, 1, 9, parse_id);
        assert!(page.is_empty());
        assert_eq!(page.meta.total, 0);
        assert_eq!(page.meta.total_pages, Some(0));
    }

    #[test]
    fn test_coordinates_shapes() {
        let expected = Some(Coordinates { lat: -7.25, lng: 110.4 });
        let cases = [
            json!({"coordinates": {"lat": -7.25, "lng": 110.4}}),
            json!({"coordinates": {"latitude": "-7.25", "longitude": "110.4"}}),
            json!({"coordinates": [-7.25, 110.4]}),
            json!({"coordinates": "-7.25, 110.4"}),
            json!({"latitude": -7.25, "longitude": 110.4}),
        ];
        for case in cases {
            let obj = case.as_object().unwrap();
            assert_eq!(Coordinates::from_json(obj, &["coordinates"]), expected, "{}", case);
        }
    }

    #[test]
    fn test_coordinates_out_of_range() {
        let body = json!({"coordinates": {"lat": 123.0, "lng": 0.0}});
        assert_eq!(Coordinates::from_json(body.as_object().unwrap(), &["coordinates"]), None);
    }
}
