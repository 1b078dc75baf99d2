//! Field lookup helpers for loosely-shaped backend JSON.
//!
//! The backend renamed fields over its lifetime and wraps payloads in several
//! envelope styles. Every helper takes an ordered list of candidate keys: the
//! first key that yields a usable value wins, so callers list the newest name first.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value};

pub type JsonObject = Map<String, Value>;

/// Keys that commonly carry a list when the resource-specific key is absent
pub const GENERIC_LIST_KEYS: &[&str] = &["data", "items", "results", "rows"];

/// Keys that commonly carry pagination metadata
pub const GENERIC_META_KEYS: &[&str] = &["pagination", "meta"];

/// First non-null value under any of `keys`
pub fn field<'a>(obj: &'a JsonObject, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

/// Entity id, accepting string or numeric ids and the `_id` spelling
pub fn id(obj: &JsonObject) -> Option<String> {
    match field(obj, &["id", "_id"])? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First scalar under `keys`, rendered as a string. Empty strings count as present.
pub fn string(obj: &JsonObject, keys: &[&str]) -> Option<String> {
    keys.iter().filter_map(|k| obj.get(*k)).find_map(scalar_string)
}

/// First non-blank string under `keys`. Used for fallback chains where an
/// empty newer field should yield to a populated older one.
pub fn non_empty_string(obj: &JsonObject, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .filter_map(scalar_string)
        .find(|s| !s.trim().is_empty())
}

pub fn string_or_default(obj: &JsonObject, keys: &[&str]) -> String {
    string(obj, keys).unwrap_or_default()
}

/// Boolean under `keys`, accepting `true`, `"true"`, `1` and `"1"`
pub fn bool_or(obj: &JsonObject, keys: &[&str], default: bool) -> bool {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(loose_bool)
        .unwrap_or(default)
}

pub fn opt_u32(obj: &JsonObject, keys: &[&str]) -> Option<u32> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(loose_f64)
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n as u32)
}

pub fn u32_or(obj: &JsonObject, keys: &[&str], default: u32) -> u32 {
    opt_u32(obj, keys).unwrap_or(default)
}

pub fn i32_or(obj: &JsonObject, keys: &[&str], default: i32) -> i32 {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(loose_f64)
        .filter(|n| n.is_finite())
        .map(|n| n as i32)
        .unwrap_or(default)
}

pub fn opt_f64(obj: &JsonObject, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find_map(loose_f64)
        .filter(|n| n.is_finite())
}

/// Object under any of `keys`
pub fn object<'a>(obj: &'a JsonObject, keys: &[&str]) -> Option<&'a JsonObject> {
    keys.iter().filter_map(|k| obj.get(*k)).find_map(Value::as_object)
}

/// Ordered list of strings under `keys`.
///
/// Accepts a JSON array (of strings, numbers, or objects carrying
/// `url`/`name`/`title`/`value`), a JSON-encoded array inside a string, or a
/// comma/newline separated string.
pub fn string_list(obj: &JsonObject, keys: &[&str]) -> Vec<String> {
    for key in keys {
        match obj.get(*key) {
            Some(Value::Array(items)) => {
                return items.iter().filter_map(list_item_string).collect();
            }
            Some(Value::String(s)) if !s.trim().is_empty() => return split_string_list(s),
            _ => continue,
        }
    }
    Vec::new()
}

/// Timestamp under `keys`. Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DD`, and epoch milliseconds.
pub fn datetime(obj: &JsonObject, keys: &[&str]) -> Option<DateTime<Utc>> {
    keys.iter().filter_map(|k| obj.get(*k)).find_map(parse_datetime)
}

pub fn parse_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(Utc.from_utc_datetime(&naive));
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                return Some(Utc.from_utc_datetime(&naive));
            }
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|naive| Utc.from_utc_datetime(&naive))
        }
        Value::Number(n) => n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn loose_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub(crate) fn loose_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn list_item_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(o) => non_empty_string(o, &["url", "name", "title", "value", "text"]),
        _ => None,
    }
}

fn split_string_list(s: &str) -> Vec<String> {
    let trimmed = s.trim();
    if trimmed.starts_with('[') {
        if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(trimmed) {
            return items.iter().filter_map(list_item_string).collect();
        }
    }

    let separator = if trimmed.contains('\n') { '\n' } else { ',' };
    trimmed
        .split(separator)
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

// =============================================================================
// ENVELOPE LOOKUP
// =============================================================================

/// Locate the entity array in a list response.
///
/// Tries the body itself, then each of `list_keys`, then the generic keys. An
/// object found under a key is searched one level deeper, which covers
/// `{ data: { posts: [...] } }`.
pub fn locate_list<'a>(body: &'a Value, list_keys: &[&str]) -> Option<&'a Vec<Value>> {
    if let Value::Array(items) = body {
        return Some(items);
    }
    let obj = body.as_object()?;

    for key in list_keys.iter().chain(GENERIC_LIST_KEYS) {
        match obj.get(*key) {
            Some(Value::Array(items)) => return Some(items),
            Some(Value::Object(inner)) => {
                for inner_key in list_keys.iter().chain(GENERIC_LIST_KEYS) {
                    if let Some(Value::Array(items)) = inner.get(*inner_key) {
                        return Some(items);
                    }
                }
            }
            _ => {}
        }
    }
    None
}

/// Locate pagination metadata in a list response.
///
/// Looks under `meta_keys` at the top level and inside `data`, and finally
/// accepts a flat body that carries `total` next to the list.
pub fn locate_meta<'a>(body: &'a Value, meta_keys: &[&str]) -> Option<&'a JsonObject> {
    let obj = body.as_object()?;

    for key in meta_keys.iter().chain(GENERIC_META_KEYS) {
        if let Some(Value::Object(meta)) = obj.get(*key) {
            return Some(meta);
        }
    }

    if let Some(Value::Object(data)) = obj.get("data") {
        for key in meta_keys.iter().chain(GENERIC_META_KEYS) {
            if let Some(Value::Object(meta)) = data.get(*key) {
                return Some(meta);
            }
        }
        if data.contains_key("total") {
            return Some(data);
        }
    }

    if obj.contains_key("total") {
        return Some(obj);
    }
    None
}

/// Locate a single entity in a detail response.
///
/// Order: `{singular: {...}}`, `{data: {singular: {...}}}`, `{data: {...id}}`,
/// and finally the body itself when it carries an `id`.
pub fn locate_entity<'a>(body: &'a Value, singular_keys: &[&str]) -> Option<&'a JsonObject> {
    let obj = body.as_object()?;

    if let Some(found) = object(obj, singular_keys) {
        return Some(found);
    }

    if let Some(Value::Object(data)) = obj.get("data") {
        if let Some(found) = object(data, singular_keys) {
            return Some(found);
        }
        if id(data).is_some() {
            return Some(data);
        }
    }

    if id(obj).is_some() {
        return Some(obj);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> JsonObject {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_fallback_prefers_newer_key() {
        let o = obj(json!({"coverImage": "new.jpg", "image": "old.jpg"}));
        assert_eq!(
            non_empty_string(&o, &["coverImage", "image"]),
            Some("new.jpg".to_string())
        );

        let o = obj(json!({"coverImage": "", "image": "old.jpg"}));
        assert_eq!(
            non_empty_string(&o, &["coverImage", "image"]),
            Some("old.jpg".to_string())
        );
    }

    #[test]
    fn test_string_keeps_empty_value() {
        let o = obj(json!({"excerpt": ""}));
        assert_eq!(string(&o, &["excerpt"]), Some(String::new()));
        assert_eq!(string(&o, &["summary"]), None);
    }

    #[test]
    fn test_loose_scalars() {
        let o = obj(json!({"a": "true", "b": 0, "c": "12", "d": -3, "e": "4.5"}));
        assert!(bool_or(&o, &["a"], false));
        assert!(!bool_or(&o, &["b"], true));
        assert!(bool_or(&o, &["missing"], true));
        assert_eq!(u32_or(&o, &["c"], 0), 12);
        assert_eq!(opt_u32(&o, &["d"]), None);
        assert_eq!(i32_or(&o, &["d"], 0), -3);
        assert_eq!(opt_f64(&o, &["e"]), Some(4.5));
    }

    #[test]
    fn test_string_list_shapes() {
        let o = obj(json!({
            "tags": ["desa", " ", 2024],
            "images": [{"url": "a.jpg"}, {"url": "b.jpg"}],
            "steps": "Datang ke kantor desa\nIsi formulir\n",
            "docs": "KTP, KK",
            "encoded": "[\"x\",\"y\"]"
        }));
        assert_eq!(string_list(&o, &["tags"]), vec!["desa", "2024"]);
        assert_eq!(string_list(&o, &["images"]), vec!["a.jpg", "b.jpg"]);
        assert_eq!(
            string_list(&o, &["steps"]),
            vec!["Datang ke kantor desa", "Isi formulir"]
        );
        assert_eq!(string_list(&o, &["docs"]), vec!["KTP", "KK"]);
        assert_eq!(string_list(&o, &["encoded"]), vec!["x", "y"]);
        assert!(string_list(&o, &["missing"]).is_empty());
    }

    #[test]
    fn test_datetime_formats() {
        let o = obj(json!({
            "a": "2024-08-17T08:00:00.000Z",
            "b": "2024-08-17 08:00:00",
            "c": "2024-08-17",
            "d": 1723881600000i64
        }));
        let expected = Utc.with_ymd_and_hms(2024, 8, 17, 8, 0, 0).unwrap();
        assert_eq!(datetime(&o, &["a"]), Some(expected));
        assert_eq!(datetime(&o, &["b"]), Some(expected));
        assert_eq!(
            datetime(&o, &["c"]),
            Some(Utc.with_ymd_and_hms(2024, 8, 17, 0, 0, 0).unwrap())
        );
        assert_eq!(
            datetime(&o, &["d"]),
            Some(Utc.with_ymd_and_hms(2024, 8, 17, 8, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_locate_list_variants() {
        let a = json!({"posts": [{"id": 1}], "pagination": {"total": 1}});
        let b = json!({"data": [{"id": 1}, {"id": 2}], "meta": {"total": 2}});
        let c = json!({"data": {"posts": [{"id": 1}]}});
        let d = json!([{"id": 1}]);
        let e = json!({"message": "ok"});

        assert_eq!(locate_list(&a, &["posts"]).map(Vec::len), Some(1));
        assert_eq!(locate_list(&b, &["posts"]).map(Vec::len), Some(2));
        assert_eq!(locate_list(&c, &["posts"]).map(Vec::len), Some(1));
        assert_eq!(locate_list(&d, &["posts"]).map(Vec::len), Some(1));
        assert!(locate_list(&e, &["posts"]).is_none());
    }

    #[test]
    fn test_locate_meta_variants() {
        let a = json!({"posts": [], "pagination": {"total": 7}});
        let b = json!({"data": {"items": [], "meta": {"total": 3}}});
        let c = json!({"data": [], "total": 5, "page": 1});
        assert_eq!(locate_meta(&a, &[]).and_then(|m| m.get("total")), Some(&json!(7)));
        assert_eq!(locate_meta(&b, &[]).and_then(|m| m.get("total")), Some(&json!(3)));
        assert_eq!(locate_meta(&c, &[]).and_then(|m| m.get("total")), Some(&json!(5)));
        assert!(locate_meta(&json!({"data": []}), &[]).is_none());
    }

    #[test]
    fn test_locate_entity_variants() {
        let a = json!({"message": "ok", "post": {"id": "p1"}});
        let b = json!({"data": {"post": {"id": "p2"}}});
        let c = json!({"data": {"id": "p3"}});
        let d = json!({"id": "p4", "title": "T"});
        let e = json!({"message": "ok"});

        let get = |v: &Value| locate_entity(v, &["post"]).and_then(id);
        assert_eq!(get(&a), Some("p1".to_string()));
        assert_eq!(get(&b), Some("p2".to_string()));
        assert_eq!(get(&c), Some("p3".to_string()));
        assert_eq!(get(&d), Some("p4".to_string()));
        assert_eq!(get(&e), None);
    }
}
