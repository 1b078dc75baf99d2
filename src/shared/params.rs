//! Building blocks for list-query parameter normalization.
//!
//! Every resource's params struct goes through two stages:
//! `normalized()` fills defaults and folds blank filters to `None` while keeping
//! real types, and `to_payload()` renders the backend query string with empty
//! entries dropped and booleans stringified. The payload is a `BTreeMap`, so two
//! independently built but equal parameter sets produce the same cache key.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::error::{AppError, Result};
use crate::shared::constants::{DEFAULT_PAGE, DEFAULT_SORT_BY, MAX_PAGE_SIZE};
use crate::shared::json::{loose_bool, loose_f64};
use crate::shared::wire::WireEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Backend-ready query parameters, ordered by key
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QueryPayload(BTreeMap<String, String>);

impl QueryPayload {
    pub fn text(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.0.insert(key.to_string(), v.to_string());
        }
        self
    }

    pub fn number(&mut self, key: &str, value: Option<u32>) -> &mut Self {
        if let Some(v) = value {
            self.0.insert(key.to_string(), v.to_string());
        }
        self
    }

    /// Booleans become `"true"`/`"false"` only here, at the wire boundary
    pub fn flag(&mut self, key: &str, value: Option<bool>) -> &mut Self {
        if let Some(v) = value {
            self.0.insert(key.to_string(), v.to_string());
        }
        self
    }

    pub fn wire<E: WireEnum>(&mut self, key: &str, value: Option<E>) -> &mut Self {
        if let Some(v) = value {
            self.0.insert(key.to_string(), v.as_str().to_string());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

/// A resource's list-query parameters
pub trait QueryParams:
    Clone + Default + PartialEq + std::fmt::Debug + DeserializeOwned + Send + Sync + 'static
{
    /// Page size when the caller does not set one
    const DEFAULT_LIMIT: u32;

    /// Fully defaulted copy; applying it twice changes nothing
    fn normalized(&self) -> Self;

    /// Append this (already normalized) set's entries to `payload`
    fn write_payload(&self, payload: &mut QueryPayload);

    fn page_params(&self) -> &PageParams;

    fn to_payload(&self) -> QueryPayload {
        let mut payload = QueryPayload::default();
        self.normalized().write_payload(&mut payload);
        payload
    }

    /// `(page, limit)` after defaults
    fn page_and_limit(&self) -> (u32, u32) {
        let page = self.page_params().normalized(Self::DEFAULT_LIMIT);
        (
            page.page.unwrap_or(DEFAULT_PAGE),
            page.limit.unwrap_or(Self::DEFAULT_LIMIT),
        )
    }

    /// Parse user-controlled, loosely typed filter state
    fn from_value(value: &Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(value.clone())
            .map_err(|e| AppError::Validation(format!("Invalid query parameters: {}", e)))
    }
}

/// Pagination, free-text search and ordering, shared by every list query
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    #[serde(default, deserialize_with = "loose_u32")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "loose_u32")]
    pub limit: Option<u32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub sort_by: Option<String>,
    #[serde(default, deserialize_with = "loose_sort_order")]
    pub sort_order: Option<SortOrder>,
}

impl PageParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Default::default()
        }
    }

    pub fn normalized(&self, default_limit: u32) -> Self {
        Self {
            page: Some(self.page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE)),
            limit: Some(
                self.limit
                    .filter(|l| *l > 0)
                    .unwrap_or(default_limit)
                    .min(MAX_PAGE_SIZE),
            ),
            search: blank(self.search.as_deref()),
            sort_by: Some(
                blank(self.sort_by.as_deref()).unwrap_or_else(|| DEFAULT_SORT_BY.to_string()),
            ),
            sort_order: Some(self.sort_order.unwrap_or_default()),
        }
    }

    pub fn write_payload(&self, payload: &mut QueryPayload) {
        payload
            .number("page", self.page)
            .number("limit", self.limit)
            .text("search", self.search.as_deref())
            .text("sortBy", self.sort_by.as_deref())
            .text("sortOrder", self.sort_order.map(|o| o.as_str()));
    }
}

/// Trimmed value, or `None` for blank input
pub fn blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

// =============================================================================
// LOOSE DESERIALIZERS
// =============================================================================

pub fn loose_u32<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Option<u32>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value
        .as_ref()
        .and_then(loose_f64)
        .filter(|n| n.is_finite() && *n >= 1.0)
        .map(|n| n as u32))
}

pub fn blank_as_none<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::String(s)) => blank(Some(&s)),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

pub fn loose_bool_opt<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<bool>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(value.as_ref().and_then(loose_bool))
}

/// Unknown or blank enum strings mean "no filter"
pub fn loose_wire<'de, D, E>(d: D) -> std::result::Result<Option<E>, D::Error>
where
    D: Deserializer<'de>,
    E: WireEnum,
{
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::String(s)) => E::from_wire(&s),
        _ => None,
    })
}

fn loose_sort_order<'de, D: Deserializer<'de>>(
    d: D,
) -> std::result::Result<Option<SortOrder>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        },
        _ => None,
    })
}
