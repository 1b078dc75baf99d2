use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::features::events::model::EventCategory;
use crate::shared::constants::EVENTS_PAGE_SIZE;
use crate::shared::params::{loose_bool_opt, loose_wire, PageParams, QueryParams, QueryPayload};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventParams {
    #[serde(flatten)]
    pub page: PageParams,
    #[serde(default, deserialize_with = "loose_wire")]
    pub category: Option<EventCategory>,
    #[serde(default, deserialize_with = "loose_bool_opt")]
    pub is_public: Option<bool>,
    #[serde(default, deserialize_with = "loose_bool_opt")]
    pub is_featured: Option<bool>,
    /// Only events starting today or later
    #[serde(default, deserialize_with = "loose_bool_opt")]
    pub upcoming: Option<bool>,
    #[serde(default, deserialize_with = "loose_date")]
    pub start_date_from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "loose_date")]
    pub start_date_to: Option<NaiveDate>,
}

impl QueryParams for EventParams {
    const DEFAULT_LIMIT: u32 = EVENTS_PAGE_SIZE;

    fn normalized(&self) -> Self {
        // a reversed range is read as the caller meant it
        let (from, to) = match (self.start_date_from, self.start_date_to) {
            (Some(from), Some(to)) if from > to => (Some(to), Some(from)),
            range => range,
        };

        Self {
            page: self.page.normalized(Self::DEFAULT_LIMIT),
            category: self.category,
            is_public: self.is_public,
            is_featured: self.is_featured,
            // `upcoming=false` is the same as not asking
            upcoming: self.upcoming.filter(|u| *u),
            start_date_from: from,
            start_date_to: to,
        }
    }

    fn write_payload(&self, payload: &mut QueryPayload) {
        self.page.write_payload(payload);
        payload
            .wire("category", self.category)
            .flag("isPublic", self.is_public)
            .flag("isFeatured", self.is_featured)
            .flag("upcoming", self.upcoming)
            .text(
                "startDateFrom",
                self.start_date_from.map(|d| d.to_string()).as_deref(),
            )
            .text(
                "startDateTo",
                self.start_date_to.map(|d| d.to_string()).as_deref(),
            );
    }

    fn page_params(&self) -> &PageParams {
        &self.page
    }
}

/// `YYYY-MM-DD`, or the date part of an ISO timestamp; anything else is no filter
fn loose_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    let value = Option::<Value>::deserialize(d)?;
    Ok(match value {
        Some(Value::String(s)) => {
            let s = s.trim();
            NaiveDate::parse_from_str(s.get(..10).unwrap_or(s), "%Y-%m-%d").ok()
        }
        _ => None,
    })
}
