use std::sync::Arc;

use chrono::{NaiveTime, Utc};

use crate::core::error::Result;
use crate::core::resource::ResourceService;
use crate::features::events::model::{Event, EventFlag};
use crate::features::events::params::EventParams;
use crate::shared::params::{PageParams, SortOrder};
use crate::shared::types::Paginated;

pub type EventService = ResourceService<Event>;

impl ResourceService<Event> {
    pub async fn get_by_slug(&self, slug: &str) -> Result<Arc<Option<Event>>> {
        self.get(slug).await
    }

    /// Public events starting today or later, soonest first.
    ///
    /// The backend is asked for `upcoming=true`; anything it still returns
    /// from the past is dropped here.
    pub async fn upcoming(&self, limit: u32) -> Result<Paginated<Event>> {
        let params = EventParams {
            page: PageParams {
                sort_by: Some("startDate".to_string()),
                sort_order: Some(SortOrder::Asc),
                ..PageParams::new(1, limit)
            },
            is_public: Some(true),
            upcoming: Some(true),
            ..Default::default()
        };
        let page = self.list(&params).await?;

        let today = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
        let data: Vec<Event> = page
            .data
            .iter()
            .filter(|e| e.end_date.unwrap_or(e.start_date) >= today)
            .cloned()
            .collect();

        if data.len() < page.data.len() {
            tracing::debug!(
                "Dropped {} past events from upcoming list",
                page.data.len() - data.len()
            );
        }
        Ok(Paginated {
            data,
            meta: page.meta,
        })
    }

    pub async fn set_featured(&self, id: &str, featured: bool) -> Result<Option<Event>> {
        self.set_flag(id, EventFlag::Featured, featured).await
    }

    pub async fn set_public(&self, id: &str, public: bool) -> Result<Option<Event>> {
        self.set_flag(id, EventFlag::Public, public).await
    }
}
