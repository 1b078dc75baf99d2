use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::resource::{Resource, ResourceFlag};
use crate::features::events::dtos::{CreateEventDto, UpdateEventDto};
use crate::features::events::params::EventParams;
use crate::shared::json::{self, JsonObject};
use crate::shared::types::{Coordinates, ListShape};
use crate::shared::wire::{wire_enum, WireEnum};

wire_enum! {
    pub enum EventCategory {
        Rapat => "RAPAT",
        GotongRoyong => "GOTONG_ROYONG",
        Keagamaan => "KEAGAMAAN",
        Olahraga => "OLAHRAGA",
        Kesenian => "KESENIAN",
        Pendidikan => "PENDIDIKAN",
        Kesehatan => "KESEHATAN",
        Sosial => "SOSIAL",
        Perayaan => "PERAYAAN",
        Lainnya => "LAINNYA",
    }
}

impl Default for EventCategory {
    fn default() -> Self {
        EventCategory::Lainnya
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub content: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub category: EventCategory,
    pub images: Vec<String>,
    pub is_public: bool,
    pub is_featured: bool,
    pub max_participants: Option<u32>,
    /// Display only; may exceed `max_participants`
    pub current_participants: u32,
    pub registration_required: bool,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub contact_person: Option<String>,
    pub contact_phone: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn is_full(&self) -> bool {
        self.max_participants
            .is_some_and(|max| self.current_participants >= max)
    }

    pub fn remaining_seats(&self) -> Option<u32> {
        self.max_participants
            .map(|max| max.saturating_sub(self.current_participants))
    }

    /// Registration open: required, deadline not passed, seats left
    pub fn accepts_registration(&self, now: DateTime<Utc>) -> bool {
        self.registration_required
            && self.registration_deadline.map_or(true, |d| now <= d)
            && !self.is_full()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlag {
    Featured,
    Public,
}

impl ResourceFlag for EventFlag {
    fn segment(&self) -> &'static str {
        match self {
            EventFlag::Featured => "feature",
            EventFlag::Public => "publish",
        }
    }

    fn field(&self) -> &'static str {
        match self {
            EventFlag::Featured => "isFeatured",
            EventFlag::Public => "isPublic",
        }
    }
}

impl Resource for Event {
    const NAME: &'static str = "events";
    const PATH: &'static str = "/events";
    const LIST_SHAPE: ListShape = ListShape {
        list_keys: &["events"],
        meta_keys: &["pagination"],
    };
    const SINGULAR_KEYS: &'static [&'static str] = &["event"];

    type Params = EventParams;
    type Flag = EventFlag;
    type CreateDto = CreateEventDto;
    type UpdateDto = UpdateEventDto;

    fn from_json(obj: &JsonObject) -> Option<Self> {
        let id = json::id(obj)?;

        let mut images = json::string_list(obj, &["images", "gallery"]);
        if images.is_empty() {
            images.extend(json::non_empty_string(obj, &["coverImage", "image"]));
        }

        Some(Self {
            id,
            title: json::string_or_default(obj, &["title", "name"]),
            slug: json::string_or_default(obj, &["slug"]),
            description: json::string_or_default(obj, &["description"]),
            content: json::non_empty_string(obj, &["content"]),
            start_date: json::datetime(obj, &["startDate", "date", "start_date"]).unwrap_or_default(),
            end_date: json::datetime(obj, &["endDate", "end_date"]),
            start_time: json::non_empty_string(obj, &["startTime", "time"]),
            end_time: json::non_empty_string(obj, &["endTime"]),
            location: json::non_empty_string(obj, &["location", "venue"]),
            address: json::non_empty_string(obj, &["address"]),
            coordinates: Coordinates::from_json(obj, &["coordinates", "geo"]),
            category: json::string(obj, &["category"])
                .and_then(|c| EventCategory::from_wire(&c))
                .unwrap_or_default(),
            images,
            is_public: json::bool_or(obj, &["isPublic", "public"], true),
            is_featured: json::bool_or(obj, &["isFeatured", "featured"], false),
            max_participants: json::opt_u32(obj, &["maxParticipants", "capacity"]).filter(|m| *m > 0),
            current_participants: json::u32_or(obj, &["currentParticipants", "participants"], 0),
            registration_required: json::bool_or(obj, &["registrationRequired"], false),
            registration_deadline: json::datetime(obj, &["registrationDeadline"]),
            contact_person: json::non_empty_string(obj, &["contactPerson"]),
            contact_phone: json::non_empty_string(obj, &["contactPhone"]),
            tags: json::string_list(obj, &["tags"]),
            created_at: json::datetime(obj, &["createdAt", "created_at"]).unwrap_or_default(),
            updated_at: json::datetime(obj, &["updatedAt", "updated_at"]).unwrap_or_default(),
        })
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn slug(&self) -> Option<&str> {
        Some(self.slug.as_str()).filter(|s| !s.is_empty())
    }
}
