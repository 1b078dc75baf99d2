use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::features::events::model::EventCategory;
use crate::shared::types::Coordinates;

/// Request DTO for creating an event
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_dates"))]
pub struct CreateEventDto {
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    pub start_date: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    #[validate(regex(
        path = "*crate::shared::validation::TIME_REGEX",
        message = "Start time must be HH:MM"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[validate(regex(
        path = "*crate::shared::validation::TIME_REGEX",
        message = "End time must be HH:MM"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    pub category: EventCategory,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default = "default_true")]
    pub is_public: bool,

    #[serde(default)]
    pub is_featured: bool,

    #[validate(range(min = 1, message = "Max participants must be at least 1"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,

    #[serde(default)]
    pub registration_required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "Contact phone must be an Indonesian mobile number"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request DTO for a partial event update
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_dates"))]
pub struct UpdateEventDto {
    #[validate(length(min = 3, max = 200, message = "Title must be 3-200 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    #[validate(regex(
        path = "*crate::shared::validation::TIME_REGEX",
        message = "Start time must be HH:MM"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[validate(regex(
        path = "*crate::shared::validation::TIME_REGEX",
        message = "End time must be HH:MM"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<EventCategory>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,

    #[validate(range(min = 1, message = "Max participants must be at least 1"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person: Option<String>,

    #[validate(regex(
        path = "*crate::shared::validation::PHONE_REGEX",
        message = "Contact phone must be an Indonesian mobile number"
    ))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

fn default_true() -> bool {
    true
}

fn range_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn check_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(range_error(
            "date_range",
            "End date must not be before start date",
        )),
        _ => Ok(()),
    }
}

fn validate_create_dates(dto: &CreateEventDto) -> Result<(), ValidationError> {
    check_range(Some(dto.start_date), dto.end_date)?;
    match dto.registration_deadline {
        Some(deadline) if deadline > dto.start_date => Err(range_error(
            "registration_deadline",
            "Registration must close before the event starts",
        )),
        _ => Ok(()),
    }
}

fn validate_update_dates(dto: &UpdateEventDto) -> Result<(), ValidationError> {
    check_range(dto.start_date, dto.end_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> CreateEventDto {
        CreateEventDto {
            title: "Musyawarah Dusun".into(),
            description: "Pembahasan RKP".into(),
            content: None,
            start_date: NaiveDate::from_ymd_opt(2024, 7, 10).unwrap(),
            end_date: None,
            start_time: Some("19:30".into()),
            end_time: None,
            location: Some("Balai Desa".into()),
            address: None,
            coordinates: None,
            category: EventCategory::Rapat,
            images: Vec::new(),
            is_public: true,
            is_featured: false,
            max_participants: None,
            registration_required: false,
            registration_deadline: None,
            contact_person: None,
            contact_phone: Some("081234567890".into()),
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_valid_event() {
        assert!(dto().validate().is_ok());
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let mut dto = dto();
        dto.end_date = NaiveDate::from_ymd_opt(2024, 7, 9);
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_deadline_after_start_is_rejected() {
        let mut dto = dto();
        dto.registration_deadline = NaiveDate::from_ymd_opt(2024, 7, 11);
        assert!(dto.validate().is_err());
        dto.registration_deadline = NaiveDate::from_ymd_opt(2024, 7, 8);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_bad_time_and_phone() {
        let mut dto = dto();
        dto.start_time = Some("7 pagi".into());
        dto.contact_phone = Some("021-555".into());
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("start_time"));
        assert!(fields.contains_key("contact_phone"));
    }

    #[test]
    fn test_serializes_dates_as_iso() {
        let value = serde_json::to_value(dto()).unwrap();
        assert_eq!(value["startDate"], "2024-07-10");
        assert_eq!(value["isPublic"], true);
        assert!(value.get("endDate").is_none());
    }
}
