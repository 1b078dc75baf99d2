use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::core::resource::{Resource, ResourceFlag};
use crate::features::umkm::dtos::{CreateUmkmDto, UpdateUmkmDto};
use crate::features::umkm::params::UmkmParams;
use crate::shared::json::{self, JsonObject};
use crate::shared::types::{Coordinates, ListShape};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMedia {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiktok: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
}

impl SocialMedia {
    /// Nested `socialMedia` object, or flat `instagram`/`facebook`/... fields
    fn from_json(obj: &JsonObject) -> Self {
        let nested = json::object(obj, &["socialMedia", "social_media", "socials"]);
        let pick = |keys: &[&str]| {
            nested
                .and_then(|n| json::non_empty_string(n, keys))
                .or_else(|| json::non_empty_string(obj, keys))
        };
        Self {
            instagram: pick(&["instagram"]),
            facebook: pick(&["facebook"]),
            tiktok: pick(&["tiktok"]),
            youtube: pick(&["youtube"]),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.instagram.is_none()
            && self.facebook.is_none()
            && self.tiktok.is_none()
            && self.youtube.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must not be negative"))]
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

impl Product {
    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let name = json::non_empty_string(obj, &["name", "title"])?;
        Some(Self {
            name,
            description: json::non_empty_string(obj, &["description"]),
            price: json::opt_f64(obj, &["price", "harga"])
                .filter(|p| *p >= 0.0)
                .unwrap_or(0.0),
            unit: json::non_empty_string(obj, &["unit", "satuan"]),
            image: json::non_empty_string(obj, &["image", "imageUrl"]),
            available: json::field(obj, &["available", "isAvailable"]).and_then(json::loose_bool),
        })
    }
}

/// Opening hours per weekday; `None` or an empty string means closed or unknown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatingHours {
    pub monday: Option<String>,
    pub tuesday: Option<String>,
    pub wednesday: Option<String>,
    pub thursday: Option<String>,
    pub friday: Option<String>,
    pub saturday: Option<String>,
    pub sunday: Option<String>,
}

impl OperatingHours {
    /// English or Indonesian weekday keys
    fn from_json(obj: &JsonObject) -> Self {
        let Some(hours) = json::object(obj, &["operatingHours", "operating_hours", "openingHours"])
        else {
            return Self::default();
        };
        let day = |keys: &[&str]| json::non_empty_string(hours, keys);
        Self {
            monday: day(&["monday", "senin"]),
            tuesday: day(&["tuesday", "selasa"]),
            wednesday: day(&["wednesday", "rabu"]),
            thursday: day(&["thursday", "kamis"]),
            friday: day(&["friday", "jumat"]),
            saturday: day(&["saturday", "sabtu"]),
            sunday: day(&["sunday", "minggu"]),
        }
    }

    /// Monday first
    pub fn days(&self) -> [(&'static str, Option<&str>); 7] {
        [
            ("monday", self.monday.as_deref()),
            ("tuesday", self.tuesday.as_deref()),
            ("wednesday", self.wednesday.as_deref()),
            ("thursday", self.thursday.as_deref()),
            ("friday", self.friday.as_deref()),
            ("saturday", self.saturday.as_deref()),
            ("sunday", self.sunday.as_deref()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Umkm {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Free text; the backend keeps no fixed list
    pub category: String,
    pub owner: String,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub email: Option<String>,
    pub address: String,
    pub coordinates: Option<Coordinates>,
    pub website: Option<String>,
    pub social_media: SocialMedia,
    pub images: Vec<String>,
    pub products: Vec<Product>,
    pub operating_hours: OperatingHours,
    /// Absent on the wire reads as active
    pub is_active: bool,
    pub featured: bool,
    pub verified: bool,
    /// 0 to 5
    pub rating: Option<f64>,
    pub review_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Umkm {
    /// WhatsApp number, falling back to the phone
    pub fn whatsapp_number(&self) -> Option<&str> {
        self.whatsapp
            .as_deref()
            .or(Some(self.phone.as_str()))
            .filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UmkmFlag {
    Verified,
    Featured,
    Active,
}

impl ResourceFlag for UmkmFlag {
    fn segment(&self) -> &'static str {
        match self {
            UmkmFlag::Verified => "verify",
            UmkmFlag::Featured => "feature",
            UmkmFlag::Active => "activate",
        }
    }

    fn field(&self) -> &'static str {
        match self {
            UmkmFlag::Verified => "verified",
            UmkmFlag::Featured => "featured",
            UmkmFlag::Active => "isActive",
        }
    }
}

impl Resource for Umkm {
    const NAME: &'static str = "umkm";
    const PATH: &'static str = "/umkm";
    const LIST_SHAPE: ListShape = ListShape {
        list_keys: &["umkm", "umkms", "businesses"],
        meta_keys: &["pagination"],
    };
    const SINGULAR_KEYS: &'static [&'static str] = &["umkm", "business"];

    type Params = UmkmParams;
    type Flag = UmkmFlag;
    type CreateDto = CreateUmkmDto;
    type UpdateDto = UpdateUmkmDto;

    fn from_json(obj: &JsonObject) -> Option<Self> {
        let id = json::id(obj)?;

        let mut images = json::string_list(obj, &["images", "gallery", "photos"]);
        if images.is_empty() {
            images.extend(json::non_empty_string(obj, &["image", "logo"]));
        }

        let products = match json::field(obj, &["products", "produk"]) {
            Some(Value::Array(items)) => items.iter().filter_map(Product::from_value).collect(),
            _ => Vec::new(),
        };

        Some(Self {
            id,
            name: json::string_or_default(obj, &["name", "businessName"]),
            slug: json::string_or_default(obj, &["slug"]),
            description: json::string_or_default(obj, &["description"]),
            category: json::non_empty_string(obj, &["category", "type"]).unwrap_or_default(),
            owner: json::string_or_default(obj, &["owner", "ownerName"]),
            phone: json::string_or_default(obj, &["phone", "phoneNumber"]),
            whatsapp: json::non_empty_string(obj, &["whatsapp", "wa"]),
            email: json::non_empty_string(obj, &["email"]),
            address: json::string_or_default(obj, &["address", "location"]),
            coordinates: Coordinates::from_json(obj, &["coordinates", "geo"]),
            website: json::non_empty_string(obj, &["website", "url"]),
            social_media: SocialMedia::from_json(obj),
            images,
            products,
            operating_hours: OperatingHours::from_json(obj),
            is_active: json::bool_or(obj, &["isActive", "active"], true),
            featured: json::bool_or(obj, &["featured", "isFeatured"], false),
            verified: json::bool_or(obj, &["verified", "isVerified"], false),
            rating: json::opt_f64(obj, &["rating"]).map(|r| r.clamp(0.0, 5.0)),
            review_count: json::u32_or(obj, &["reviewCount", "reviews"], 0),
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
