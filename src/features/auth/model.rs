use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::json::{self, JsonObject};
use crate::shared::wire::{wire_enum, WireEnum};

wire_enum! {
    /// Admin panel roles, highest first
    pub enum UserRole {
        Admin => "ADMIN",
        Editor => "EDITOR",
        Operator => "OPERATOR",
    }
}

impl Default for UserRole {
    /// Least privileged role, used when the backend sends none or an unknown one
    fn default() -> Self {
        UserRole::Operator
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub name: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub verified_at: Option<DateTime<Utc>>,
    pub verified_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a user from any of the shapes the backend returns.
    /// `None` when the object carries no id.
    pub fn from_json(obj: &JsonObject) -> Option<Self> {
        let id = json::id(obj)?;
        let email = json::string_or_default(obj, &["email"]);

        // older payloads only had an email; derive the handle from it
        let username = json::non_empty_string(obj, &["username", "userName"])
            .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());
        let name = json::non_empty_string(obj, &["name", "fullName", "displayName"])
            .unwrap_or_else(|| username.clone());

        let role = json::string(obj, &["role"])
            .and_then(|r| UserRole::from_wire(&r))
            .unwrap_or_default();

        Some(Self {
            id,
            email,
            username,
            name,
            role,
            phone: json::non_empty_string(obj, &["phone", "phoneNumber"]),
            avatar: json::non_empty_string(obj, &["avatar", "avatarUrl", "photo"]),
            last_login: json::datetime(obj, &["lastLogin", "lastLoginAt"]),
            is_active: json::bool_or(obj, &["isActive", "active"], true),
            verified_at: json::datetime(obj, &["verifiedAt"]),
            verified_by: verified_by(obj),
            created_at: json::datetime(obj, &["createdAt", "created_at"]).unwrap_or_default(),
            updated_at: json::datetime(obj, &["updatedAt", "updated_at"]).unwrap_or_default(),
        })
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == role
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }

    pub fn is_verified(&self) -> bool {
        self.verified_at.is_some()
    }
}

/// `verifiedBy` is either an id or an embedded `{id, name}` user
fn verified_by(obj: &JsonObject) -> Option<String> {
    json::object(obj, &["verifiedBy"])
        .and_then(|o| json::non_empty_string(o, &["name", "id"]))
        .or_else(|| json::non_empty_string(obj, &["verifiedBy"]))
}
