use crate::core::resource::{Resource, ResourceFlag};
use crate::features::auth::model::User;
use crate::features::users::dtos::{CreateUserDto, UpdateUserDto};
use crate::features::users::params::UserParams;
use crate::shared::json::JsonObject;
use crate::shared::types::ListShape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFlag {
    Verified,
    Active,
}

impl ResourceFlag for UserFlag {
    fn segment(&self) -> &'static str {
        match self {
            UserFlag::Verified => "verify",
            UserFlag::Active => "activate",
        }
    }

    fn field(&self) -> &'static str {
        match self {
            UserFlag::Verified => "verified",
            UserFlag::Active => "isActive",
        }
    }
}

impl Resource for User {
    const NAME: &'static str = "users";
    const PATH: &'static str = "/users";
    const LIST_SHAPE: ListShape = ListShape {
        list_keys: &["users"],
        meta_keys: &["pagination"],
    };
    const SINGULAR_KEYS: &'static [&'static str] = &["user"];

    type Params = UserParams;
    type Flag = UserFlag;
    type CreateDto = CreateUserDto;
    type UpdateDto = UpdateUserDto;

    fn from_json(obj: &JsonObject) -> Option<Self> {
        User::from_json(obj)
    }

    fn id(&self) -> &str {
        &self.id
    }
}
