use std::sync::Arc;

use validator::Validate;

use crate::core::error::Result;
use crate::core::resource::ResourceService;
use crate::features::auth::model::{User, UserRole};
use crate::features::users::dtos::{ChangePasswordDto, UpdateUserDto};
use crate::features::users::model::UserFlag;
use crate::features::users::params::UserParams;
use crate::shared::types::Paginated;

pub type UserService = ResourceService<User>;

impl ResourceService<User> {
    pub async fn by_role(&self, role: UserRole) -> Result<Arc<Paginated<User>>> {
        self.list(&UserParams::role(role)).await
    }

    /// Update an account; when it is the signed-in one, the session follows
    pub async fn update_account(&self, id: &str, dto: &UpdateUserDto) -> Result<Option<User>> {
        let updated = self.update(id, dto).await?;
        if let Some(user) = &updated {
            self.sync_session(user).await?;
        }
        Ok(updated)
    }

    pub async fn change_password(&self, id: &str, dto: &ChangePasswordDto) -> Result<()> {
        dto.validate()?;
        let path = format!("{}/password", Self::item_path(id));
        self.api().patch(&path, dto).await?;
        tracing::info!("Changed password for user {}", id);
        Ok(())
    }

    pub async fn set_verified(&self, id: &str, verified: bool) -> Result<Option<User>> {
        self.set_flag(id, UserFlag::Verified, verified).await
    }

    pub async fn set_active(&self, id: &str, active: bool) -> Result<Option<User>> {
        self.set_flag(id, UserFlag::Active, active).await
    }

    async fn sync_session(&self, user: &User) -> Result<()> {
        let session = self.api().session();
        match session.user().await {
            Some(current) if current.id == user.id => session.update_user(user.clone()).await,
            _ => Ok(()),
        }
    }
}
