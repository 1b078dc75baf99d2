//! Role-based guards for admin screens.
//!
//! Roles, highest first:
//! - ADMIN: everything, including user management
//! - EDITOR: content (posts, events, UMKM, profile, guides, contacts)
//! - OPERATOR: day-to-day data entry
//!
//! A guard reads the session only; it never calls the backend.

use crate::core::error::{AppError, Result};
use crate::features::auth::model::{User, UserRole};
use crate::features::auth::session::AuthSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    allowed: Vec<UserRole>,
}

impl RouteGuard {
    pub fn new(allowed: &[UserRole]) -> Self {
        Self {
            allowed: allowed.to_vec(),
        }
    }

    /// User management and site settings
    pub fn admin_only() -> Self {
        Self::new(&[UserRole::Admin])
    }

    /// Content management
    pub fn editors() -> Self {
        Self::new(&[UserRole::Admin, UserRole::Editor])
    }

    /// Any signed-in panel user
    pub fn staff() -> Self {
        Self::new(UserRole::ALL)
    }

    pub fn allows(&self, role: UserRole) -> bool {
        self.allowed.contains(&role)
    }

    /// The signed-in user when their role is allowed.
    ///
    /// No session is `Unauthorized`; a session with another role is `Forbidden`.
    pub async fn check(&self, session: &AuthSession) -> Result<User> {
        let user = match (session.token().await, session.user().await) {
            (Some(_), Some(user)) => user,
            _ => {
                return Err(AppError::Unauthorized {
                    message: "User not authenticated".to_string(),
                    payload: None,
                })
            }
        };

        if !self.allows(user.role) {
            tracing::debug!("User {} ({}) denied by guard {:?}", user.id, user.role, self.allowed);
            return Err(AppError::Forbidden {
                message: format!("{} access required", self.describe()),
                payload: None,
            });
        }

        Ok(user)
    }

    fn describe(&self) -> String {
        self.allowed
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}
