//! Process-wide authentication state.
//!
//! `AuthSession` owns the bearer token and the signed-in user. It is created
//! once, loaded from the credential store at startup, and injected into the
//! HTTP client and route guards.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::core::error::Result;
use crate::features::auth::model::{User, UserRole};
use crate::modules::storage::{CredentialStore, TOKEN_KEY, USER_KEY};

#[derive(Debug, Clone, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<User>,
}

pub struct AuthSession {
    store: Arc<dyn CredentialStore>,
    state: RwLock<SessionState>,
}

impl AuthSession {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            state: RwLock::new(SessionState::default()),
        }
    }

    /// Create a session and load whatever the store holds
    pub async fn restore(store: Arc<dyn CredentialStore>) -> Result<Self> {
        let session = Self::new(store);
        session.init().await?;
        Ok(session)
    }

    /// Load token and user from persisted storage.
    ///
    /// A token whose `exp` claim is already past is discarded together with
    /// the user, so the first request does not have to bounce off a 401.
    pub async fn init(&self) -> Result<()> {
        let token = self.store.get(TOKEN_KEY).await?;
        let user_raw = self.store.get(USER_KEY).await?;

        let Some(token) = token else {
            if user_raw.is_some() {
                // user without a token is useless
                self.store.remove(USER_KEY).await?;
            }
            *self.state.write().await = SessionState::default();
            return Ok(());
        };

        if is_expired(&token) {
            tracing::info!("Persisted token has expired; starting signed out");
            self.clear().await?;
            return Ok(());
        }

        let user = user_raw.and_then(|raw| parse_user(&raw));
        tracing::debug!(
            "Session restored (user: {})",
            user.as_ref().map(|u| u.email.as_str()).unwrap_or("unknown")
        );

        *self.state.write().await = SessionState {
            token: Some(token),
            user,
        };
        Ok(())
    }

    /// Persist a fresh login
    pub async fn set_credentials(&self, token: &str, user: User) -> Result<()> {
        self.store.set(TOKEN_KEY, token).await?;
        self.store.set(USER_KEY, &serde_json::to_string(&user)?).await?;

        let mut state = self.state.write().await;
        state.token = Some(token.to_string());
        state.user = Some(user);
        Ok(())
    }

    /// Replace the stored profile, e.g. after `GET /auth/profile`
    pub async fn update_user(&self, user: User) -> Result<()> {
        self.store.set(USER_KEY, &serde_json::to_string(&user)?).await?;
        self.state.write().await.user = Some(user);
        Ok(())
    }

    /// Forget everything, in memory and on disk.
    /// Memory is cleared even when the store fails.
    pub async fn clear(&self) -> Result<()> {
        *self.state.write().await = SessionState::default();

        let token = self.store.remove(TOKEN_KEY).await;
        let user = self.store.remove(USER_KEY).await;
        token.and(user)
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.token.is_some()
    }

    /// True when a user is signed in and holds one of `roles`
    pub async fn has_any_role(&self, roles: &[UserRole]) -> bool {
        self.state
            .read()
            .await
            .user
            .as_ref()
            .is_some_and(|u| roles.contains(&u.role))
    }
}

fn parse_user(raw: &str) -> Option<User> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| tracing::warn!("Stored user is not valid JSON: {}", e))
        .ok()?;
    value.as_object().and_then(User::from_json)
}

/// Whether a JWT's `exp` claim lies in the past.
/// Opaque tokens and tokens without `exp` are never treated as expired.
pub(crate) fn is_expired(token: &str) -> bool {
    token_expiry(token).is_some_and(|exp| exp <= Utc::now().timestamp())
}

fn token_expiry(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("exp").and_then(Value::as_i64)
}
