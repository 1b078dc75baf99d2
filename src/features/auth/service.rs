use std::sync::Arc;

use serde_json::{json, Value};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::http_client::ApiClient;
use crate::features::auth::dto::LoginRequestDto;
use crate::features::auth::model::User;
use crate::shared::json;

/// Login, profile refresh and logout against `/auth/*`
#[derive(Clone)]
pub struct AuthService {
    api: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Exchange credentials for a token and store the session.
    ///
    /// Wrong credentials come back as a 401, which ends any previous session
    /// like every other 401.
    pub async fn login(&self, dto: &LoginRequestDto) -> Result<User> {
        dto.validate()?;
        let body = self.api.post("/auth/login", dto).await?;

        let token = extract_token(&body)
            .ok_or_else(|| AppError::Decode("Login response carries no token".to_string()))?;
        let user = extract_user(&body)
            .ok_or_else(|| AppError::Decode("Login response carries no user".to_string()))?;

        self.api.session().set_credentials(&token, user.clone()).await?;
        tracing::info!("User {} logged in as {}", user.id, user.role);
        Ok(user)
    }

    /// Re-read the signed-in user and refresh the stored copy
    pub async fn profile(&self) -> Result<User> {
        let body = self.api.get("/auth/profile", None).await?;
        let user = extract_user(&body)
            .ok_or_else(|| AppError::Decode("Profile response carries no user".to_string()))?;

        self.api.session().update_user(user.clone()).await?;
        Ok(user)
    }

    /// Tell the backend, then forget everything locally.
    ///
    /// The local teardown happens even when the backend call fails.
    pub async fn logout(&self) -> Result<()> {
        if self.api.session().token().await.is_some() {
            if let Err(e) = self.api.post("/auth/logout", &json!({})).await {
                tracing::warn!("Logout request failed: {}", e);
            }
        }

        self.api.query_client().clear().await;
        self.api.session().clear().await?;
        tracing::info!("User logged out");
        Ok(())
    }
}

fn extract_token(body: &Value) -> Option<String> {
    const TOKEN_KEYS: &[&str] = &["token", "accessToken", "access_token"];
    let obj = body.as_object()?;
    json::non_empty_string(obj, TOKEN_KEYS).or_else(|| {
        json::object(obj, &["data"]).and_then(|data| json::non_empty_string(data, TOKEN_KEYS))
    })
}

fn extract_user(body: &Value) -> Option<User> {
    json::locate_entity(body, &["user", "profile"]).and_then(User::from_json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::UserRole;
    use crate::modules::storage::{CredentialStore, TOKEN_KEY};
    use crate::shared::test_helpers::TestContext;
    use httpmock::prelude::*;

    #[test]
    fn test_token_locations() {
        assert_eq!(extract_token(&json!({"token": "a"})).as_deref(), Some("a"));
        assert_eq!(
            extract_token(&json!({"data": {"accessToken": "b"}})).as_deref(),
            Some("b")
        );
        assert_eq!(extract_token(&json!({"data": {"token": ""}})), None);
    }

    #[tokio::test]
    async fn test_login_stores_session() {
        let server = MockServer::start();
        let ctx = TestContext::anonymous(&server).await;
        let auth = AuthService::new(ctx.api.clone());

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/auth/login")
                .json_body(json!({"email": "kades@desa.id", "password": "rahasia"}));
            then.status(200).json_body(json!({
                "data": {
                    "token": "jwt-token",
                    "user": {"id": "u9", "email": "kades@desa.id", "role": "ADMIN"}
                }
            }));
        });

        let user = auth
            .login(&LoginRequestDto::new("kades@desa.id", "rahasia"))
            .await
            .unwrap();
        mock.assert_calls(1);
        assert_eq!(user.role, UserRole::Admin);

        let session = ctx.api.session();
        assert!(session.is_authenticated().await);
        assert_eq!(session.token().await.as_deref(), Some("jwt-token"));
        assert_eq!(
            ctx.store.get(TOKEN_KEY).await.unwrap().as_deref(),
            Some("jwt-token")
        );
    }

    #[tokio::test]
    async fn test_login_rejected_by_backend() {
        let server = MockServer::start();
        let ctx = TestContext::anonymous(&server).await;
        let auth = AuthService::new(ctx.api.clone());

        let _m = server.mock(|when, then| {
            when.method(POST).path("/auth/login");
            then.status(401).json_body(json!({"message": "Email atau password salah"}));
        });

        let err = auth
            .login(&LoginRequestDto::new("kades@desa.id", "salah"))
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.message(), "Email atau password salah");
        assert!(!ctx.api.session().is_authenticated().await);
    }

    #[tokio::test]
    async fn test_profile_refreshes_user() {
        let server = MockServer::start();
        let ctx = TestContext::signed_in(&server, UserRole::Operator).await;
        let auth = AuthService::new(ctx.api.clone());

        let _m = server.mock(|when, then| {
            when.method(GET)
                .path("/auth/profile")
                .header("authorization", format!("Bearer {}", ctx.token));
            then.status(200).json_body(json!({
                "user": {"id": "u1", "email": "admin@desa.id", "role": "EDITOR"}
            }));
        });

        let user = auth.profile().await.unwrap();
        assert_eq!(user.role, UserRole::Editor);
        assert_eq!(
            ctx.api.session().user().await.map(|u| u.role),
            Some(UserRole::Editor)
        );
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_backend_fails() {
        let server = MockServer::start();
        let ctx = TestContext::signed_in(&server, UserRole::Admin).await;
        let auth = AuthService::new(ctx.api.clone());

        let logout = server.mock(|when, then| {
            when.method(POST).path("/auth/logout");
            then.status(500);
        });

        auth.logout().await.unwrap();
        logout.assert_calls(1);
        assert!(!ctx.api.session().is_authenticated().await);
        assert!(ctx.store.get(TOKEN_KEY).await.unwrap().is_none());
        assert!(ctx.api.query_client().is_empty().await);
    }
}
