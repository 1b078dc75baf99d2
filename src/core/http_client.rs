//! The single request pipeline every service goes through.
//!
//! Request phase: base URL join, bearer token from the session, `X-Request-Id`.
//! Response phase: non-object bodies are wrapped as `{"data": ...}`, failures
//! become `AppError` via `AppError::from_status`, and a 401 ends the session
//! for the whole client.

use std::sync::Arc;

use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::core::config::ApiConfig;
use crate::core::error::{AppError, Result};
use crate::core::navigation::Navigator;
use crate::features::auth::session::AuthSession;
use crate::modules::query::QueryClient;
use crate::shared::params::QueryPayload;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    session: Arc<AuthSession>,
    navigator: Arc<dyn Navigator>,
    query_client: QueryClient,
    login_path: String,
}

impl ApiClient {
    pub fn new(
        config: ApiConfig,
        session: Arc<AuthSession>,
        navigator: Arc<dyn Navigator>,
        query_client: QueryClient,
        login_path: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            session,
            navigator,
            query_client,
            login_path: login_path.into(),
        })
    }

    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }

    pub fn query_client(&self) -> &QueryClient {
        &self.query_client
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub async fn get(&self, path: &str, query: Option<&QueryPayload>) -> Result<Value> {
        let mut request = self.http.get(self.url(path));
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            request = request.query(query);
        }
        self.execute(Method::GET, path, request).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let request = self.http.post(self.url(path)).json(body);
        self.execute(Method::POST, path, request).await
    }

    pub async fn patch<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let request = self.http.patch(self.url(path)).json(body);
        self.execute(Method::PATCH, path, request).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        let request = self.http.delete(self.url(path));
        self.execute(Method::DELETE, path, request).await
    }

    /// Multipart POST. reqwest sets the multipart content type and boundary;
    /// the upload timeout replaces the ordinary one.
    pub async fn upload(&self, path: &str, form: Form) -> Result<Value> {
        let request = self
            .http
            .post(self.url(path))
            .timeout(self.config.upload_timeout)
            .multipart(form);
        self.execute(Method::POST, path, request).await
    }

    /// Drop credentials and cached data, then send the user to the login page.
    ///
    /// Store failures are logged, not returned: the redirect must happen
    /// regardless.
    pub async fn end_session(&self) {
        if let Err(e) = self.session.clear().await {
            tracing::error!("Failed to clear persisted credentials: {}", e);
        }
        self.query_client.clear().await;
        self.navigator.redirect_to(&self.login_path);
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.config.base_url,
            path.trim_start_matches('/')
        )
    }

    async fn execute(&self, method: Method, path: &str, request: RequestBuilder) -> Result<Value> {
        let request_id = Uuid::now_v7().to_string();
        let mut request = request.header(REQUEST_ID_HEADER, &request_id);
        if let Some(token) = self.session.token().await {
            request = request.bearer_auth(token);
        }

        tracing::debug!("[{}] {} {}", request_id, method, path);

        let response = request.send().await.map_err(|e| {
            tracing::error!("[{}] {} {} failed: {}", request_id, method, path, e);
            AppError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("[{}] {} {} -> {}", request_id, method, path, status.as_u16());
            return read_body(response).await.map(wrap_body);
        }

        let payload = read_body(response).await.ok().filter(|v| !v.is_null());
        let error = AppError::from_status(status.as_u16(), payload);

        if error.is_unauthorized() {
            tracing::warn!(
                "[{}] {} {} -> 401; ending session",
                request_id,
                method,
                path
            );
            self.end_session().await;
        } else {
            tracing::warn!(
                "[{}] {} {} -> {}: {}",
                request_id,
                method,
                path,
                status.as_u16(),
                error.message()
            );
        }

        Err(error)
    }
}

/// Body as JSON. Empty bodies read as `null`, non-JSON text as a string.
async fn read_body(response: Response) -> Result<Value> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

/// Objects pass through; anything else is wrapped as `{"data": value}`
fn wrap_body(body: Value) -> Value {
    match body {
        Value::Object(_) => body,
        other => json!({ "data": other }),
    }
}
