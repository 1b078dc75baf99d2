use std::sync::Arc;

use chrono::Utc;
use httpmock::MockServer;

use crate::core::config::ApiConfig;
use crate::core::http_client::ApiClient;
use crate::core::navigation::RecordingNavigator;
use crate::features::auth::model::UserRole;
use crate::features::auth::session::tests::{jwt_with_exp, sample_user};
use crate::features::auth::session::AuthSession;
use crate::modules::query::{QueryClient, QueryPolicy};
use crate::modules::storage::MemoryCredentialStore;

/// An `ApiClient` wired to a mock server, with handles on its collaborators
pub struct TestContext {
    pub api: Arc<ApiClient>,
    pub store: Arc<MemoryCredentialStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub token: String,
}

impl TestContext {
    pub async fn anonymous(server: &MockServer) -> Self {
        Self::build(server, None).await
    }

    pub async fn signed_in(server: &MockServer, role: UserRole) -> Self {
        Self::build(server, Some(role)).await
    }

    async fn build(server: &MockServer, role: Option<UserRole>) -> Self {
        let store = Arc::new(MemoryCredentialStore::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let session = Arc::new(AuthSession::new(store.clone()));
        let token = jwt_with_exp(Utc::now().timestamp() + 3600);

        if let Some(role) = role {
            session
                .set_credentials(&token, sample_user(role))
                .await
                .unwrap();
        }

        let api = ApiClient::new(
            ApiConfig::with_base_url(server.base_url()),
            session,
            navigator.clone(),
            QueryClient::new(QueryPolicy::fast()),
            "/admin/login",
        )
        .unwrap();

        Self {
            api: Arc::new(api),
            store,
            navigator,
            token,
        }
    }
}
