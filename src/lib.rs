//! Data layer of the village website: a typed client for the desa REST
//! backend with normalized entities, a query cache and session handling.

pub mod core;
pub mod features;
pub mod modules;
pub mod shared;

use std::sync::Arc;

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::http_client::ApiClient;
use crate::core::navigation::Navigator;
use crate::features::auth::{AuthService, AuthSession};
use crate::features::contacts::ContactService;
use crate::features::events::EventService;
use crate::features::posts::PostService;
use crate::features::service_guides::ServiceGuideService;
use crate::features::umkm::UmkmService;
use crate::features::uploads::UploadService;
use crate::features::users::UserService;
use crate::features::village_profile::VillageProfileService;
use crate::modules::query::{QueryClient, QueryPolicy};
use crate::modules::storage::{CredentialStore, SyncedCredentialStore};

/// Every service, sharing one `ApiClient` (and so one session and one cache)
#[derive(Clone)]
pub struct DesaClient {
    pub api: Arc<ApiClient>,
    pub auth: AuthService,
    pub posts: PostService,
    pub events: EventService,
    pub umkm: UmkmService,
    pub contacts: ContactService,
    pub service_guides: ServiceGuideService,
    pub village_profile: VillageProfileService,
    pub users: UserService,
    pub uploads: UploadService,
}

impl DesaClient {
    /// Restore the persisted session from `config.auth.storage_dir` and wire every service
    pub async fn connect(config: Config, navigator: Arc<dyn Navigator>) -> Result<Self> {
        let store: Arc<dyn CredentialStore> =
            Arc::new(SyncedCredentialStore::in_dir(&config.auth.storage_dir));
        let session = Arc::new(AuthSession::restore(store).await?);
        let queries = QueryClient::new(QueryPolicy::from(&config.query));

        let api = ApiClient::new(
            config.api,
            session,
            navigator,
            queries,
            config.auth.login_path,
        )?;
        Ok(Self::with_api(Arc::new(api)))
    }

    pub fn with_api(api: Arc<ApiClient>) -> Self {
        Self {
            auth: AuthService::new(api.clone()),
            posts: PostService::new(api.clone()),
            events: EventService::new(api.clone()),
            umkm: UmkmService::new(api.clone()),
            contacts: ContactService::new(api.clone()),
            service_guides: ServiceGuideService::new(api.clone()),
            village_profile: VillageProfileService::new(api.clone()),
            users: UserService::new(api.clone()),
            uploads: UploadService::new(api.clone()),
            api,
        }
    }
}
