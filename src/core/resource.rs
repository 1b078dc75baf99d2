//! Generic read/write service shared by every REST resource.
//!
//! A resource describes itself through [`Resource`]: where it lives, how its
//! list and detail envelopes look, and how one JSON object becomes an entity.
//! [`ResourceService`] turns that description into cached queries, observers
//! and mutations. Per-resource modules only add what is unique to them.

use std::marker::PhantomData;
use std::sync::Arc;

use futures::FutureExt;
use serde::Serialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::http_client::ApiClient;
use crate::modules::query::{
    FetchMode, Mutation, QueryClient, QueryFilter, QueryKey, QueryObserver,
};
use crate::shared::json::{self, JsonObject};
use crate::shared::params::{QueryParams, QueryPayload};
use crate::shared::types::{normalize_list, ListShape, Paginated};

/// A boolean toggled through `PATCH /<resource>/:id/<segment>`
pub trait ResourceFlag: Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Sub-path, e.g. `feature`
    fn segment(&self) -> &'static str;

    /// Entity field the flag writes, e.g. `featured`
    fn field(&self) -> &'static str;

    fn body(&self, value: bool) -> Value {
        json!({ self.field(): value })
    }
}

pub trait Resource: Clone + std::fmt::Debug + Serialize + Send + Sync + 'static {
    /// Cache scope; every key of this resource starts with it
    const NAME: &'static str;
    /// REST collection path relative to the base URL
    const PATH: &'static str;
    const LIST_SHAPE: ListShape;
    /// Keys a detail envelope may keep the entity under
    const SINGULAR_KEYS: &'static [&'static str];

    type Params: QueryParams;
    type Flag: ResourceFlag;
    type CreateDto: Validate + Serialize + Send + Sync + 'static;
    type UpdateDto: Validate + Serialize + Send + Sync + 'static;

    /// Normalize one backend object. `None` when it is not an entity (no id).
    fn from_json(obj: &JsonObject) -> Option<Self>;

    fn id(&self) -> &str;

    fn slug(&self) -> Option<&str> {
        None
    }

    /// Entity from a detail or write response, wherever the envelope put it
    fn from_body(body: &Value) -> Option<Self> {
        let found = json::locate_entity(body, Self::SINGULAR_KEYS).and_then(Self::from_json);
        if found.is_none() {
            tracing::warn!("{} payload carries no recognizable entity", Self::NAME);
        }
        found
    }
}

pub struct ResourceService<R> {
    api: Arc<ApiClient>,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn queries(&self) -> &QueryClient {
        self.api.query_client()
    }

    pub fn list_key(params: &R::Params) -> QueryKey {
        QueryKey::list(R::NAME, params.to_payload())
    }

    pub fn detail_key(id_or_slug: &str) -> QueryKey {
        QueryKey::detail(R::NAME, id_or_slug)
    }

    pub(crate) fn item_path(id: &str) -> String {
        format!("{}/{}", R::PATH, urlencoding::encode(id))
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// One page of the list, through the cache
    pub async fn list(&self, params: &R::Params) -> Result<Arc<Paginated<R>>> {
        let payload = params.to_payload();
        let (page, limit) = params.page_and_limit();
        let api = Arc::clone(&self.api);

        self.queries()
            .fetch(QueryKey::list(R::NAME, payload.clone()), move || {
                let api = Arc::clone(&api);
                let payload = payload.clone();
                async move {
                    let body = api.get(R::PATH, Some(&payload)).await?;
                    Ok::<_, AppError>(normalize_list(
                        &body,
                        R::LIST_SHAPE,
                        page,
                        limit,
                        R::from_json,
                    ))
                }
            })
            .await
    }

    /// Same page, bypassing freshness
    pub async fn refetch_list(&self, params: &R::Params) -> Result<Arc<Paginated<R>>> {
        self.queries()
            .invalidate(&QueryFilter::Exact(Self::list_key(params)))
            .await;
        self.list(params).await
    }

    /// Entity by id or slug, through the cache.
    /// `None` when the response holds no entity; a 404 is an error.
    pub async fn get(&self, id_or_slug: &str) -> Result<Arc<Option<R>>> {
        let path = Self::item_path(id_or_slug);
        let api = Arc::clone(&self.api);

        self.queries()
            .fetch(Self::detail_key(id_or_slug), move || {
                let api = Arc::clone(&api);
                let path = path.clone();
                async move {
                    let body = api.get(&path, None).await?;
                    Ok::<_, AppError>(R::from_body(&body))
                }
            })
            .await
    }

    pub async fn refetch(&self, id_or_slug: &str) -> Result<Arc<Option<R>>> {
        self.queries()
            .invalidate(&QueryFilter::Detail(R::NAME, id_or_slug.to_string()))
            .await;
        self.get(id_or_slug).await
    }

    /// Cached derived query under `[NAME, name?payload]`
    pub(crate) async fn custom<T, P>(
        &self,
        name: &'static str,
        path: String,
        payload: QueryPayload,
        parse: P,
    ) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        P: Fn(&Value) -> T + Clone + Send + Sync + 'static,
    {
        let api = Arc::clone(&self.api);
        let key = QueryKey::custom(R::NAME, name, payload.clone());

        self.queries()
            .fetch(key, move || {
                let api = Arc::clone(&api);
                let path = path.clone();
                let payload = payload.clone();
                let parse = parse.clone();
                async move {
                    let body = api.get(&path, Some(&payload)).await?;
                    Ok::<_, AppError>(parse(&body))
                }
            })
            .await
    }

    // =========================================================================
    // WRITES
    // =========================================================================

    pub async fn create(&self, dto: &R::CreateDto) -> Result<Option<R>> {
        dto.validate()?;
        let body = self.api.post(R::PATH, dto).await?;
        let created = R::from_body(&body);

        tracing::info!(
            "Created {} {}",
            R::NAME,
            created.as_ref().map(|r| r.id()).unwrap_or("<unknown id>")
        );
        self.invalidate_after_write(None, created.as_ref()).await;
        Ok(created)
    }

    pub async fn update(&self, id: &str, dto: &R::UpdateDto) -> Result<Option<R>> {
        dto.validate()?;
        let body = self.api.patch(&Self::item_path(id), dto).await?;
        let updated = R::from_body(&body);

        tracing::info!("Updated {} {}", R::NAME, id);
        self.invalidate_after_write(Some(id), updated.as_ref()).await;
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.api.delete(&Self::item_path(id)).await?;

        tracing::info!("Deleted {} {}", R::NAME, id);
        self.invalidate_after_write(Some(id), None).await;
        Ok(())
    }

    /// Toggle a boolean flag (`verify`, `feature`, `activate`, ...) by id
    pub async fn set_flag(&self, id: &str, flag: R::Flag, value: bool) -> Result<Option<R>> {
        let path = format!("{}/{}", Self::item_path(id), flag.segment());
        let body = self.api.patch(&path, &flag.body(value)).await?;
        let updated = R::from_body(&body);

        tracing::info!("Set {} {} {:?} = {}", R::NAME, id, flag, value);
        self.invalidate_after_write(Some(id), updated.as_ref()).await;
        Ok(updated)
    }

    /// Every list of the resource plus the detail entries of the touched entity.
    ///
    /// The slug comes from the echoed entity, or failing that from the cached
    /// detail of `id`.
    pub async fn invalidate_after_write(&self, id: Option<&str>, entity: Option<&R>) {
        let queries = self.queries();
        let mut affected = queries.invalidate(&QueryFilter::Lists(R::NAME)).await;

        let Some(id) = id.or(entity.map(|e| e.id())) else {
            tracing::debug!("Invalidated {} cached {} lists", affected, R::NAME);
            return;
        };

        let cached = queries
            .get_query_data::<Option<R>>(&Self::detail_key(id))
            .await;
        let slug = entity
            .and_then(|e| e.slug())
            .or_else(|| cached.as_deref().and_then(|c| c.as_ref()).and_then(|c| c.slug()))
            .map(String::from);

        affected += queries
            .invalidate(&QueryFilter::Detail(R::NAME, id.to_string()))
            .await;
        if let Some(slug) = slug.filter(|s| s != id) {
            affected += queries.invalidate(&QueryFilter::Detail(R::NAME, slug)).await;
        }
        tracing::debug!("Invalidated {} cached {} queries", affected, R::NAME);
    }

    // =========================================================================
    // UI BINDINGS
    // =========================================================================

    pub fn list_observer(&self) -> QueryObserver<R::Params, Paginated<R>> {
        let service = self.clone();
        QueryObserver::new(Arc::new(move |params: R::Params, mode: FetchMode| {
            let service = service.clone();
            async move {
                match mode {
                    FetchMode::Cached => service.list(&params).await,
                    FetchMode::Refetch => service.refetch_list(&params).await,
                }
            }
            .boxed()
        }))
    }

    pub fn detail_observer(&self) -> QueryObserver<String, Option<R>> {
        let service = self.clone();
        QueryObserver::new(Arc::new(move |id: String, mode: FetchMode| {
            let service = service.clone();
            async move {
                match mode {
                    FetchMode::Cached => service.get(&id).await,
                    FetchMode::Refetch => service.refetch(&id).await,
                }
            }
            .boxed()
        }))
    }

    pub fn create_mutation(&self) -> Mutation<R::CreateDto, Option<R>> {
        let service = self.clone();
        Mutation::new(move |dto: R::CreateDto| {
            let service = service.clone();
            async move { service.create(&dto).await }
        })
    }

    pub fn update_mutation(&self) -> Mutation<(String, R::UpdateDto), Option<R>> {
        let service = self.clone();
        Mutation::new(move |(id, dto): (String, R::UpdateDto)| {
            let service = service.clone();
            async move { service.update(&id, &dto).await }
        })
    }

    pub fn delete_mutation(&self) -> Mutation<String, ()> {
        let service = self.clone();
        Mutation::new(move |id: String| {
            let service = service.clone();
            async move { service.delete(&id).await }
        })
    }

    pub fn flag_mutation(&self) -> Mutation<(String, R::Flag, bool), Option<R>> {
        let service = self.clone();
        Mutation::new(move |(id, flag, value): (String, R::Flag, bool)| {
            let service = service.clone();
            async move { service.set_flag(&id, flag, value).await }
        })
    }
}
