use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;

use crate::core::error::{AppError, Result};
use crate::modules::query::key::{QueryFilter, QueryKey};
use crate::modules::query::policy::QueryPolicy;

type AnyValue = Arc<dyn Any + Send + Sync>;
type SharedFetch = Shared<BoxFuture<'static, Result<AnyValue>>>;

struct CacheEntry {
    value: Option<AnyValue>,
    updated_at: Option<Instant>,
    last_accessed: Instant,
    /// Set by invalidation; the next read must go to the network
    invalidated: bool,
    /// Drawn from the client-wide epoch on creation, invalidation and each
    /// fetch start; a fetch only stores its result while it still matches
    generation: u64,
    inflight: Option<SharedFetch>,
}

impl CacheEntry {
    fn new(generation: u64) -> Self {
        Self {
            value: None,
            updated_at: None,
            last_accessed: Instant::now(),
            invalidated: false,
            generation,
            inflight: None,
        }
    }

    fn is_fresh(&self, policy: &QueryPolicy) -> bool {
        !self.invalidated
            && self
                .updated_at
                .is_some_and(|at| at.elapsed() < policy.stale_time)
    }
}

struct Inner {
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
    policy: QueryPolicy,
    /// Generations are unique across entries and survive `clear`/`remove`
    epoch: AtomicU64,
}

impl Inner {
    fn next_generation(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::Relaxed) + 1
    }
}

/// Keyed cache of query results with stale-while-revalidate reads,
/// in-flight deduplication and bounded retries.
///
/// Cloning is cheap; clones share the same cache.
#[derive(Clone)]
pub struct QueryClient {
    inner: Arc<Inner>,
}

impl QueryClient {
    pub fn new(policy: QueryPolicy) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(HashMap::new()),
                policy,
                epoch: AtomicU64::new(0),
            }),
        }
    }

    pub fn policy(&self) -> &QueryPolicy {
        &self.inner.policy
    }

    /// Read `key` through the cache.
    ///
    /// - fresh value: returned, no network call
    /// - stale value: returned immediately, a background refetch is started
    /// - missing or invalidated: awaits a fetch, joining one already in flight
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<Arc<T>>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let pending = {
            let mut entries = self.inner.entries.lock().await;
            self.prune_locked(&mut entries);

            let entry = entries
                .entry(key.clone())
                .or_insert_with(|| CacheEntry::new(self.inner.next_generation()));
            entry.last_accessed = Instant::now();

            let cached = match entry.value.clone() {
                Some(value) if !entry.invalidated => value.downcast::<T>().ok(),
                _ => None,
            };

            match cached {
                Some(value) if entry.is_fresh(&self.inner.policy) => {
                    tracing::debug!("Query cache hit: {}", key);
                    return Ok(value);
                }
                Some(value) => {
                    if entry.inflight.is_none() {
                        tracing::debug!("Query stale, revalidating in background: {}", key);
                        let refresh = self.start_fetch(&key, entry, fetcher);
                        tokio::spawn(refresh);
                    }
                    return Ok(value);
                }
                None => match entry.inflight.clone() {
                    Some(inflight) => {
                        tracing::debug!("Joining in-flight query: {}", key);
                        inflight
                    }
                    None => {
                        tracing::debug!("Query cache miss: {}", key);
                        self.start_fetch(&key, entry, fetcher)
                    }
                },
            }
        };

        let value = pending.await?;
        value
            .downcast::<T>()
            .map_err(|_| AppError::Decode(format!("Cached value for {} has unexpected type", key)))
    }

    /// Create the shared fetch for `entry` and register it as in flight.
    /// The caller holds the entries lock.
    fn start_fetch<T, F, Fut>(&self, key: &QueryKey, entry: &mut CacheEntry, fetcher: F) -> SharedFetch
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let key = key.clone();
        let generation = self.inner.next_generation();
        entry.generation = generation;

        let fetch = async move {
            let result = fetch_with_retry(&inner.policy, &key, fetcher)
                .await
                .map(|value| Arc::new(value) as AnyValue);

            let mut entries = inner.entries.lock().await;
            if let Some(entry) = entries.get_mut(&key) {
                if entry.generation == generation {
                    entry.inflight = None;
                    if let Ok(value) = &result {
                        entry.value = Some(Arc::clone(value));
                        entry.updated_at = Some(Instant::now());
                        entry.invalidated = false;
                    }
                } else {
                    tracing::debug!("Discarding result of superseded fetch: {}", key);
                }
            }
            result
        }
        .boxed()
        .shared();

        entry.inflight = Some(fetch.clone());
        fetch
    }

    /// Cached value for `key`, fresh or not
    pub async fn get_query_data<T: Send + Sync + 'static>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let entries = self.inner.entries.lock().await;
        entries
            .get(key)
            .and_then(|entry| entry.value.clone())
            .and_then(|value| value.downcast::<T>().ok())
    }

    /// Mark matching entries stale and abandon their in-flight fetches.
    /// Returns how many entries were affected.
    pub async fn invalidate(&self, filter: &QueryFilter) -> usize {
        let mut entries = self.inner.entries.lock().await;
        let mut count = 0;
        for (key, entry) in entries.iter_mut().filter(|(key, _)| filter.matches(key)) {
            entry.invalidated = true;
            entry.generation = self.inner.next_generation();
            entry.inflight = None;
            count += 1;
            tracing::debug!("Invalidated query: {}", key);
        }
        count
    }

    /// Drop matching entries entirely
    pub async fn remove(&self, filter: &QueryFilter) -> usize {
        let mut entries = self.inner.entries.lock().await;
        let before = entries.len();
        entries.retain(|key, _| !filter.matches(key));
        before - entries.len()
    }

    /// Drop every entry, e.g. when the session ends
    pub async fn clear(&self) {
        let mut entries = self.inner.entries.lock().await;
        let count = entries.len();
        entries.clear();
        tracing::info!("Query cache cleared ({} entries)", count);
    }

    pub async fn len(&self) -> usize {
        self.inner.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.entries.lock().await.is_empty()
    }

    /// Drop idle entries older than `cache_time` that have no fetch in flight
    fn prune_locked(&self, entries: &mut HashMap<QueryKey, CacheEntry>) {
        let cache_time = self.inner.policy.cache_time;
        entries.retain(|key, entry| {
            let keep = entry.inflight.is_some() || entry.last_accessed.elapsed() < cache_time;
            if !keep {
                tracing::debug!("Pruned idle query: {}", key);
            }
            keep
        });
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(QueryPolicy::default())
    }
}

async fn fetch_with_retry<T, F, Fut>(policy: &QueryPolicy, key: &QueryKey, fetcher: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match fetcher().await {
            Ok(value) => return Ok(value),
            Err(e) if policy.should_retry(attempt, &e) => {
                let delay = policy.retry_delay(attempt);
                tracing::warn!(
                    "Query {} failed (attempt {}): {}; retrying in {:?}",
                    key,
                    attempt + 1,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                if e.is_unauthorized() {
                    tracing::debug!("Query {} unauthorized; not retrying", key);
                }
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::params::QueryPayload;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn key(page: u32) -> QueryKey {
        let mut payload = QueryPayload::default();
        payload.number("page", Some(page));
        QueryKey::list("posts", payload)
    }

    fn counting_fetcher(
        calls: &Arc<AtomicUsize>,
    ) -> impl Fn() -> BoxFuture<'static, Result<usize>> + Send + Sync + 'static {
        let calls = Arc::clone(calls);
        move || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            async move { Ok(n) }.boxed()
        }
    }

    #[tokio::test]
    async fn test_fresh_value_is_served_from_cache() {
        let client = QueryClient::new(QueryPolicy::fast());
        let calls = Arc::new(AtomicUsize::new(0));

        let first = client.fetch(key(1), counting_fetcher(&calls)).await.unwrap();
        let second = client.fetch(key(1), counting_fetcher(&calls)).await.unwrap();

        assert_eq!(*first, 1);
        assert_eq!(*second, 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_reads_share_one_fetch() {
        let client = QueryClient::new(QueryPolicy::fast());
        let calls = Arc::new(AtomicUsize::new(0));

        let slow = {
            let calls = Arc::clone(&calls);
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Ok::<_, AppError>("posts".to_string())
                }
                .boxed()
            }
        };

        let (a, b) = tokio::join!(
            client.fetch(key(1), slow.clone()),
            client.fetch(key(1), slow)
        );
        assert_eq!(a.unwrap().as_str(), "posts");
        assert_eq!(b.unwrap().as_str(), "posts");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_value_returned_while_revalidating() {
        let policy = QueryPolicy {
            stale_time: Duration::ZERO,
            ..QueryPolicy::fast()
        };
        let client = QueryClient::new(policy);
        let calls = Arc::new(AtomicUsize::new(0));

        assert_eq!(*client.fetch(key(1), counting_fetcher(&calls)).await.unwrap(), 1);

        // stale: old value comes back immediately, refetch runs in the background
        assert_eq!(*client.fetch(key(1), counting_fetcher(&calls)).await.unwrap(), 1);

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let cached = client.get_query_data::<usize>(&key(1)).await.unwrap();
        assert_eq!(*cached, 2);
    }

    #[tokio::test]
    async fn test_invalidated_entry_forces_network_read() {
        let client = QueryClient::new(QueryPolicy::fast());
        let calls = Arc::new(AtomicUsize::new(0));

        client.fetch(key(1), counting_fetcher(&calls)).await.unwrap();
        client.fetch(key(2), counting_fetcher(&calls)).await.unwrap();

        let affected = client.invalidate(&QueryFilter::Lists("posts")).await;
        assert_eq!(affected, 2);

        let after = client.fetch(key(1), counting_fetcher(&calls)).await.unwrap();
        assert_eq!(*after, 3);
    }

    #[tokio::test]
    async fn test_transient_errors_retry_up_to_limit() {
        let client = QueryClient::new(QueryPolicy::fast());
        let calls = Arc::new(AtomicUsize::new(0));

        let failing = {
            let calls = Arc::clone(&calls);
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<usize, _>(AppError::from_status(503, None)) }.boxed()
            }
        };

        let result = client.fetch(key(1), failing).await;
        assert!(matches!(result, Err(AppError::Server { status: 503, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_retried() {
        let client = QueryClient::new(QueryPolicy::fast());
        let calls = Arc::new(AtomicUsize::new(0));

        let failing = {
            let calls = Arc::clone(&calls);
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err::<usize, _>(AppError::from_status(401, None)) }.boxed()
            }
        };

        let result = client.fetch(key(1), failing).await;
        assert!(result.unwrap_err().is_unauthorized());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_no_value() {
        let client = QueryClient::new(QueryPolicy::fast());
        let result = client
            .fetch(key(1), || async { Err::<usize, _>(AppError::Validation("bad".into())) })
            .await;
        assert!(result.is_err());
        assert!(client.get_query_data::<usize>(&key(1)).await.is_none());
    }

    #[tokio::test]
    async fn test_idle_entries_are_pruned() {
        let policy = QueryPolicy {
            cache_time: Duration::from_millis(10),
            ..QueryPolicy::fast()
        };
        let client = QueryClient::new(policy);
        let calls = Arc::new(AtomicUsize::new(0));

        client.fetch(key(1), counting_fetcher(&calls)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        client.fetch(key(2), counting_fetcher(&calls)).await.unwrap();

        assert!(client.get_query_data::<usize>(&key(1)).await.is_none());
        assert_eq!(client.len().await, 1);
    }

    #[tokio::test]
    async fn test_clear_and_remove() {
        let client = QueryClient::new(QueryPolicy::fast());
        let calls = Arc::new(AtomicUsize::new(0));
        client.fetch(key(1), counting_fetcher(&calls)).await.unwrap();
        client
            .fetch(QueryKey::detail("posts", "p1"), counting_fetcher(&calls))
            .await
            .unwrap();

        assert_eq!(
            client
                .remove(&QueryFilter::Detail("posts", "p1".into()))
                .await,
            1
        );
        client.clear().await;
        assert!(client.is_empty().await);
    }

    #[tokio::test]
    async fn test_fetch_from_before_clear_does_not_fill_new_session() {
        let client = QueryClient::new(QueryPolicy::fast());
        let users = QueryKey::list("users", QueryPayload::default());
        let calls = Arc::new(AtomicUsize::new(0));

        let delayed = |label: &'static str, ms: u64, calls: &Arc<AtomicUsize>| {
            let calls = Arc::clone(calls);
            move || {
                calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    tokio::time::sleep(Duration::from_millis(ms)).await;
                    Ok::<_, AppError>(label.to_string())
                }
                .boxed()
            }
        };

        let old_session = tokio::spawn({
            let client = client.clone();
            let fetcher = delayed("admin-data", 50, &calls);
            let users = users.clone();
            async move { client.fetch(users, fetcher).await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        client.clear().await;

        let new_session = tokio::spawn({
            let client = client.clone();
            let fetcher = delayed("operator-data", 200, &calls);
            let users = users.clone();
            async move { client.fetch(users, fetcher).await }
        });

        // the old fetch still resolves for its own caller
        assert_eq!(old_session.await.unwrap().unwrap().as_str(), "admin-data");
        assert!(client.get_query_data::<String>(&users).await.is_none());

        // a third reader joins the new fetch instead of seeing the old result
        let joined = client
            .fetch(users.clone(), delayed("unexpected", 0, &calls))
            .await
            .unwrap();
        assert_eq!(joined.as_str(), "operator-data");
        assert_eq!(new_session.await.unwrap().unwrap().as_str(), "operator-data");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
