use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::Mutex;

use crate::core::error::{AppError, Result};

/// How the observer asks its source for data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Go through the cache's freshness rules
    Cached,
    /// Bypass freshness and hit the network
    Refetch,
}

pub type ObserverFetch<P, T> =
    Arc<dyn Fn(P, FetchMode) -> BoxFuture<'static, Result<Arc<T>>> + Send + Sync>;

/// Snapshot of what a UI bound to a query should render
#[derive(Debug)]
pub struct QueryState<T> {
    pub data: Option<Arc<T>>,
    pub error: Option<AppError>,
    /// Fetching with nothing at all to show
    pub is_loading: bool,
    /// Any fetch outstanding, including background ones
    pub is_fetching: bool,
    /// `data` belongs to the previous parameters while the new ones load
    pub is_placeholder_data: bool,
}

impl<T> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            error: self.error.clone(),
            is_loading: self.is_loading,
            is_fetching: self.is_fetching,
            is_placeholder_data: self.is_placeholder_data,
        }
    }
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: false,
            is_fetching: false,
            is_placeholder_data: false,
        }
    }
}

struct ObserverInner<P, T> {
    params: Option<P>,
    state: QueryState<T>,
    /// Sequence of the latest request; older completions are ignored
    seq: u64,
}

/// A component's live binding to one query (`{data, isLoading, error, refetch}`).
///
/// While a new parameter set loads, the previous result stays visible and is
/// flagged as placeholder data, so paginated views do not flash empty.
pub struct QueryObserver<P, T> {
    fetch: ObserverFetch<P, T>,
    inner: Arc<Mutex<ObserverInner<P, T>>>,
}

impl<P, T> Clone for QueryObserver<P, T> {
    fn clone(&self) -> Self {
        Self {
            fetch: Arc::clone(&self.fetch),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P, T> QueryObserver<P, T>
where
    P: Clone + PartialEq + Send + 'static,
    T: Send + Sync + 'static,
{
    pub fn new(fetch: ObserverFetch<P, T>) -> Self {
        Self {
            fetch,
            inner: Arc::new(Mutex::new(ObserverInner {
                params: None,
                state: QueryState::default(),
                seq: 0,
            })),
        }
    }

    /// Current snapshot, safe to call while a fetch is outstanding
    pub async fn state(&self) -> QueryState<T> {
        self.inner.lock().await.state.clone()
    }

    /// Point the observer at `params` and wait for the result
    pub async fn set_params(&self, params: P) -> QueryState<T> {
        self.run(Some(params), FetchMode::Cached).await
    }

    /// Re-request the current parameters from the network
    pub async fn refetch(&self) -> QueryState<T> {
        self.run(None, FetchMode::Refetch).await
    }

    async fn run(&self, params: Option<P>, mode: FetchMode) -> QueryState<T> {
        let (params, seq) = {
            let mut inner = self.inner.lock().await;
            let params = match params.or_else(|| inner.params.clone()) {
                Some(p) => p,
                None => return inner.state.clone(),
            };

            let changed = inner.params.as_ref() != Some(&params);
            inner.params = Some(params.clone());
            inner.seq += 1;
            inner.state.is_fetching = true;
            inner.state.is_loading = inner.state.data.is_none();
            if changed && inner.state.data.is_some() {
                inner.state.is_placeholder_data = true;
            }
            (params, inner.seq)
        };

        let result = (self.fetch)(params, mode).await;

        let mut inner = self.inner.lock().await;
        if inner.seq != seq {
            // a newer request owns the state now
            return inner.state.clone();
        }

        inner.state.is_fetching = false;
        inner.state.is_loading = false;
        match result {
            Ok(data) => {
                inner.state.data = Some(data);
                inner.state.error = None;
                inner.state.is_placeholder_data = false;
            }
            Err(e) => {
                tracing::debug!("Observed query failed: {}", e);
                inner.state.error = Some(e);
            }
        }
        inner.state.clone()
    }
}
