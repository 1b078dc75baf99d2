use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::Mutex;

use crate::core::error::{AppError, Result};

pub type MutationFn<I, O> = Arc<dyn Fn(I) -> BoxFuture<'static, Result<O>> + Send + Sync>;

/// A write operation bound to a component (`{mutateAsync, isPending, error}`).
///
/// Invalidation is the wrapped function's job and only happens on success.
/// Nothing here prevents duplicate submissions; callers disable their trigger
/// while `is_pending()` is true.
pub struct Mutation<I, O> {
    run: MutationFn<I, O>,
    pending: Arc<AtomicUsize>,
    last_error: Arc<Mutex<Option<AppError>>>,
}

impl<I, O> Clone for Mutation<I, O> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
            pending: Arc::clone(&self.pending),
            last_error: Arc::clone(&self.last_error),
        }
    }
}

impl<I, O> Mutation<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    pub fn new<F, Fut>(run: F) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O>> + Send + 'static,
    {
        Self {
            run: Arc::new(move |input| run(input).boxed()),
            pending: Arc::new(AtomicUsize::new(0)),
            last_error: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn mutate_async(&self, input: I) -> Result<O> {
        self.pending.fetch_add(1, Ordering::SeqCst);
        let result = (self.run)(input).await;
        self.pending.fetch_sub(1, Ordering::SeqCst);

        let mut last_error = self.last_error.lock().await;
        match &result {
            Ok(_) => *last_error = None,
            Err(e) => {
                tracing::warn!("Mutation failed: {}", e);
                *last_error = Some(e.clone());
            }
        }
        result
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    /// Error of the most recent call, cleared by the next success
    pub async fn error(&self) -> Option<AppError> {
        self.last_error.lock().await.clone()
    }

    pub async fn reset(&self) {
        *self.last_error.lock().await = None;
    }
}
