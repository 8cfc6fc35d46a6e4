//! Cached "supported batch actions" lookup.
//!
//! The first caller starts the request; callers arriving while it is in
//! flight await the same shared future, so any number of concurrent table
//! mounts cost one request. Success is cached until [`invalidate`];
//! failures are not cached.
//!
//! [`invalidate`]: BatchActionsCache::invalidate

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;

use crate::application::client::ApiError;
use crate::application::dto::SupportedBatchActions;
use crate::application::services::AdminService;

type FetchResult = Result<Arc<SupportedBatchActions>, ApiError>;
type Fetcher = Arc<dyn Fn() -> BoxFuture<'static, Result<SupportedBatchActions, ApiError>> + Send + Sync>;

enum CacheState {
    Empty,
    InFlight(Shared<BoxFuture<'static, FetchResult>>),
    Ready(Arc<SupportedBatchActions>),
}

pub struct BatchActionsCache {
    fetch: Fetcher,
    state: Mutex<CacheState>,
}

impl BatchActionsCache {
    pub fn new<F>(fetch: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, Result<SupportedBatchActions, ApiError>> + Send + Sync + 'static,
    {
        Self {
            fetch: Arc::new(fetch),
            state: Mutex::new(CacheState::Empty),
        }
    }

    /// Cache backed by `AdminService::supported_batch_actions`.
    pub fn from_service(service: Arc<dyn AdminService>) -> Self {
        Self::new(move || {
            let service = service.clone();
            async move { service.supported_batch_actions().await }.boxed()
        })
    }

    pub async fn get(&self) -> FetchResult {
        let pending = {
            let mut state = self.state.lock();
            let existing = match &*state {
                CacheState::Ready(actions) => return Ok(actions.clone()),
                CacheState::InFlight(pending) => Some(pending.clone()),
                CacheState::Empty => None,
            };
            existing.unwrap_or_else(|| {
                let pending = (self.fetch)()
                    .map(|result| result.map(Arc::new))
                    .boxed()
                    .shared();
                *state = CacheState::InFlight(pending.clone());
                pending
            })
        };

        let result = pending.clone().await;

        let mut state = self.state.lock();
        // An invalidate() during the fetch replaced the state; leave it alone.
        if let CacheState::InFlight(current) = &*state {
            if current.ptr_eq(&pending) {
                *state = match &result {
                    Ok(actions) => CacheState::Ready(actions.clone()),
                    Err(err) => {
                        tracing::warn!(error = %err, "Failed to load supported batch actions");
                        CacheState::Empty
                    }
                };
            }
        }
        result
    }

    /// Cached value without triggering a fetch.
    pub fn cached(&self) -> Option<Arc<SupportedBatchActions>> {
        match &*self.state.lock() {
            CacheState::Ready(actions) => Some(actions.clone()),
            _ => None,
        }
    }

    pub fn invalidate(&self) {
        *self.state.lock() = CacheState::Empty;
    }
}
