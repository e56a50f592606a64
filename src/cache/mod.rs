//! Time-bounded shared cache with stale fallback
//!
//! A [`TtlCache`] holds at most one payload. Readers get it for free while it
//! is fresh; once it ages past the TTL the next reader triggers a reload
//! through the injected [`CacheLoader`]. A failed reload keeps serving the
//! previous payload, and a cache that never loaded successfully serves the
//! payload type's empty value.
//!
//! Concurrent readers in a stale window may each trigger a reload; the last
//! successful one wins. The lock is never held across the load itself.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::errors::UpstreamResult;
use crate::utils::time::{Clock, age_seconds};

/// Something a cache can hold and report the size of
pub trait CachePayload: Default + Send + Sync + 'static {
    fn item_count(&self) -> usize;
}

/// Produces a fresh payload; empty results should be reported as errors
#[async_trait]
pub trait CacheLoader<T>: Send + Sync {
    /// Short label used in logs
    fn name(&self) -> &str;

    async fn load(&self) -> UpstreamResult<T>;
}

/// A payload and the moment it was fetched
#[derive(Debug)]
pub struct CacheEntry<T> {
    pub payload: Arc<T>,
    pub fetched_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        now.signed_duration_since(self.fetched_at) < ttl
    }
}

/// Point-in-time view used by the status endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct CacheStatus {
    pub item_count: usize,
    pub fetched_at: Option<DateTime<Utc>>,
    pub age_seconds: f64,
}

pub struct TtlCache<T> {
    entry: RwLock<Option<CacheEntry<T>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    loader: Arc<dyn CacheLoader<T>>,
}

impl<T: CachePayload> TtlCache<T> {
    pub fn new(loader: Arc<dyn CacheLoader<T>>, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entry: RwLock::new(None),
            ttl,
            clock,
            loader,
        }
    }

    /// Current payload, reloading first when stale. Never fails.
    pub async fn get(&self) -> Arc<T> {
        let now = self.clock.now();
        let previous = {
            let guard = self.entry.read().await;
            match guard.as_ref() {
                Some(entry) if entry.is_fresh(now, self.ttl) => {
                    debug!(cache = self.loader.name(), "Serving cached payload");
                    return entry.payload.clone();
                }
                Some(entry) => Some(entry.payload.clone()),
                None => None,
            }
        };

        match self.loader.load().await {
            Ok(payload) => {
                let payload = Arc::new(payload);
                let count = payload.item_count();
                let mut guard = self.entry.write().await;
                *guard = Some(CacheEntry {
                    payload: payload.clone(),
                    fetched_at: self.clock.now(),
                });
                info!("{} cache refreshed: {} items", self.loader.name(), count);
                payload
            }
            Err(e) => match previous {
                Some(stale) => {
                    warn!(
                        "{} refresh failed, serving stale payload ({} items): {}",
                        self.loader.name(),
                        stale.item_count(),
                        e
                    );
                    stale
                }
                None => {
                    warn!("{} load failed with nothing cached: {}", self.loader.name(), e);
                    Arc::new(T::default())
                }
            },
        }
    }

    /// Size and age of whatever is cached, without triggering a load
    pub async fn status(&self) -> CacheStatus {
        let guard = self.entry.read().await;
        match guard.as_ref() {
            Some(entry) => CacheStatus {
                item_count: entry.payload.item_count(),
                fetched_at: Some(entry.fetched_at),
                age_seconds: age_seconds(self.clock.as_ref(), entry.fetched_at),
            },
            None => CacheStatus {
                item_count: 0,
                fetched_at: None,
                age_seconds: 0.0,
            },
        }
    }
}
