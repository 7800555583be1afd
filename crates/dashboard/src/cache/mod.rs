//! Process-wide cache of server-state queries.
//!
//! # Semantics
//!
//! - Entries are keyed by a deterministic composite of resource name and
//!   every parameter affecting the result ([`QueryKey`]).
//! - Concurrent queries for an identical key are coalesced: at most one
//!   network call is in flight per key at any instant (moka's
//!   `try_get_with`).
//! - `invalidate` drops every entry whose key starts with a prefix and
//!   publishes the prefix on a broadcast bus; mounted list controllers
//!   subscribed to a matching prefix re-issue their fetch.
//! - `mutate` runs a side-effecting operation and, on success only,
//!   invalidates a caller-supplied list of prefixes. There is no
//!   optimistic write to roll back; invalidation after success is the
//!   whole consistency story.
//! - Entries idle out after 5 minutes; errors are never cached.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::instrument;

use crate::backend::BackendError;

/// How long an untouched entry survives before garbage collection.
const IDLE_EVICTION: Duration = Duration::from_secs(300);
/// Upper bound on resident entries.
const MAX_ENTRIES: u64 = 1_000;
/// Invalidation bus capacity; lagging subscribers refetch anyway.
const BUS_CAPACITY: usize = 64;

/// Deterministic cache key: `resource:page=<n>:size=<s>[:k=v...]`.
///
/// Filters must be supplied in a stable order - callers use `BTreeMap`
/// iteration, which is already sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    /// Key for one page of a resource listing.
    #[must_use]
    pub fn page<'a>(
        resource: &str,
        page: u32,
        size: u32,
        filters: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut key = format!("{resource}:page={page}:size={size}");
        for (name, value) in filters {
            key.push_str(&format!(":{name}={value}"));
        }
        Self(key)
    }

    /// Key for a single entity or an unparameterized query.
    #[must_use]
    pub fn bare(resource: &str) -> Self {
        Self(resource.to_string())
    }

    /// Key for a non-paginated query with parameters.
    #[must_use]
    pub fn params<'a>(
        resource: &str,
        params: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut key = resource.to_string();
        for (name, value) in params {
            key.push_str(&format!(":{name}={value}"));
        }
        Self(key)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn matches(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

/// An invalidation event published after a mutation or explicit refresh.
#[derive(Debug, Clone)]
pub struct Invalidation {
    /// Key prefix, e.g. `"products"`. Every key starting with it is stale.
    pub prefix: String,
}

/// Shared query/mutation cache. Cheap to clone.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<QueryCacheInner>,
}

struct QueryCacheInner {
    entries: Cache<QueryKey, Value>,
    bus: broadcast::Sender<Invalidation>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    #[must_use]
    pub fn new() -> Self {
        let entries = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_idle(IDLE_EVICTION)
            .support_invalidation_closures()
            .build();
        let (bus, _) = broadcast::channel(BUS_CAPACITY);

        Self {
            inner: Arc::new(QueryCacheInner { entries, bus }),
        }
    }

    /// Fetch-through lookup.
    ///
    /// Returns the cached value for `key` or runs `fetcher` to populate
    /// it. Concurrent callers with the same key share a single fetch.
    /// Values are stored as JSON so heterogeneous resources share one
    /// cache; decode failures surface as `BackendError::Parse`.
    ///
    /// # Errors
    ///
    /// Propagates the fetcher's error. Errors are not cached - the next
    /// call retries.
    pub async fn query<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T, Arc<BackendError>>
    where
        T: serde::Serialize + serde::de::DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, BackendError>>,
    {
        let value = self
            .inner
            .entries
            .try_get_with(key, async {
                let fetched = fetcher().await?;
                serde_json::to_value(&fetched).map_err(BackendError::Parse)
            })
            .await?;

        serde_json::from_value(value)
            .map_err(|e| Arc::new(BackendError::Parse(e)))
    }

    /// Mark every entry under `prefix` stale and notify subscribers.
    #[instrument(skip(self))]
    pub fn invalidate(&self, prefix: &str) {
        let owned = prefix.to_string();
        if let Err(e) = self
            .inner
            .entries
            .invalidate_entries_if(move |key, _| key.matches(&owned))
        {
            // Only fails when invalidation closures are disabled.
            tracing::error!(error = %e, "Cache invalidation predicate rejected");
        }

        // No receivers is fine - nothing is mounted.
        let _ = self.inner.bus.send(Invalidation {
            prefix: prefix.to_string(),
        });
    }

    /// Run a mutation; on success invalidate the given key prefixes.
    ///
    /// On failure nothing is invalidated; there was no optimistic write,
    /// so prior state stays visible.
    ///
    /// # Errors
    ///
    /// Propagates the mutation's error untouched.
    pub async fn mutate<T, Fut>(
        &self,
        prefixes: &[&str],
        mutation: Fut,
    ) -> Result<T, BackendError>
    where
        Fut: Future<Output = Result<T, BackendError>>,
    {
        let result = mutation.await?;
        for prefix in prefixes {
            self.invalidate(prefix);
        }
        Ok(result)
    }

    /// Subscribe to invalidation events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Invalidation> {
        self.inner.bus.subscribe()
    }

    /// Whether a key currently has a live entry. Test/diagnostic aid.
    #[must_use]
    pub fn contains(&self, key: &QueryKey) -> bool {
        self.inner.entries.contains_key(key)
    }

    /// Force pending invalidations through. Test aid - moka applies
    /// predicate invalidation lazily.
    pub async fn sync(&self) {
        self.inner.entries.run_pending_tasks().await;
    }
}
