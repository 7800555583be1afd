//! Per-screen paginated list controllers.
//!
//! Every list screen (products, orders, customers) repeats the same
//! design: own a page index and filter state, fetch pages through the
//! query cache, expose a derived view-model, and re-issue the fetch
//! when a matching invalidation is published. [`ListController`] is
//! that pattern, generic over a [`PageFetcher`].
//!
//! # Ordering
//!
//! Loads carry a generation number. If the user navigates again before
//! the previous page's response arrives, the stale response resolving
//! later is discarded rather than applied - last-issued-wins, not
//! last-resolved-wins. A discarded load is not an error.

mod screens;

pub use screens::{CustomersScreen, OrdersScreen, ProductsScreen, Screens};

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use shopdeck_core::Page;

use crate::backend::BackendError;
use crate::cache::{QueryCache, QueryKey};

/// Screen filter state. `BTreeMap` so cache keys are deterministic.
pub type Filters = BTreeMap<String, String>;

/// Fetches one page of a resource. Implemented per screen.
pub trait PageFetcher: Send + Sync + 'static {
    /// The row type of this screen.
    type Item: Serialize + DeserializeOwned + Clone + Send + Sync + 'static;

    /// Resource name - doubles as the cache key prefix this screen
    /// subscribes to.
    fn resource(&self) -> &'static str;

    /// Issue the page fetch against the backend.
    fn fetch(
        &self,
        page: u32,
        size: u32,
        filters: &Filters,
    ) -> impl Future<Output = Result<Page<Self::Item>, BackendError>> + Send;
}

/// Derived view-model handed to the rendering layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
    pub total_elements: u64,
    pub page_index: u32,
    pub page_size: u32,
    pub filters: Filters,
    pub is_loading: bool,
    pub is_error: bool,
}

impl<T> ListView<T> {
    /// Map the row type, keeping the paging state untouched.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ListView<U> {
        ListView {
            items: self.items.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_elements: self.total_elements,
            page_index: self.page_index,
            page_size: self.page_size,
            filters: self.filters,
            is_loading: self.is_loading,
            is_error: self.is_error,
        }
    }

    fn initial(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total_pages: 0,
            total_elements: 0,
            page_index: 0,
            page_size,
            filters: Filters::new(),
            is_loading: false,
            is_error: false,
        }
    }
}

struct ControllerState<T> {
    page_index: u32,
    filters: Filters,
    view: ListView<T>,
    /// Whether at least one load has completed successfully, i.e.
    /// whether `view.total_pages` is meaningful for clamping.
    loaded: bool,
}

/// State owner for one paginated list screen.
///
/// Cheap to clone; clones share state, mirroring a mounted screen that
/// several handlers talk to.
pub struct ListController<F: PageFetcher> {
    inner: Arc<ControllerInner<F>>,
}

impl<F: PageFetcher> Clone for ListController<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ControllerInner<F: PageFetcher> {
    fetcher: F,
    cache: QueryCache,
    page_size: u32,
    state: RwLock<ControllerState<F::Item>>,
    generation: AtomicU64,
}

impl<F: PageFetcher> ListController<F> {
    #[must_use]
    pub fn new(fetcher: F, cache: QueryCache, page_size: u32) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                fetcher,
                cache,
                page_size,
                state: RwLock::new(ControllerState {
                    page_index: 0,
                    filters: Filters::new(),
                    view: ListView::initial(page_size),
                    loaded: false,
                }),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// The cache key prefix this screen lives under.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        self.inner.fetcher.resource()
    }

    /// Load the current page through the cache and update the view.
    ///
    /// Safe to call repeatedly - a cached page costs no network call.
    /// If a newer load was issued meanwhile, this one's result is
    /// discarded silently.
    pub async fn load(&self) -> ListView<F::Item> {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let (page_index, filters) = {
            let mut state = self.inner.state.write().await;
            state.view.is_loading = true;
            (state.page_index, state.filters.clone())
        };

        let key = QueryKey::page(
            self.inner.fetcher.resource(),
            page_index,
            self.inner.page_size,
            filters.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        );

        let fetcher = &self.inner.fetcher;
        let size = self.inner.page_size;
        let result = self
            .inner
            .cache
            .query(key, || fetcher.fetch(page_index, size, &filters))
            .await;

        let mut state = self.inner.state.write().await;

        // A newer load was issued while this one was in flight; its
        // result must not overwrite newer state.
        if self.inner.generation.load(Ordering::SeqCst) != generation {
            return state.view.clone();
        }

        match result {
            Ok(page) => {
                state.view = ListView {
                    items: page.content,
                    total_pages: page.total_pages,
                    total_elements: page.total_elements,
                    page_index,
                    page_size: self.inner.page_size,
                    filters,
                    is_loading: false,
                    is_error: false,
                };
                state.loaded = true;
            }
            Err(e) => {
                tracing::warn!(
                    resource = self.inner.fetcher.resource(),
                    page = page_index,
                    error = %e,
                    "Page load failed"
                );
                state.view.is_loading = false;
                state.view.is_error = true;
            }
        }

        state.view.clone()
    }

    /// Navigate to a page, clamped to the known range.
    ///
    /// Out-of-range requests are a no-op: no state change, no fetch.
    /// The range is only known after a successful load, so navigation
    /// ahead of the first load is also a no-op (other than page 0).
    pub async fn set_page(&self, index: i64) -> ListView<F::Item> {
        {
            // Check and update under one write lock so a concurrent
            // filter change can't shrink the range between them.
            let mut state = self.inner.state.write().await;

            let in_range = index >= 0
                && state.loaded
                && state.view.total_elements > 0
                && index < i64::from(state.view.total_pages);
            let unchanged = index == i64::from(state.page_index);

            if !in_range || unchanged {
                return state.view.clone();
            }

            // index fits u32 because it is below total_pages.
            state.page_index = u32::try_from(index).unwrap_or(0);
        }

        self.load().await
    }

    /// Navigate to the next page (clamped).
    pub async fn next_page(&self) -> ListView<F::Item> {
        let current = i64::from(self.inner.state.read().await.page_index);
        self.set_page(current + 1).await
    }

    /// Navigate to the previous page (clamped).
    pub async fn prev_page(&self) -> ListView<F::Item> {
        let current = i64::from(self.inner.state.read().await.page_index);
        self.set_page(current - 1).await
    }

    /// Set or clear a filter. Any change resets the page index to 0 so
    /// a narrower result set can't leave the screen on an out-of-range
    /// page. Unchanged values are a no-op.
    pub async fn set_filter(&self, name: &str, value: Option<&str>) -> ListView<F::Item> {
        {
            let mut state = self.inner.state.write().await;

            let changed = match value {
                Some(v) => state.filters.get(name).map(String::as_str) != Some(v),
                None => state.filters.contains_key(name),
            };
            if !changed {
                return state.view.clone();
            }

            match value {
                Some(v) => {
                    state.filters.insert(name.to_string(), v.to_string());
                }
                None => {
                    state.filters.remove(name);
                }
            }
            state.page_index = 0;
        }

        self.load().await
    }

    /// Current view-model without triggering a fetch.
    pub async fn view(&self) -> ListView<F::Item> {
        self.inner.state.read().await.view.clone()
    }

    /// React to a published invalidation: refetch the current page when
    /// the prefix matches this screen's resource.
    pub async fn handle_invalidation(&self, prefix: &str) {
        if self.prefix().starts_with(prefix) {
            self.load().await;
        }
    }

    /// Spawn a background task that refetches on matching invalidation
    /// events - the push half of the refetch-on-invalidate contract
    /// (the pull half is that `load` goes through the cache).
    pub fn spawn_invalidation_watcher(&self) -> tokio::task::JoinHandle<()> {
        let controller = self.clone();
        let mut events = self.inner.cache.subscribe();

        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(invalidation) => {
                        controller.handle_invalidation(&invalidation.prefix).await;
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => {
                        // Missed events; the conservative reaction is a
                        // refetch.
                        controller.load().await;
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}
