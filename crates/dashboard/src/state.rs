//! Application state shared across handlers.

use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::backend::BackendClient;
use crate::cache::QueryCache;
use crate::config::DashboardConfig;
use crate::controller::Screens;
use crate::session::SessionStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to the backend client,
/// the query cache, the session store, and the per-screen controllers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DashboardConfig,
    session: SessionStore,
    backend: BackendClient,
    cache: QueryCache,
    verifier: TokenVerifier,
    screens: Screens,
}

impl AppState {
    /// Create a new application state from configuration.
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        let session = SessionStore::new();
        let backend = BackendClient::new(config.backend_url.clone(), session.clone());
        let cache = QueryCache::new();
        let verifier = TokenVerifier::new(&config.jwt_secret);
        let screens = Screens::new(
            backend.clone(),
            cache.clone(),
            config.page_size,
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                session,
                backend,
                cache,
                verifier,
                screens,
            }),
        }
    }

    /// Get a reference to the dashboard configuration.
    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    /// Get a reference to the session store.
    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// Get a reference to the backend API client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }

    /// Get a reference to the query cache.
    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.inner.cache
    }

    /// Get a reference to the token verifier.
    #[must_use]
    pub fn verifier(&self) -> &TokenVerifier {
        &self.inner.verifier
    }

    /// Get a reference to the per-screen list controllers.
    #[must_use]
    pub fn screens(&self) -> &Screens {
        &self.inner.screens
    }
}
