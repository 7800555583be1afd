//! HTTP plumbing shared by all resource modules.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::session::SessionStore;

use super::BackendError;

/// Requests have no contractual timeout; this is a defensive ceiling so
/// a hung backend can't wedge a screen forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the e-commerce REST backend.
///
/// Cheap to clone. Attaches `Authorization: Bearer <token>` from the
/// session store when a token is present; unauthenticated requests pass
/// through and rely on the backend to reject them.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Panics
    ///
    /// Panics if the reqwest client cannot be constructed, which only
    /// happens with a broken TLS backend at process start.
    #[must_use]
    pub fn new(base_url: Url, session: SessionStore) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url,
                session,
            }),
        }
    }

    /// Resolve a path against the configured base URL.
    ///
    /// The base may itself carry a path segment (e.g. `/api`), so join
    /// relative to it rather than replacing.
    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        let base = &self.inner.base_url;
        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| BackendError::Rejected("backend URL cannot be a base".into()))?;
            segments.pop_if_empty();
            for segment in path.trim_start_matches('/').split('/') {
                segments.push(segment);
            }
        }
        Ok(url)
    }

    /// Start a request with the bearer token attached when present.
    pub(super) async fn request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, BackendError> {
        let url = self.endpoint(path)?;
        let mut builder = self.inner.client.request(method, url);

        if let Some(token) = self.inner.session.token().await {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        Ok(builder)
    }

    /// Send a request and fail on non-2xx statuses.
    pub(super) async fn send(&self, builder: RequestBuilder) -> Result<Response, BackendError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Http { status, body });
        }

        Ok(response)
    }

    /// Send a request and decode the JSON body.
    ///
    /// Reads the body as text first so decode failures can be logged
    /// with context instead of a bare serde error.
    pub(super) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = self.send(builder).await?;
        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to decode backend response"
            );
            BackendError::Parse(e)
        })
    }

    /// Convenience: GET a path with query parameters and decode.
    pub(super) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, BackendError> {
        let builder = self.request(Method::GET, path).await?.query(query);
        self.send_json(builder).await
    }

    /// DELETE a path, discarding any response body.
    pub(super) async fn delete(&self, path: &str) -> Result<(), BackendError> {
        let builder = self.request(Method::DELETE, path).await?;
        self.send(builder).await?;
        Ok(())
    }

    /// True when the failure is a plain 404.
    #[must_use]
    pub fn is_not_found(err: &BackendError) -> bool {
        err.status() == Some(StatusCode::NOT_FOUND)
    }
}
