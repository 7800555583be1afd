//! Process-wide session/auth state.
//!
//! Holds the current bearer token and authenticated user profile. The
//! store is the single source of truth for the token: the login and
//! logout handlers and the route authorization gate are its only
//! writers; every other component (notably the backend client) only
//! reads it. This is what keeps the bearer-header channel and the `jwt`
//! cookie channel from drifting apart.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

use shopdeck_core::UserProfile;

/// An authenticated session: the backend-issued token plus the profile
/// derived from it at login.
#[derive(Clone)]
pub struct AuthSession {
    token: SecretString,
    profile: UserProfile,
}

impl AuthSession {
    #[must_use]
    pub fn new(token: SecretString, profile: UserProfile) -> Self {
        Self { token, profile }
    }

    /// The authenticated user's profile.
    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// The raw bearer token. Only the backend client should need this.
    #[must_use]
    pub fn token(&self) -> &str {
        self.token.expose_secret()
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"[REDACTED]")
            .field("profile", &self.profile)
            .finish()
    }
}

/// Shared session store. Cheap to clone; all clones see the same state.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<AuthSession>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a session after a successful login.
    pub async fn set(&self, session: AuthSession) {
        *self.inner.write().await = Some(session);
    }

    /// Clear the session (logout, or fail-closed token invalidation).
    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }

    /// Current bearer token, if authenticated.
    pub async fn token(&self) -> Option<String> {
        self.inner
            .read()
            .await
            .as_ref()
            .map(|s| s.token.expose_secret().to_string())
    }

    /// Current user profile, if authenticated.
    pub async fn profile(&self) -> Option<UserProfile> {
        self.inner.read().await.as_ref().map(|s| s.profile.clone())
    }
}

#[cfg(test)]
mod tests {
    use shopdeck_core::Role;

    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u-1".into(),
            role: Role::Admin,
            email: "ada@example.com".into(),
            first_name: "Ada".into(),
            last_name: "L".into(),
        }
    }

    #[tokio::test]
    async fn test_set_and_clear() {
        let store = SessionStore::new();
        assert!(store.token().await.is_none());

        store
            .set(AuthSession::new(SecretString::from("tok-1"), profile()))
            .await;
        assert_eq!(store.token().await.as_deref(), Some("tok-1"));
        assert_eq!(store.profile().await.map(|p| p.id), Some("u-1".to_string()));

        store.clear().await;
        assert!(store.token().await.is_none());
        assert!(store.profile().await.is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = AuthSession::new(SecretString::from("super-secret"), profile());
        let debug = format!("{session:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
