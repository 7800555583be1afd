//! Authentication endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use shopdeck_core::{Role, UserProfile};

use super::{BackendClient, BackendError};

/// Response from `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
    pub role: Role,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl LoginResponse {
    /// Derive the user profile carried alongside the token.
    #[must_use]
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.user_id.clone(),
            role: self.role,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl BackendClient {
    /// Authenticate against the backend.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Http` with status 401 for bad credentials.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, BackendError> {
        let builder = self
            .request(Method::POST, "/auth/login")
            .await?
            .json(&LoginRequest { email, password });

        self.send_json(builder).await
    }

    /// Fetch the profile of the currently authenticated user.
    ///
    /// # Errors
    ///
    /// Returns an error if unauthenticated or the request fails.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<UserProfile, BackendError> {
        let builder = self.request(Method::GET, "/auth/user").await?;
        self.send_json(builder).await
    }
}
