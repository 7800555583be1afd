//! Customer resource operations (the backend calls them users).

use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

use shopdeck_core::{Customer, CustomerId, Page, Role};

use super::{BackendClient, BackendError, envelope};

impl BackendClient {
    /// Fetch one page of customers.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the HTTP level.
    #[instrument(skip(self))]
    pub async fn list_customers(
        &self,
        page: u32,
        size: u32,
    ) -> Result<Page<Customer>, BackendError> {
        let value: Value = self
            .get_json(
                "/v1/users",
                &[("page", page.to_string()), ("size", size.to_string())],
            )
            .await?;

        Ok(envelope::normalize_page(value, "users"))
    }

    /// Change a customer's role.
    ///
    /// The backend expects both the id and the role repeated as query
    /// parameters: `PATCH /v1/users/{id}/role?id=&role=`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// change.
    #[instrument(skip(self), fields(customer_id = %id, role = %role))]
    pub async fn change_customer_role(
        &self,
        id: &CustomerId,
        role: Role,
    ) -> Result<Customer, BackendError> {
        let builder = self
            .request(Method::PATCH, &format!("/v1/users/{id}/role"))
            .await?
            .query(&[("id", id.as_str()), ("role", role.as_str())]);

        self.send_json(builder).await
    }
}
