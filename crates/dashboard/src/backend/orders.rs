//! Order resource operations.
//!
//! Unlike the other resources, the orders endpoints wrap their payloads
//! in the `ApiResponse` envelope.

use reqwest::Method;
use tracing::instrument;

use shopdeck_core::{ApiResponse, Order, OrderId, OrderStatus, Page};

use super::{BackendClient, BackendError};

impl BackendClient {
    /// Fetch one page of orders.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rejected` when the envelope reports
    /// failure, or an HTTP-level error.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, page: u32, size: u32) -> Result<Page<Order>, BackendError> {
        let response: ApiResponse<Page<Order>> = self
            .get_json(
                "/v1/orders",
                &[("page", page.to_string()), ("size", size.to_string())],
            )
            .await?;

        response.into_data().map_err(BackendError::Rejected)
    }

    /// Change an order's status.
    ///
    /// The backend expects the new status as a query parameter:
    /// `PATCH /v1/orders/{id}/status?status=SHIPPED`.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rejected` when the envelope reports
    /// failure, or an HTTP-level error.
    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    pub async fn change_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, BackendError> {
        let builder = self
            .request(Method::PATCH, &format!("/v1/orders/{id}/status"))
            .await?
            .query(&[("status", status.as_str())]);

        let response: ApiResponse<Order> = self.send_json(builder).await?;
        response.into_data().map_err(BackendError::Rejected)
    }
}
