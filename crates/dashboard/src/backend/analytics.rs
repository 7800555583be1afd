//! Dashboard analytics: aggregated stats computed by the backend.
//!
//! All three endpoints wrap their payloads in the `ApiResponse`
//! envelope, like the orders endpoints do.

use tracing::instrument;

use shopdeck_core::{ApiResponse, DashboardOverview, ProductPerformance, SalesPoint, TrendPeriod};

use super::{BackendClient, BackendError};

impl BackendClient {
    /// Fetch the aggregated overview payload for the dashboard home.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rejected` when the envelope reports
    /// failure, or an HTTP-level error.
    #[instrument(skip(self))]
    pub async fn dashboard_overview(&self) -> Result<DashboardOverview, BackendError> {
        let response: ApiResponse<DashboardOverview> =
            self.get_json("/v1/dashboard", &[]).await?;
        response.into_data().map_err(BackendError::Rejected)
    }

    /// Fetch the sales trend at the given granularity, optionally
    /// bounded by ISO dates.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rejected` when the envelope reports
    /// failure, or an HTTP-level error.
    #[instrument(skip(self))]
    pub async fn sales_trend(
        &self,
        period: TrendPeriod,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<SalesPoint>, BackendError> {
        let mut query = vec![("period", period.as_str().to_string())];
        if let Some(start) = start_date {
            query.push(("startDate", start.to_string()));
        }
        if let Some(end) = end_date {
            query.push(("endDate", end.to_string()));
        }

        let response: ApiResponse<Vec<SalesPoint>> = self
            .get_json("/v1/dashboard/sales/trend", &query)
            .await?;
        response.into_data().map_err(BackendError::Rejected)
    }

    /// Fetch the best-selling products, optionally scoped to a period.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Rejected` when the envelope reports
    /// failure, or an HTTP-level error.
    #[instrument(skip(self))]
    pub async fn top_products(
        &self,
        limit: u32,
        period: Option<TrendPeriod>,
    ) -> Result<Vec<ProductPerformance>, BackendError> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(period) = period {
            query.push(("period", period.as_str().to_string()));
        }

        let response: ApiResponse<Vec<ProductPerformance>> = self
            .get_json("/v1/dashboard/sales/top-products", &query)
            .await?;
        response.into_data().map_err(BackendError::Rejected)
    }
}
