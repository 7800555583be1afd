//! Category lookups.

use serde_json::Value;
use tracing::instrument;

use shopdeck_core::Category;

use super::{BackendClient, BackendError, envelope};

impl BackendClient {
    /// Fetch all categories.
    ///
    /// The categories endpoint is the worst envelope offender - it has
    /// been observed returning a bare array, `{"categories": [...]}`,
    /// and a page object. All are accepted; anything else degrades to
    /// an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the HTTP level.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, BackendError> {
        let value: Value = self.get_json("/v1/categories", &[]).await?;
        Ok(envelope::normalize_list(value, "categories"))
    }
}
