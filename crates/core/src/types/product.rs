//! Product, category, and product image records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ImageId, ProductId};

/// A product as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub category: String,
    /// Units in stock.
    #[serde(default)]
    pub quantity: u32,
    /// Image URLs or base64 payloads, when the backend inlines them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

/// A single product image, fetched from `/v1/products/{id}/images`.
///
/// `image_data` is a base64-encoded raster image which may or may not
/// already carry a `data:` URI prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: ImageId,
    pub product_id: ProductId,
    pub image_data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ProductImage {
    /// Render the image as a `data:` URI without double-prefixing.
    ///
    /// Backends are inconsistent about whether `image_data` already
    /// carries the scheme, so detect before prepending.
    #[must_use]
    pub fn as_data_uri(&self) -> String {
        if self.image_data.starts_with("data:") {
            self.image_data.clone()
        } else {
            format!("data:image/jpeg;base64,{}", self.image_data)
        }
    }
}

/// A product category, from `/v1/categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
