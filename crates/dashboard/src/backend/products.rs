//! Product resource operations.

use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::instrument;

use shopdeck_core::{ImageUpload, Page, Product, ProductForm, ProductId, ProductImage};

use super::{BackendClient, BackendError, envelope};

impl BackendClient {
    /// Fetch one page of products.
    ///
    /// Tolerates every known envelope shape; an unrecognized response
    /// degrades to an empty page (logged, not an error).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the HTTP level.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        page: u32,
        size: u32,
        category: Option<&str>,
    ) -> Result<Page<Product>, BackendError> {
        let mut query = vec![("page", page.to_string()), ("size", size.to_string())];
        if let Some(category) = category {
            query.push(("category", category.to_string()));
        }
        let value: Value = self.get_json("/v1/products", &query).await?;

        Ok(envelope::normalize_page(value, "products"))
    }

    /// Fetch a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Http` with status 404 if the product does
    /// not exist.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, BackendError> {
        let builder = self
            .request(Method::GET, &format!("/v1/products/{id}"))
            .await?;
        self.send_json(builder).await
    }

    /// Create a product.
    ///
    /// Scalar fields are stringified into a multipart form; image files
    /// are attached under the repeated `images` field in upload order so
    /// the backend receives them as an ordered sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// payload. The caller is expected to have validated `form` and
    /// filtered `images` already.
    #[instrument(skip(self, form, images), fields(image_count = images.len()))]
    pub async fn create_product(
        &self,
        form: &ProductForm,
        images: Vec<ImageUpload>,
    ) -> Result<Product, BackendError> {
        let multipart = product_multipart(form, images)?;
        let builder = self
            .request(Method::POST, "/v1/products")
            .await?
            .multipart(multipart);
        self.send_json(builder).await
    }

    /// Update a product, replacing its scalar fields and appending any
    /// newly uploaded images.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// payload.
    #[instrument(skip(self, form, images), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: &ProductId,
        form: &ProductForm,
        images: Vec<ImageUpload>,
    ) -> Result<Product, BackendError> {
        let multipart = product_multipart(form, images)?;
        let builder = self
            .request(Method::PUT, &format!("/v1/products/{id}"))
            .await?
            .multipart(multipart);
        self.send_json(builder).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::Http` with status 404 when the product is
    /// already gone - deleting twice is surfaced, not swallowed.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), BackendError> {
        self.delete(&format!("/v1/products/{id}")).await
    }

    /// Fetch the images attached to a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the HTTP level.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product_images(
        &self,
        id: &ProductId,
    ) -> Result<Vec<ProductImage>, BackendError> {
        let value: Value = self
            .get_json(&format!("/v1/products/{id}/images"), &[])
            .await?;
        Ok(envelope::normalize_list(value, "images"))
    }
}

/// Build the multipart body for product create/update.
fn product_multipart(
    form: &ProductForm,
    images: Vec<ImageUpload>,
) -> Result<Form, BackendError> {
    let mut multipart = Form::new()
        .text("name", form.name.clone())
        .text("description", form.description.clone())
        .text("price", form.price.to_string())
        .text("quantity", form.quantity.to_string())
        .text("category", form.category.clone());

    for image in images {
        // The intake filter only admits image/* mimetypes, but a
        // malformed string would still fail mime parsing here.
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|e| BackendError::Rejected(format!("bad image mimetype: {e}")))?;
        multipart = multipart.part("images", part);
    }

    Ok(multipart)
}
