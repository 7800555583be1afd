//! Product screen handlers.
//!
//! Create and update accept multipart bodies: scalar form fields plus
//! repeated `images` file parts. Files that are not images or exceed
//! the per-file limit are discarded (reported in the response, not
//! fatal); at most ten survive, in upload order.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use shopdeck_core::{
    ImageUpload, Product, ProductForm, ProductId, filter_images,
};

use crate::backend::BackendClient;
use crate::controller::ListView;
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub category: Option<String>,
}

/// GET /dashboard/products
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListView<Product>>> {
    let screen = state.screens().products();

    screen
        .set_filter("category", query.category.as_deref())
        .await;
    if let Some(page) = query.page {
        screen.set_page(page).await;
    }

    Ok(Json(screen.load().await))
}

/// GET /dashboard/products/{id}
///
/// Single product, for the edit screen. Not cached; edit forms want
/// the freshest copy.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    match state.backend().get_product(&id).await {
        Ok(product) => Ok(Json(product)),
        Err(e) if BackendClient::is_not_found(&e) => Err(AppError::NotFound("product".into())),
        Err(e) => Err(e.into()),
    }
}

/// Response for create/update, carrying the discard count so the
/// client can tell the user some files were dropped.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWriteResponse {
    pub product: Product,
    pub rejected_images: usize,
}

/// POST /dashboard/products
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: Multipart,
) -> Result<(StatusCode, Json<ProductWriteResponse>)> {
    let (form, uploads) = read_product_form(body).await?;
    form.validate()?;

    let intake = filter_images(uploads);
    if intake.rejected > 0 {
        tracing::warn!(rejected = intake.rejected, "Discarded unusable image uploads");
    }

    let backend = state.backend().clone();
    let product = state
        .cache()
        .mutate(&["products", "categories"], async move {
            backend.create_product(&form, intake.accepted).await
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductWriteResponse {
            product,
            rejected_images: intake.rejected,
        }),
    ))
}

/// PUT /dashboard/products/{id}
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    body: Multipart,
) -> Result<Json<ProductWriteResponse>> {
    let (form, uploads) = read_product_form(body).await?;
    form.validate()?;

    let intake = filter_images(uploads);
    if intake.rejected > 0 {
        tracing::warn!(rejected = intake.rejected, "Discarded unusable image uploads");
    }

    let backend = state.backend().clone();
    let product = state
        .cache()
        .mutate(&["products", "categories"], async move {
            backend.update_product(&id, &form, intake.accepted).await
        })
        .await?;

    Ok(Json(ProductWriteResponse {
        product,
        rejected_images: intake.rejected,
    }))
}

/// DELETE /dashboard/products/{id}
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<StatusCode> {
    let backend = state.backend().clone();
    let result = state
        .cache()
        .mutate(&["products", "categories"], async move {
            backend.delete_product(&id).await
        })
        .await;

    match result {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) if BackendClient::is_not_found(&e) => {
            Err(AppError::NotFound("product".into()))
        }
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageView {
    pub id: String,
    pub data_uri: String,
}

/// GET /dashboard/products/{id}/images
#[instrument(skip(state))]
pub async fn images(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Vec<ImageView>>> {
    let images = state.backend().product_images(&id).await?;

    Ok(Json(
        images
            .iter()
            .map(|image| ImageView {
                id: image.id.to_string(),
                data_uri: image.as_data_uri(),
            })
            .collect(),
    ))
}

/// Pull the scalar fields and file parts out of a multipart body.
async fn read_product_form(
    mut body: Multipart,
) -> Result<(ProductForm, Vec<ImageUpload>)> {
    let mut name = None;
    let mut description = None;
    let mut price = None;
    let mut quantity = None;
    let mut category = None;
    let mut uploads = Vec::new();

    while let Some(field) = body
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let Some(field_name) = field.name().map(ToString::to_string) else {
            continue;
        };

        if field_name == "images" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("unreadable file part: {e}")))?;
            uploads.push(ImageUpload {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("unreadable field {field_name}: {e}")))?;

        match field_name.as_str() {
            "name" => name = Some(value),
            "description" => description = Some(value),
            "price" => {
                price = Some(value.parse::<Decimal>().map_err(|_| {
                    AppError::BadRequest(format!("price is not a number: {value}"))
                })?);
            }
            "quantity" => {
                quantity = Some(value.parse::<u32>().map_err(|_| {
                    AppError::BadRequest(format!("quantity is not a whole number: {value}"))
                })?);
            }
            "category" => category = Some(value),
            other => {
                tracing::debug!(field = other, "Ignoring unknown form field");
            }
        }
    }

    let form = ProductForm {
        name: name.ok_or_else(|| AppError::BadRequest("missing field: name".into()))?,
        description: description
            .ok_or_else(|| AppError::BadRequest("missing field: description".into()))?,
        price: price.ok_or_else(|| AppError::BadRequest("missing field: price".into()))?,
        quantity: quantity
            .ok_or_else(|| AppError::BadRequest("missing field: quantity".into()))?,
        category: category
            .ok_or_else(|| AppError::BadRequest("missing field: category".into()))?,
    };

    Ok((form, uploads))
}
