//! Client-side form validation.
//!
//! Validation errors block submission and surface per-field; they never
//! reach the backend. Image intake is deliberately lenient: oversized or
//! non-image files are filtered out and counted, not rejected wholesale.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum number of images attached to one product.
pub const MAX_IMAGES_PER_PRODUCT: usize = 10;
/// Maximum size of a single image, in bytes (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// A single field-level constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Form validation failed; carries one entry per violated field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed: {}", format_fields(.0))]
pub struct ValidationError(pub Vec<FieldError>);

fn format_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Product create/update form fields, before submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub quantity: u32,
}

impl ProductForm {
    /// Validate all field constraints at once.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` listing every violated field, so the
    /// caller can surface them inline together.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = Vec::new();

        let name_len = self.name.trim().chars().count();
        if !(2..=20).contains(&name_len) {
            errors.push(FieldError {
                field: "name",
                message: "must be between 2 and 20 characters".into(),
            });
        }

        let description_len = self.description.trim().chars().count();
        if !(10..=200).contains(&description_len) {
            errors.push(FieldError {
                field: "description",
                message: "must be between 10 and 200 characters".into(),
            });
        }

        if self.price <= Decimal::ZERO {
            errors.push(FieldError {
                field: "price",
                message: "must be a positive number".into(),
            });
        }

        if self.category.trim().is_empty() {
            errors.push(FieldError {
                field: "category",
                message: "please select a category".into(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError(errors))
        }
    }
}

/// Validate login form fields before calling the backend.
///
/// # Errors
///
/// Returns a `ValidationError` for a malformed email or a password
/// shorter than 6 characters.
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    let email = email.trim();
    // Minimal structural check - the backend is the authority.
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !well_formed {
        errors.push(FieldError {
            field: "email",
            message: "invalid email address".into(),
        });
    }

    if password.trim().chars().count() < 6 {
        errors.push(FieldError {
            field: "password",
            message: "password must be at least 6 characters".into(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError(errors))
    }
}

/// A file attached to a product form, before intake filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Result of filtering a batch of image uploads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageIntake {
    /// Files that passed the size/mimetype/count checks, in upload order.
    pub accepted: Vec<ImageUpload>,
    /// How many files were discarded. Reported to the caller, not fatal.
    pub rejected: usize,
}

/// Filter a batch of uploads down to acceptable images.
///
/// Order is preserved so the backend receives files in upload order.
/// Oversized files, non-image mimetypes, and anything beyond the
/// 10-image cap are dropped and counted.
#[must_use]
pub fn filter_images(uploads: Vec<ImageUpload>) -> ImageIntake {
    let total = uploads.len();
    let accepted: Vec<ImageUpload> = uploads
        .into_iter()
        .filter(|u| u.content_type.starts_with("image/") && u.bytes.len() <= MAX_IMAGE_BYTES)
        .take(MAX_IMAGES_PER_PRODUCT)
        .collect();

    ImageIntake {
        rejected: total - accepted.len(),
        accepted,
    }
}
