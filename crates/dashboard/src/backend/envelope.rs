//! Defensive normalization of heterogeneous list envelopes.
//!
//! Depending on the endpoint (and backend version), a list response may
//! arrive as:
//!
//! 1. a bare JSON array - `[{...}, {...}]`
//! 2. a Spring-style page object - `{"content": [...], "totalPages": ...}`
//! 3. an object keyed by resource name - `{"products": [...]}`
//!
//! Decode attempts run in priority order against these known shapes.
//! When nothing matches, the result degrades to an empty page and the
//! anomaly is logged.

use serde::de::DeserializeOwned;
use serde_json::Value;

use shopdeck_core::Page;

/// Normalize a list response into a `Page<T>`.
///
/// `resource` is the field name to look for in keyed envelopes
/// (e.g. `"products"`). A bare array is wrapped as a single full page.
#[must_use]
pub fn normalize_page<T: DeserializeOwned>(value: Value, resource: &str) -> Page<T> {
    match decode(value, resource) {
        Ok(page) => page,
        Err(raw) => {
            tracing::warn!(
                resource,
                shape = %shape_of(&raw),
                "Unrecognized list envelope, degrading to empty page"
            );
            Page::empty(0)
        }
    }
}

/// Normalize a list response into a plain vector, for unpaged endpoints
/// such as `/v1/categories`.
#[must_use]
pub fn normalize_list<T: DeserializeOwned>(value: Value, resource: &str) -> Vec<T> {
    normalize_page(value, resource).content
}

fn decode<T: DeserializeOwned>(value: Value, resource: &str) -> Result<Page<T>, Value> {
    // Shape 1: bare array.
    if value.is_array() {
        return decode_items(value.clone()).map(Page::from_full).ok_or(value);
    }

    let Value::Object(ref object) = value else {
        return Err(value);
    };

    // Shape 2: already a page object.
    if object.get("content").is_some_and(Value::is_array)
        && let Ok(page) = serde_json::from_value::<Page<T>>(value.clone())
    {
        return Ok(page);
    }

    // Shape 3: keyed by resource name.
    if let Some(nested) = object.get(resource).filter(|v| v.is_array())
        && let Some(items) = decode_items(nested.clone())
    {
        return Ok(Page::from_full(items));
    }

    Err(value)
}

fn decode_items<T: DeserializeOwned>(value: Value) -> Option<Vec<T>> {
    serde_json::from_value(value).ok()
}

fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use shopdeck_core::Category;

    use super::*;

    #[test]
    fn test_bare_array_wraps_as_full_page() {
        let value = json!([
            {"id": "c-1", "name": "kitchen"},
            {"id": "c-2", "name": "garden"}
        ]);
        let page: Page<Category> = normalize_page(value, "categories");
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.number, 0);
    }

    #[test]
    fn test_paged_object_passes_through() {
        let value = json!({
            "content": [{"id": "c-1", "name": "kitchen"}],
            "totalPages": 3,
            "totalElements": 25,
            "number": 1,
            "size": 10
        });
        let page: Page<Category> = normalize_page(value, "categories");
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 25);
        assert_eq!(page.number, 1);
    }

    #[test]
    fn test_keyed_object_unwraps() {
        let value = json!({"categories": [{"id": "c-1", "name": "kitchen"}]});
        let page: Page<Category> = normalize_page(value, "categories");
        assert_eq!(page.content.len(), 1);
    }

    #[test]
    fn test_unrecognized_shape_degrades_to_empty() {
        let value = json!({"unexpected": true});
        let page: Page<Category> = normalize_page(value, "categories");
        assert!(page.is_empty());
        assert!(page.content.is_empty());

        let page: Page<Category> = normalize_page(json!("nonsense"), "categories");
        assert!(page.is_empty());
    }

    #[test]
    fn test_keyed_object_ignores_other_resource_names() {
        // A {products: [...]} envelope should not satisfy a categories
        // request.
        let value = json!({"products": [{"id": "c-1", "name": "kitchen"}]});
        let page: Page<Category> = normalize_page(value, "categories");
        assert!(page.is_empty());
    }
}
