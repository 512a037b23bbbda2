//! The `{data, pagination}` wrapper the backend puts around every payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pagination block of a list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 0,
            total: 0,
            total_pages: 0,
        }
    }
}

impl Pagination {
    /// Pagination for a response that did not include one.
    pub fn single_page(len: usize, limit: u32) -> Self {
        Self {
            page: 1,
            limit: limit.max(len as u32),
            total: len as u64,
            total_pages: u32::from(len > 0),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
        }
    }
}

/// Pagination as sent; any field may be missing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct WirePagination {
    page: Option<u32>,
    limit: Option<u32>,
    total: Option<u64>,
    #[serde(alias = "pages")]
    total_pages: Option<u32>,
}

impl WirePagination {
    /// Missing fields come from the request limit and the page length.
    fn resolve(self, len: usize, limit: u32) -> Pagination {
        let limit = self.limit.filter(|l| *l > 0).unwrap_or(limit).max(1);
        let total = self.total.unwrap_or(len as u64);
        let total_pages = self
            .total_pages
            .unwrap_or_else(|| u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX));
        Pagination {
            page: self.page.unwrap_or(1).max(1),
            limit,
            total,
            total_pages,
        }
    }
}

#[derive(Deserialize)]
struct ListEnvelope<T> {
    data: Vec<T>,
    #[serde(default)]
    pagination: Option<WirePagination>,
}

/// Unwraps a list response.
///
/// Accepts `{data: [...], pagination}` and, for older endpoints, a bare array.
pub fn decode_page<T: DeserializeOwned>(value: Value, limit: u32) -> Result<Page<T>, String> {
    if value.is_array() {
        let items: Vec<T> = serde_json::from_value(value).map_err(|e| e.to_string())?;
        let pagination = Pagination::single_page(items.len(), limit);
        return Ok(Page { items, pagination });
    }
    let envelope: ListEnvelope<T> = serde_json::from_value(value).map_err(|e| e.to_string())?;
    let len = envelope.data.len();
    let pagination = match envelope.pagination {
        Some(wire) => wire.resolve(len, limit),
        None => Pagination::single_page(len, limit),
    };
    Ok(Page {
        items: envelope.data,
        pagination,
    })
}

/// Unwraps a single-item response: `{data: {...}}` or the bare object.
pub fn decode_item<T: DeserializeOwned>(value: Value) -> Result<T, String> {
    let inner = match value {
        Value::Object(mut map) if map.contains_key("data") => map.remove("data").unwrap_or_default(),
        other => other,
    };
    serde_json::from_value(inner).map_err(|e| e.to_string())
}

/// Pulls a human message out of an error body.
pub fn error_message(value: &Value) -> Option<String> {
    let text = value
        .get("message")
        .or_else(|| value.get("error"))
        .or_else(|| value.get("data").and_then(|d| d.get("message")))?;
    match text {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(_) => error_message(text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: String,
    }

    #[test]
    fn decodes_page_with_pagination() {
        let value = json!({
            "data": [{"id": "a"}, {"id": "b"}],
            "pagination": {"page": 2, "limit": 2, "total": 5, "totalPages": 3}
        });
        let page: Page<Row> = decode_page(value, 20).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.page, 2);
        assert!(page.pagination.has_next());
        assert!(page.pagination.has_prev());
    }

    #[test]
    fn missing_pagination_is_derived() {
        let page: Page<Row> = decode_page(json!({"data": [{"id": "a"}]}), 20).unwrap();
        assert_eq!(page.pagination.total, 1);
        assert_eq!(page.pagination.total_pages, 1);
        assert!(!page.pagination.has_next());
    }

    #[test]
    fn partial_pagination_is_completed() {
        let value = json!({"data": [{"id": "a"}], "pagination": {"page": 1, "total": 1}});
        let page: Page<Row> = decode_page(value, 20).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination.limit, 20);
        assert_eq!(page.pagination.total_pages, 1);

        let value = json!({"data": [{"id": "a"}], "pagination": {"page": 2, "total": 45}});
        let page: Page<Row> = decode_page(value, 20).unwrap();
        assert_eq!(page.pagination.total_pages, 3);
        assert!(page.pagination.has_next());

        let value = json!({"data": [], "pagination": {"pages": 4}});
        let page: Page<Row> = decode_page(value, 10).unwrap();
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.total_pages, 4);
    }

    #[test]
    fn bare_array_is_accepted() {
        let page: Page<Row> = decode_page(json!([]), 20).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_pages, 0);
    }

    #[test]
    fn item_envelope_is_unwrapped() {
        let row: Row = decode_item(json!({"data": {"id": "x"}})).unwrap();
        assert_eq!(row, Row { id: "x".into() });
        let bare: Row = decode_item(json!({"id": "y"})).unwrap();
        assert_eq!(bare.id, "y");
    }

    #[test]
    fn error_message_prefers_message_field() {
        assert_eq!(
            error_message(&json!({"message": "City required", "error": "Bad Request"})),
            Some("City required".to_string())
        );
        assert_eq!(
            error_message(&json!({"error": {"message": "nested"}})),
            Some("nested".to_string())
        );
        assert_eq!(error_message(&json!({"ok": false})), None);
    }
}
