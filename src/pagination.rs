//! Pagination options for `GET` requests.
//!
//! Pagination is a free-form map, so callers can pass whatever their integration
//! already carries around. Only the `page` key is forwarded to the gateway; every
//! other key is dropped without error.

use crate::common::PAGE_QUERY_KEY;
use serde_json::{Map, Value};
use urlencoding::encode;

/// Caller-supplied pagination options.
pub type Pagination = Map<String, Value>;

/// Pagination options selecting a single page.
pub fn page(page: u64) -> Pagination {
    let mut pagination = Pagination::new();
    pagination.insert(PAGE_QUERY_KEY.to_string(), page.into());
    pagination
}

/// Appends the query string derived from `pagination` to `url`.
///
/// The URL is returned untouched if nothing survives the filtering.
pub(crate) fn apply(url: String, pagination: &Pagination) -> String {
    match query_string(pagination) {
        Some(query) => format!("{}?{}", url, query),
        None => url,
    }
}

fn query_string(pagination: &Pagination) -> Option<String> {
    let value = render(pagination.get(PAGE_QUERY_KEY)?)?;

    Some(format!("{}={}", PAGE_QUERY_KEY, encode(&value)))
}

fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some("0".to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
