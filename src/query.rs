//! Query-string encoding for list/filter endpoints.
//!
//! Options records are ordinary `#[derive(Serialize)]` structs. Each field
//! declares its wire key with `#[serde(rename = "...")]` and, when it is
//! optional, `#[serde(skip_serializing_if = "is_zero")]`. The record is
//! then encoded with `serde_urlencoded`, which emits fields in declaration
//! order and percent-encodes values with form rules (space as `+`).
//!
//! ```ignore
//! #[derive(Serialize, Default)]
//! struct Options {
//!     #[serde(rename = "pageSize", skip_serializing_if = "is_zero")]
//!     page_size: u32,
//!     #[serde(rename = "status", skip_serializing_if = "is_zero")]
//!     status: String,
//! }
//! // "pageSize=300"
//! to_query_string(&Options { page_size: 300, ..Default::default() })?;
//! ```

use serde::Serialize;

/// `true` when `value` equals its type's default (`""`, `0`, `None`, ...).
///
/// Used as the `skip_serializing_if` predicate for optional query keys.
pub fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Encodes an options record as `key=value&...` (without a leading `?`).
pub fn to_query_string<T: Serialize + ?Sized>(options: &T) -> crate::error::Result<String> {
    Ok(serde_urlencoded::to_string(options)?)
}

/// Appends `?query` to `path` unless the query is empty.
pub fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// Encodes `options` and appends them to `path`.
pub fn path_with_options<T: Serialize + ?Sized>(
    path: &str,
    options: &T,
) -> crate::error::Result<String> {
    Ok(with_query(path, &to_query_string(options)?))
}
