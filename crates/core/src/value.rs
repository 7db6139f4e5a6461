//! Nested access into `serde_json::Value` trees.
//!
//! Walking a parsed JSON document by a key path comes up in both the
//! HTTP client (org payloads, license objects) and ad-hoc tooling, so
//! the traversal lives here in `core`.

use serde_json::Value;

/// Errors from [`access_nested`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueAccessError {
    /// The current object has no entry for the requested key.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Traversal hit a non-object value while keys remained in the path.
    #[error("cannot index into non-object value with key: {0}")]
    NotAnObject(String),
}

/// Follow `path` through nested JSON objects and return the value it
/// lands on.
///
/// Each path element must name a key of the current object. An empty
/// path returns `value` itself. The error carries the key that could
/// not be resolved.
pub fn access_nested<'a>(value: &'a Value, path: &[&str]) -> Result<&'a Value, ValueAccessError> {
    let mut current = value;
    for key in path {
        let Value::Object(map) = current else {
            return Err(ValueAccessError::NotAnObject((*key).to_string()));
        };
        current = map
            .get(*key)
            .ok_or_else(|| ValueAccessError::KeyNotFound((*key).to_string()))?;
    }
    Ok(current)
}
