//! Query parameter serialization.

use serde::Serialize;
use serde_json::Value;

use crate::clients::Query;
use crate::rest::ResourceError;

/// Serializes a params struct (or map) into query parameters.
///
/// `null` values are skipped, arrays become comma-separated lists and
/// nested objects are rejected.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidQuery`] if `params` does not serialize to
/// a flat object.
///
/// # Example
///
/// ```rust
/// use restroom::rest::to_query;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct AuthorParams {
///     awesome: bool,
///     genre: Option<String>,
/// }
///
/// let query = to_query(&AuthorParams { awesome: true, genre: None }).unwrap();
/// assert_eq!(query.get("awesome"), Some(&"true".to_string()));
/// assert!(!query.contains_key("genre"));
/// ```
pub fn to_query<T: Serialize + ?Sized>(params: &T) -> Result<Query, ResourceError> {
    let value = serde_json::to_value(params).map_err(|e| ResourceError::InvalidQuery {
        reason: e.to_string(),
    })?;

    let map = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(Query::new()),
        other => {
            return Err(ResourceError::InvalidQuery {
                reason: format!("expected an object, got {other}"),
            })
        }
    };

    let mut query = Query::new();
    for (key, val) in map {
        match val {
            Value::Null => {}
            Value::String(s) => {
                query.insert(key, s);
            }
            Value::Number(n) => {
                query.insert(key, n.to_string());
            }
            Value::Bool(b) => {
                query.insert(key, b.to_string());
            }
            Value::Array(arr) => {
                let values: Vec<String> = arr
                    .iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        Value::Bool(b) => Some(b.to_string()),
                        _ => None,
                    })
                    .collect();
                if !values.is_empty() {
                    query.insert(key, values.join(","));
                }
            }
            Value::Object(_) => {
                return Err(ResourceError::InvalidQuery {
                    reason: format!("nested object for '{key}' cannot be sent as a query parameter"),
                });
            }
        }
    }

    Ok(query)
}
