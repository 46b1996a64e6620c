//! Response filters: reshape a decoded body into the payload a node cares
//! about, before any record is built.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::clients::Query;
use crate::resource::{NodeId, ResourceTree};

type FilterFn = dyn Fn(&Query, Value) -> Value + Send + Sync;

/// A pure function from `(query, decoded payload)` to the payload to wrap.
///
/// Filters are inherited: a node without its own filter uses its nearest
/// ancestor's. [`ResponseFilter::identity`] can be set explicitly to stop
/// inheriting.
///
/// # Example
///
/// ```rust
/// use restroom::clients::Query;
/// use restroom::rest::ResponseFilter;
/// use serde_json::json;
///
/// let filter = ResponseFilter::extract("data");
/// let payload = filter.call(&Query::new(), json!({"data": [{"id": 1}]}));
/// assert_eq!(payload, json!([{"id": 1}]));
/// ```
#[derive(Clone)]
pub struct ResponseFilter {
    name: String,
    func: Arc<FilterFn>,
}

impl ResponseFilter {
    /// Wraps a custom filter function.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Query, Value) -> Value + Send + Sync + 'static,
    {
        Self::named("custom", func)
    }

    /// Wraps a custom filter function under a name shown in debug output.
    pub fn named<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Query, Value) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// Extracts a top-level key; a missing key yields `null`.
    #[must_use]
    pub fn extract(key: impl Into<String>) -> Self {
        let key = key.into();
        let name = format!("extract({key})");
        Self::named(name, move |_, mut payload| {
            payload
                .as_object_mut()
                .and_then(|object| object.remove(&key))
                .unwrap_or(Value::Null)
        })
    }

    /// Returns the payload unchanged.
    #[must_use]
    pub fn identity() -> Self {
        Self::named("identity", |_, payload| payload)
    }

    /// Returns the filter's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Applies the filter.
    #[must_use]
    pub fn call(&self, query: &Query, payload: Value) -> Value {
        (self.func)(query, payload)
    }
}

impl fmt::Debug for ResponseFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResponseFilter").field(&self.name).finish()
    }
}

/// Applies the filter in effect for `node`, or returns `payload` unchanged
/// when no node up to the root sets one.
#[must_use]
pub fn apply_filter(tree: &ResourceTree, node: NodeId, query: &Query, payload: Value) -> Value {
    match tree.response_filter(node) {
        Some(filter) => filter.call(query, payload),
        None => payload,
    }
}
