//! Request dispatch: compose, send, classify, decode, filter.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::clients::{HttpMethod, HttpRequest, Query, Transport};
use crate::resource::{NodeId, ResourceTree};
use crate::rest::{
    apply_filter, build_url, collection_segments, validate_segment, DispatchMode, OwnerRef, ResourceError,
};

/// A filtered payload in the shape the operation asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// Records of a list operation, in response order.
    Many(Vec<Map<String, Value>>),
    /// The record of a single-record operation.
    One(Map<String, Value>),
}

/// Sends collection requests through a [`Transport`].
///
/// The dispatcher is the only place where transport outcomes are turned
/// into [`ResourceError`]s. It never returns an unfiltered body.
#[derive(Clone)]
pub struct Dispatcher {
    root_url: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("root_url", &self.root_url)
            .field("transport", &self.transport)
            .finish()
    }
}

impl Dispatcher {
    /// Creates a dispatcher sending every path below `root_url`.
    #[must_use]
    pub fn new(root_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            root_url: root_url.into(),
            transport,
        }
    }

    /// Returns the URL every path is appended to.
    #[must_use]
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// Composes the URL for `mode` on the collection `(node, owner)`.
    #[must_use]
    pub fn url(&self, tree: &ResourceTree, node: NodeId, owner: Option<&OwnerRef>, mode: &DispatchMode) -> String {
        let segments = collection_segments(tree, node, owner);
        build_url(&self.root_url, &segments, mode)
    }

    /// Fetches and filters the payload for `mode` on `(node, owner)`.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::InvalidIdentifier`] if the identifier, sub-path or
    ///   an owner identifier is empty, `.` or `..`; nothing is sent
    /// - [`ResourceError::InvalidRequest`] if the transport could not build
    ///   the request
    /// - [`ResourceError::Network`] if the transport failed
    /// - [`ResourceError::Authentication`] for 401 and 403
    /// - [`ResourceError::Api`] for any other non-2xx status
    /// - [`ResourceError::Decode`] if the body is not JSON or the filtered
    ///   payload does not have the shape `mode` expects
    pub async fn fetch(
        &self,
        tree: &ResourceTree,
        node: NodeId,
        owner: Option<&OwnerRef>,
        query: &Query,
        mode: &DispatchMode,
    ) -> Result<Payload, ResourceError> {
        mode.validate()?;
        let mut lineage = owner;
        while let Some(current) = lineage {
            validate_segment(current.id())?;
            lineage = current.owner();
        }

        let url = self.url(tree, node, owner, mode);
        tracing::debug!("{} {} ({} on {})", HttpMethod::Get, url, mode.as_str(), tree.node(node).label());

        let request = HttpRequest::builder(HttpMethod::Get, url.clone())
            .query(query.clone())
            .build();

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(source) if source.is_invalid_request() => {
                tracing::warn!("Request to {} was not sent: {}", url, source);
                return Err(ResourceError::InvalidRequest { url, source });
            }
            Err(source) => {
                tracing::warn!("Request to {} failed: {}", url, source);
                return Err(ResourceError::Network { url, source });
            }
        };

        if let Some(error) = ResourceError::from_http_response(&url, &response) {
            tracing::warn!("Request to {} was rejected with status {}", url, response.code);
            return Err(error);
        }

        let decoded = response.json().map_err(|e| ResourceError::Decode {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let filtered = apply_filter(tree, node, query, decoded);
        shape(&url, filtered, mode)
    }
}

fn shape(url: &str, payload: Value, mode: &DispatchMode) -> Result<Payload, ResourceError> {
    let decode_error = |reason: String| ResourceError::Decode {
        url: url.to_string(),
        reason,
    };

    if mode.expects_list() {
        let Value::Array(items) = payload else {
            return Err(decode_error(format!("expected a list, got {}", kind(&payload))));
        };
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Object(map) => Ok(map),
                other => Err(decode_error(format!(
                    "expected item {index} to be an object, got {}",
                    kind(&other)
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Payload::Many)
    } else {
        match payload {
            Value::Object(map) => Ok(Payload::One(map)),
            other => Err(decode_error(format!("expected an object, got {}", kind(&other)))),
        }
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
