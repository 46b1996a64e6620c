//! Per-resource declaration options.
//!
//! Options can be given in code through [`NodeOptions`] or read from JSON
//! through [`NodeDeclaration`]. Both end up in a
//! [`NodeBuilder`](crate::resource::NodeBuilder).

use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::Model;
use crate::resource::NodeBuilder;
use crate::rest::ResponseFilter;

/// Options accepted by [`NodeBuilder::expose`].
///
/// Every option is optional:
///
/// - `resource`: path segment, defaults to the key
/// - `model`: record model, defaults to the singular camel-cased resource
/// - `host`: type the children are bound on, defaults to the model
/// - `id_attribute`: identifying attribute, defaults to `id`
/// - `response_filter`: local filter; when unset the nearest ancestor's applies
///
/// # Example
///
/// ```rust
/// use restroom::resource::NodeOptions;
/// use restroom::rest::ResponseFilter;
///
/// let options = NodeOptions::new()
///     .resource("books")
///     .model("Book")
///     .id_attribute("key")
///     .response_filter(ResponseFilter::extract("data"));
///
/// assert_eq!(options.resource_name(), Some("books"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct NodeOptions {
    pub(crate) resource: Option<String>,
    pub(crate) model: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) id_attribute: Option<String>,
    pub(crate) response_filter: Option<ResponseFilter>,
}

impl NodeOptions {
    /// Creates options with every value left to its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path segment.
    #[must_use]
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Sets the model by name.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the model to `T`.
    #[must_use]
    pub fn model_of<T: Model>(self) -> Self {
        self.model(T::NAME)
    }

    /// Sets the host by name.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the identifying attribute.
    #[must_use]
    pub fn id_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.id_attribute = Some(attribute.into());
        self
    }

    /// Sets the local response filter.
    #[must_use]
    pub fn response_filter(mut self, filter: ResponseFilter) -> Self {
        self.response_filter = Some(filter);
        self
    }

    /// Returns the explicit resource, if any.
    #[must_use]
    pub fn resource_name(&self) -> Option<&str> {
        self.resource.as_deref()
    }
}

/// Serialized form of a resource declaration.
///
/// Unknown fields are rejected. A string `response_filter` extracts that
/// top-level key from every decoded response.
///
/// ```json
/// {
///   "key": "titles",
///   "resource": "books",
///   "model": "Book",
///   "id": "key",
///   "response_filter": "data",
///   "exposes": []
/// }
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NodeDeclaration {
    /// The resource key.
    pub key: String,
    /// Path segment.
    #[serde(default)]
    pub resource: Option<String>,
    /// Model name.
    #[serde(default)]
    pub model: Option<String>,
    /// Host name.
    #[serde(default)]
    pub host: Option<String>,
    /// Identifying attribute.
    #[serde(default)]
    pub id: Option<String>,
    /// Top-level key to extract from responses.
    #[serde(default)]
    pub response_filter: Option<String>,
    /// Child declarations, in order.
    #[serde(default)]
    pub exposes: Vec<NodeDeclaration>,
}

/// Serialized form of a whole API tree.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RootDeclaration {
    /// Top-level key to extract from every response, unless overridden.
    #[serde(default)]
    pub response_filter: Option<String>,
    /// Top-level resources, in order.
    #[serde(default)]
    pub exposes: Vec<NodeDeclaration>,
}

impl RootDeclaration {
    /// Reads a declaration from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDeclaration`] for unknown fields or a
    /// wrong shape.
    pub fn from_json(value: serde_json::Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidDeclaration {
            reason: e.to_string(),
        })
    }

    /// Replays this declaration onto `root`.
    pub fn apply(self, root: &mut NodeBuilder) {
        if let Some(key) = self.response_filter {
            root.response_filter(ResponseFilter::extract(key));
        }
        for child in self.exposes {
            child.apply(root);
        }
    }
}

impl NodeDeclaration {
    fn options(&self) -> NodeOptions {
        NodeOptions {
            resource: self.resource.clone(),
            model: self.model.clone(),
            host: self.host.clone(),
            id_attribute: self.id.clone(),
            response_filter: self.response_filter.clone().map(ResponseFilter::extract),
        }
    }

    fn apply(self, parent: &mut NodeBuilder) {
        let options = self.options();
        let key = self.key;
        let exposes = self.exposes;
        parent.expose_with(key, options, move |node| {
            for child in exposes {
                child.apply(node);
            }
        });
    }
}
