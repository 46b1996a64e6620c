//! Declaration builder and tree resolution.
//!
//! A [`NodeBuilder`] only records what was declared. Resolution (defaults,
//! model inference, host lookup, relation binding) happens in one pass when
//! the [`Api`](crate::Api) is built, so every configuration error surfaces
//! there.

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::model::ModelRegistry;
use crate::resource::{classify, NodeId, NodeOptions, RelationTable, ResourceNode, ResourceTree};
use crate::rest::ResponseFilter;

/// Default identifying attribute.
pub const DEFAULT_ID_ATTRIBUTE: &str = "id";

/// Collects the declaration of one resource and its children.
///
/// Handed to the closures given to [`ApiBuilder::define`](crate::ApiBuilder::define)
/// and [`NodeBuilder::expose_with`].
///
/// # Example
///
/// ```rust
/// use restroom::resource::{NodeBuilder, NodeOptions};
/// use restroom::rest::ResponseFilter;
///
/// let mut root = NodeBuilder::root();
/// root.expose_with("authors", NodeOptions::new(), |authors| {
///     authors.expose(
///         "influences",
///         NodeOptions::new()
///             .model("Author")
///             .response_filter(ResponseFilter::extract("influences")),
///     );
/// });
///
/// assert_eq!(root.children().len(), 1);
/// assert_eq!(root.children()[0].children()[0].key(), Some("influences"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct NodeBuilder {
    key: Option<String>,
    options: NodeOptions,
    children: Vec<NodeBuilder>,
}

impl NodeBuilder {
    /// Creates the builder for the API root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    fn child(key: String, options: NodeOptions) -> Self {
        Self {
            key: Some(key),
            options,
            children: Vec::new(),
        }
    }

    /// Declares a child resource without children of its own.
    pub fn expose(&mut self, key: impl Into<String>, options: NodeOptions) -> &mut Self {
        self.children.push(Self::child(key.into(), options));
        self
    }

    /// Declares a child resource and evaluates `block` to declare its children.
    pub fn expose_with<F>(&mut self, key: impl Into<String>, options: NodeOptions, block: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        let mut child = Self::child(key.into(), options);
        block(&mut child);
        self.children.push(child);
        self
    }

    /// Sets this resource's own response filter.
    pub fn response_filter(&mut self, filter: ResponseFilter) -> &mut Self {
        self.options.response_filter = Some(filter);
        self
    }

    /// Returns the key, `None` for the root.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the options declared so far.
    #[must_use]
    pub const fn options(&self) -> &NodeOptions {
        &self.options
    }

    /// Returns the declared children, in order.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }
}

/// Resolves a declaration into an immutable [`ResourceTree`].
///
/// `root_host` is the declaring host: children of the root are bound on it.
///
/// # Errors
///
/// Returns a [`ConfigError`] for empty or duplicate keys, models that are
/// not registered, and hosts that are neither registered models nor
/// `root_host`.
pub fn build_tree(
    root: NodeBuilder,
    root_host: &str,
    models: &ModelRegistry,
) -> Result<ResourceTree, ConfigError> {
    let mut nodes = vec![ResourceNode {
        id: NodeId::ROOT,
        key: None,
        resource: None,
        model: None,
        host: root_host.to_string(),
        id_attribute: root
            .options
            .id_attribute
            .unwrap_or_else(|| DEFAULT_ID_ATTRIBUTE.to_string()),
        response_filter: root.options.response_filter,
        parent: None,
        children: Vec::new(),
    }];

    let resolver = Resolver { root_host, models };
    resolver.attach(&mut nodes, NodeId::ROOT, root.children)?;

    let relations = bind_relations(&nodes);
    Ok(ResourceTree::new(nodes, relations))
}

struct Resolver<'a> {
    root_host: &'a str,
    models: &'a ModelRegistry,
}

impl Resolver<'_> {
    fn attach(
        &self,
        nodes: &mut Vec<ResourceNode>,
        parent: NodeId,
        children: Vec<NodeBuilder>,
    ) -> Result<(), ConfigError> {
        let parent_label = nodes[parent.index()].label().to_string();
        let mut seen = HashSet::new();

        for child in children {
            let key = child.key.unwrap_or_default();
            if key.is_empty() {
                return Err(ConfigError::EmptyKey {
                    parent: parent_label,
                });
            }
            if !seen.insert(key.clone()) {
                return Err(ConfigError::DuplicateKey {
                    key,
                    parent: parent_label,
                });
            }

            let options = child.options;
            let resource = options.resource.unwrap_or_else(|| key.clone());
            let model = options.model.unwrap_or_else(|| classify(&resource));
            if !self.models.contains(&model) {
                return Err(ConfigError::ModelNotFound { name: model, key });
            }

            let host = match options.host {
                Some(host) if host == self.root_host || self.models.contains(&host) => host,
                Some(host) => return Err(ConfigError::HostNotFound { name: host, key }),
                None => model.clone(),
            };

            let id = NodeId(nodes.len());
            nodes.push(ResourceNode {
                id,
                key: Some(key),
                resource: Some(resource),
                model: Some(model),
                host,
                id_attribute: options
                    .id_attribute
                    .unwrap_or_else(|| DEFAULT_ID_ATTRIBUTE.to_string()),
                response_filter: options.response_filter,
                parent: Some(parent),
                children: Vec::new(),
            });
            nodes[parent.index()].children.push(id);

            self.attach(nodes, id, child.children)?;
        }

        Ok(())
    }
}

/// Binds every child on its parent's host, in declaration order.
fn bind_relations(nodes: &[ResourceNode]) -> RelationTable {
    let mut relations = RelationTable::new();
    for node in nodes {
        for &child in &node.children {
            if let Some(key) = nodes[child.index()].key() {
                relations.bind(node.host(), key, child);
            }
        }
    }
    relations
}
