//! Resource tree nodes.

use std::fmt;

use crate::rest::ResponseFilter;

/// Index of a node inside its [`ResourceTree`](crate::resource::ResourceTree).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: Self = Self(0);

    /// Returns the position of the node in declaration order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One declared resource, fully resolved.
///
/// The root node stands for the API itself: it has no key, no resource
/// segment and no model, and its host is the declaring host.
#[derive(Clone, Debug)]
pub struct ResourceNode {
    pub(crate) id: NodeId,
    pub(crate) key: Option<String>,
    pub(crate) resource: Option<String>,
    pub(crate) model: Option<String>,
    pub(crate) host: String,
    pub(crate) id_attribute: String,
    pub(crate) response_filter: Option<ResponseFilter>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl ResourceNode {
    /// Returns this node's id.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the declared key, `None` for the root.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns the key, or `<root>` for the root node.
    #[must_use]
    pub fn label(&self) -> &str {
        self.key.as_deref().unwrap_or("<root>")
    }

    /// Returns the URL path segment, `None` for the root.
    #[must_use]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Returns the model records of this node materialize as.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Returns the type this node's children are bound on.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the attribute that identifies a record of this node.
    #[must_use]
    pub fn id_attribute(&self) -> &str {
        &self.id_attribute
    }

    /// Returns the filter set on this node itself, ignoring ancestors.
    ///
    /// See [`ResourceTree::response_filter`](crate::resource::ResourceTree::response_filter)
    /// for the inherited value.
    #[must_use]
    pub const fn own_response_filter(&self) -> Option<&ResponseFilter> {
        self.response_filter.as_ref()
    }

    /// Returns the enclosing node, `None` for the root.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns child nodes in declaration order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns `true` for the root node.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
