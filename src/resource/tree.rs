//! The resolved, immutable resource tree.

use std::fmt::Write as _;

use crate::resource::{resolve_inherited, NodeId, RelationTable, ResourceNode};
use crate::rest::ResponseFilter;

/// All nodes of an API definition plus the relation table built from them.
///
/// Built once by [`build_tree`](crate::resource::build_tree) and read-only
/// afterwards, so it can be shared freely between tasks.
#[derive(Clone, Debug)]
pub struct ResourceTree {
    nodes: Vec<ResourceNode>,
    relations: RelationTable,
}

// Verify ResourceTree is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceTree>();
};

impl ResourceTree {
    pub(crate) fn new(nodes: Vec<ResourceNode>, relations: RelationTable) -> Self {
        Self { nodes, relations }
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> &ResourceNode {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// Returns a node of this tree.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &ResourceNode {
        &self.nodes[id.index()]
    }

    /// Returns a node, or `None` if `id` is out of range.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&ResourceNode> {
        self.nodes.get(id.index())
    }

    /// Returns the first node with `key`, in declaration order.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&ResourceNode> {
        self.nodes.iter().find(|node| node.key() == Some(key))
    }

    /// Follows `keys` down from the root.
    #[must_use]
    pub fn find_path(&self, keys: &[&str]) -> Option<&ResourceNode> {
        keys.iter().try_fold(self.root(), |node, key| {
            node.children()
                .iter()
                .map(|&child| self.node(child))
                .find(|child| child.key() == Some(*key))
        })
    }

    /// Iterates from `id` up to the root, `id` first.
    pub fn lineage(&self, id: NodeId) -> impl Iterator<Item = &ResourceNode> {
        std::iter::successors(Some(self.node(id)), move |node| {
            node.parent().map(|parent| self.node(parent))
        })
    }

    /// Returns the ancestors of `id`, root first, excluding `id`.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Vec<&ResourceNode> {
        let mut ancestors: Vec<&ResourceNode> = self.lineage(id).skip(1).collect();
        ancestors.reverse();
        ancestors
    }

    /// Iterates over every node, in declaration order (root first).
    pub fn iter(&self) -> impl Iterator<Item = &ResourceNode> {
        self.nodes.iter()
    }

    /// Returns the number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds only the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Returns the relation table.
    #[must_use]
    pub const fn relations(&self) -> &RelationTable {
        &self.relations
    }

    /// Returns the response filter in effect for `id`: its own, or the
    /// nearest ancestor's.
    #[must_use]
    pub fn response_filter(&self, id: NodeId) -> Option<&ResponseFilter> {
        resolve_inherited(self, id, ResourceNode::own_response_filter)
    }

    /// Renders one line per node, indented by depth.
    ///
    /// ```text
    /// <root> - host: Client, parent: -, model: -, id: id
    ///   authors - host: Author, parent: <root>, model: Author, id: id
    /// ```
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(&mut out, NodeId::ROOT, 0);
        out
    }

    fn dump_node(&self, out: &mut String, id: NodeId, depth: usize) {
        let node = self.node(id);
        let parent = node
            .parent()
            .map_or("-", |parent| self.node(parent).label());
        let _ = writeln!(
            out,
            "{}{} - host: {}, parent: {}, model: {}, id: {}",
            "  ".repeat(depth),
            node.label(),
            node.host(),
            parent,
            node.model().unwrap_or("-"),
            node.id_attribute()
        );
        for &child in node.children() {
            self.dump_node(out, child, depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelRegistry;
    use crate::resource::{build_tree, NodeBuilder, NodeOptions};

    fn scifi_tree() -> ResourceTree {
        let mut models = ModelRegistry::new();
        models.register_named("Author");
        models.register_named("Book");

        let mut root = NodeBuilder::root();
        root.expose_with("authors", NodeOptions::new(), |authors| {
            authors.expose(
                "influences",
                NodeOptions::new()
                    .model("Author")
                    .response_filter(ResponseFilter::extract("influences")),
            );
            authors.expose(
                "titles",
                NodeOptions::new()
                    .model("Book")
                    .resource("books")
                    .id_attribute("key")
                    .response_filter(ResponseFilter::extract("data")),
            );
        });
        build_tree(root, "Client", &models).unwrap()
    }

    #[test]
    fn test_dump_lists_every_node_indented() {
        let dump = scifi_tree().dump();
        let lines: Vec<&str> = dump.lines().collect();

        assert_eq!(
            lines,
            vec![
                "<root> - host: Client, parent: -, model: -, id: id",
                "  authors - host: Author, parent: <root>, model: Author, id: id",
                "    influences - host: Author, parent: authors, model: Author, id: id",
                "    titles - host: Book, parent: authors, model: Book, id: key",
            ]
        );
    }

    #[test]
    fn test_ancestors_are_root_first() {
        let tree = scifi_tree();
        let titles = tree.find("titles").unwrap().id();

        let ancestors = tree.ancestors(titles);
        let labels: Vec<&str> = ancestors.iter().map(|node| node.label()).collect();
        assert_eq!(labels, vec!["<root>", "authors"]);
    }

    #[test]
    fn test_lineage_starts_at_node() {
        let tree = scifi_tree();
        let titles = tree.find("titles").unwrap().id();

        let labels: Vec<&str> = tree.lineage(titles).map(ResourceNode::label).collect();
        assert_eq!(labels, vec!["titles", "authors", "<root>"]);
    }

    #[test]
    fn test_find_path_follows_keys() {
        let tree = scifi_tree();

        assert_eq!(
            tree.find_path(&["authors", "titles"]).and_then(ResourceNode::resource),
            Some("books")
        );
        assert!(tree.find_path(&["titles"]).is_none());
        assert!(tree.find_path(&[]).unwrap().is_root());
    }

    #[test]
    fn test_response_filter_resolution() {
        let tree = scifi_tree();

        let titles = tree.find("titles").unwrap().id();
        assert_eq!(
            tree.response_filter(titles).map(ResponseFilter::name),
            Some("extract(data)")
        );

        let authors = tree.find("authors").unwrap().id();
        assert!(tree.response_filter(authors).is_none());
    }

    #[test]
    fn test_tree_shape() {
        let tree = scifi_tree();

        assert_eq!(tree.len(), 4);
        assert!(!tree.is_empty());
        assert_eq!(tree.iter().filter(|node| node.is_root()).count(), 1);
        assert!(tree.get(NodeId(4)).is_none());
        assert_eq!(tree.relations().len(), 3);
    }
}
