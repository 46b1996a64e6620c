//! Inherited configuration lookup.
//!
//! An inheritable attribute is read from the node itself when set there,
//! otherwise from the nearest ancestor that sets it. Presence is explicit
//! (`Option`), so a deliberately set value never falls through to a parent.
//!
//! The response filter is the only inheritable attribute today; everything
//! else on a node is local with a static default.

use crate::resource::{NodeId, ResourceNode, ResourceTree};

/// Walks from `node` up to the root and returns the first value `attribute`
/// reports as present.
///
/// ```rust,ignore
/// let filter = resolve_inherited(&tree, titles, |node| node.own_response_filter());
/// ```
pub fn resolve_inherited<'a, T, F>(tree: &'a ResourceTree, node: NodeId, attribute: F) -> Option<&'a T>
where
    T: ?Sized,
    F: Fn(&'a ResourceNode) -> Option<&'a T>,
{
    tree.lineage(node).find_map(attribute)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelRegistry;
    use crate::resource::{build_tree, NodeBuilder, NodeOptions};
    use crate::rest::ResponseFilter;

    fn models() -> ModelRegistry {
        let mut models = ModelRegistry::new();
        models.register_named("Author");
        models.register_named("Book");
        models
    }

    fn filter_name(tree: &ResourceTree, key: &str) -> Option<String> {
        let node = tree.find(key).unwrap().id();
        resolve_inherited(tree, node, ResourceNode::own_response_filter).map(|f| f.name().to_string())
    }

    #[test]
    fn test_own_value_wins() {
        let mut root = NodeBuilder::root();
        root.response_filter(ResponseFilter::extract("root"));
        root.expose(
            "authors",
            NodeOptions::new().response_filter(ResponseFilter::extract("authors")),
        );

        let tree = build_tree(root, "Client", &models()).unwrap();
        assert_eq!(filter_name(&tree, "authors").as_deref(), Some("extract(authors)"));
    }

    #[test]
    fn test_nearest_ancestor_wins() {
        let mut root = NodeBuilder::root();
        root.response_filter(ResponseFilter::extract("root"));
        root.expose_with(
            "authors",
            NodeOptions::new().response_filter(ResponseFilter::extract("data")),
            |authors| {
                authors.expose_with("books", NodeOptions::new(), |books| {
                    books.expose("authors", NodeOptions::new());
                });
            },
        );

        let tree = build_tree(root, "Client", &models()).unwrap();
        assert_eq!(filter_name(&tree, "books").as_deref(), Some("extract(data)"));

        let deepest = tree.find_path(&["authors", "books", "authors"]).unwrap().id();
        let name = resolve_inherited(&tree, deepest, ResourceNode::own_response_filter)
            .map(ResponseFilter::name);
        assert_eq!(name, Some("extract(data)"));
    }

    #[test]
    fn test_root_value_reaches_every_node() {
        let mut root = NodeBuilder::root();
        root.response_filter(ResponseFilter::extract("result"));
        root.expose_with("authors", NodeOptions::new(), |authors| {
            authors.expose("books", NodeOptions::new());
        });

        let tree = build_tree(root, "Client", &models()).unwrap();
        assert_eq!(filter_name(&tree, "books").as_deref(), Some("extract(result)"));
    }

    #[test]
    fn test_absent_everywhere_is_none() {
        let mut root = NodeBuilder::root();
        root.expose("authors", NodeOptions::new());

        let tree = build_tree(root, "Client", &models()).unwrap();
        assert_eq!(filter_name(&tree, "authors"), None);
    }

    #[test]
    fn test_identity_stops_inheritance() {
        let mut root = NodeBuilder::root();
        root.expose_with(
            "authors",
            NodeOptions::new().response_filter(ResponseFilter::extract("data")),
            |authors| {
                authors.expose(
                    "books",
                    NodeOptions::new().response_filter(ResponseFilter::identity()),
                );
            },
        );

        let tree = build_tree(root, "Client", &models()).unwrap();
        assert_eq!(filter_name(&tree, "books").as_deref(), Some("identity"));
    }

    #[test]
    fn test_works_for_other_attributes() {
        let mut root = NodeBuilder::root();
        root.expose_with("authors", NodeOptions::new(), |authors| {
            authors.expose("books", NodeOptions::new());
        });

        let tree = build_tree(root, "Client", &models()).unwrap();
        let books = tree.find("books").unwrap().id();
        let nearest_model = resolve_inherited(&tree, books, ResourceNode::model);
        assert_eq!(nearest_model, Some("Book"));

        let nearest_resource_above = resolve_inherited(&tree, books, |node| {
            node.resource().filter(|resource| *resource != "books")
        });
        assert_eq!(nearest_resource_above, Some("authors"));
    }
}
