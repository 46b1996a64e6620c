//! Central relation table: which child resources a host type can navigate to.

use std::collections::HashMap;

use crate::resource::NodeId;

/// Maps `(host, key)` to the child node reached through that key.
///
/// Model types never carry navigation state themselves; records consult
/// this table by their model name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RelationTable {
    relations: HashMap<(String, String), NodeId>,
}

impl RelationTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key` on `host` to `node`.
    ///
    /// Binding the same `(host, key)` again replaces the earlier node; the
    /// replaced node is returned.
    pub fn bind(&mut self, host: &str, key: &str, node: NodeId) -> Option<NodeId> {
        let previous = self
            .relations
            .insert((host.to_string(), key.to_string()), node);
        if let Some(previous) = previous.filter(|previous| *previous != node) {
            tracing::debug!(
                "Relation {}.{} rebound from node {} to node {}",
                host,
                key,
                previous,
                node
            );
        }
        previous
    }

    /// Looks up the node bound to `key` on `host`.
    #[must_use]
    pub fn lookup(&self, host: &str, key: &str) -> Option<NodeId> {
        self.relations
            .get(&(host.to_string(), key.to_string()))
            .copied()
    }

    /// Returns the keys bound on `host`, sorted.
    #[must_use]
    pub fn keys_for(&self, host: &str) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .relations
            .keys()
            .filter(|(bound_host, _)| bound_host == host)
            .map(|(_, key)| key.as_str())
            .collect();
        keys.sort_unstable();
        keys
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}
