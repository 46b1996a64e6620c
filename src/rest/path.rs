//! URL composition.
//!
//! A collection's path is a pure function of the tree and of the owner
//! lineage it was reached through:
//!
//! - reached from a record: the record's path (its collection path plus its
//!   identifier), then this node's resource
//! - reached from the root: every ancestor's resource, root first, then this
//!   node's resource
//!
//! A `get` appends the identifier, a `filter` appends its sub-path.
//!
//! # Example
//!
//! ```text
//! authors.get(2).titles.get("mona-lisa-overdrive")
//!   -> authors / 2 / books / mona-lisa-overdrive
//! ```

use std::sync::Arc;

use crate::resource::{NodeId, ResourceTree};
use crate::rest::ResourceError;

/// Non-owning back-reference from a collection to the record it was reached
/// through: the record's node and identifier, and that record's own owner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnerRef {
    node: NodeId,
    id: String,
    owner: Option<Arc<OwnerRef>>,
}

impl OwnerRef {
    /// Creates an owner reference.
    #[must_use]
    pub fn new(node: NodeId, id: impl Into<String>, owner: Option<Arc<Self>>) -> Self {
        Self {
            node,
            id: id.into(),
            owner,
        }
    }

    /// Returns the node the owning record was fetched from.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Returns the owning record's identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the owning record's own owner.
    #[must_use]
    pub fn owner(&self) -> Option<&Self> {
        self.owner.as_deref()
    }
}

/// Where in a collection a request is aimed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchMode {
    /// The collection itself; answers a list.
    All,
    /// One record by identifier; answers a single record.
    Get(String),
    /// A named sub-path of the collection; answers a list.
    Filter(String),
}

impl DispatchMode {
    /// Returns `true` when the response must be a list.
    #[must_use]
    pub const fn expects_list(&self) -> bool {
        matches!(self, Self::All | Self::Filter(_))
    }

    /// Returns the operation name used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Get(_) => "get",
            Self::Filter(_) => "filter",
        }
    }

    /// Checks that the identifier, or every piece of the sub-path, stays
    /// below the collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidIdentifier`] for an empty identifier,
    /// a sub-path with no pieces, or a `.` / `..` segment.
    pub fn validate(&self) -> Result<(), ResourceError> {
        match self {
            Self::All => Ok(()),
            Self::Get(id) => validate_segment(id),
            Self::Filter(path) => {
                let mut pieces = path.split('/').filter(|piece| !piece.is_empty()).peekable();
                if pieces.peek().is_none() {
                    return Err(ResourceError::InvalidIdentifier {
                        segment: path.clone(),
                    });
                }
                pieces.try_for_each(validate_segment)
            }
        }
    }
}

/// Rejects segments that would not address something below their parent.
///
/// `urlencoding` leaves `.` alone, and URL normalization removes dot
/// segments, so `..` would climb out of the collection.
///
/// # Errors
///
/// Returns [`ResourceError::InvalidIdentifier`] for `""`, `.` and `..`.
pub fn validate_segment(segment: &str) -> Result<(), ResourceError> {
    if matches!(segment, "" | "." | "..") {
        return Err(ResourceError::InvalidIdentifier {
            segment: segment.to_string(),
        });
    }
    Ok(())
}

/// Returns the unencoded path segments of a collection.
#[must_use]
pub fn collection_segments(tree: &ResourceTree, node: NodeId, owner: Option<&OwnerRef>) -> Vec<String> {
    let mut segments = match owner {
        Some(owner) => record_segments(tree, owner),
        None => tree
            .ancestors(node)
            .into_iter()
            .filter_map(|ancestor| ancestor.resource().map(ToString::to_string))
            .collect(),
    };
    if let Some(resource) = tree.node(node).resource() {
        segments.push(resource.to_string());
    }
    segments
}

/// Returns the unencoded path segments of the record `owner` points at.
#[must_use]
pub fn record_segments(tree: &ResourceTree, owner: &OwnerRef) -> Vec<String> {
    let mut segments = collection_segments(tree, owner.node, owner.owner());
    segments.push(owner.id.clone());
    segments
}

/// Builds the absolute URL for a request.
///
/// Every segment is percent-encoded; a filter sub-path is split on `/` and
/// each piece encoded on its own.
#[must_use]
pub fn build_url(root_url: &str, segments: &[String], mode: &DispatchMode) -> String {
    let mut url = root_url.trim_end_matches('/').to_string();

    let tail: Vec<&str> = match mode {
        DispatchMode::All => Vec::new(),
        DispatchMode::Get(id) => vec![id.as_str()],
        DispatchMode::Filter(path) => path.split('/').filter(|piece| !piece.is_empty()).collect(),
    };

    for segment in segments.iter().map(String::as_str).chain(tail) {
        url.push('/');
        url.push_str(&urlencoding::encode(segment));
    }
    url
}
