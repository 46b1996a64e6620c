//! The resource tree: declaration, resolution and relation binding.
//!
//! An API is described as nested resources. Each declared resource becomes a
//! [`ResourceNode`] in an immutable [`ResourceTree`]:
//!
//! - [`NodeBuilder`] / [`NodeOptions`]: the declaration surface
//! - [`NodeDeclaration`] / [`RootDeclaration`]: the same declaration read from JSON
//! - [`build_tree`]: resolves defaults, infers models and binds relations
//! - [`RelationTable`]: `(host, key) -> node`, consulted for navigation
//! - [`resolve_inherited`]: nearest-ancestor lookup for inheritable options
//! - [`classify`]: `authors` -> `Author` model inference
//!
//! # Example
//!
//! ```rust
//! use restroom::ModelRegistry;
//! use restroom::resource::{build_tree, NodeBuilder, NodeOptions};
//!
//! let mut models = ModelRegistry::new();
//! models.register_named("Author");
//!
//! let mut root = NodeBuilder::root();
//! root.expose("authors", NodeOptions::new());
//!
//! let tree = build_tree(root, "Client", &models).unwrap();
//! assert_eq!(tree.find("authors").unwrap().model(), Some("Author"));
//! ```

mod builder;
mod inflect;
mod inherit;
mod node;
mod options;
mod relations;
mod tree;

pub use builder::{build_tree, NodeBuilder, DEFAULT_ID_ATTRIBUTE};
pub use inflect::{camelize, classify, singularize};
pub use inherit::resolve_inherited;
pub use node::{NodeId, ResourceNode};
pub use options::{NodeDeclaration, NodeOptions, RootDeclaration};
pub use relations::RelationTable;
pub use tree::ResourceTree;
