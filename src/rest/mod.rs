//! Call-time machinery: dispatching requests for bound collections and
//! turning the filtered payload into records.
//!
//! - **[`BoundCollection`]**: a node plus the owning record, with `all`,
//!   `get` and `filter`
//! - **[`Record`]**: a fetched mapping tagged with its model, navigable
//!   through [`Record::relation`]
//! - **[`Dispatcher`]**: composes the URL, calls the transport and
//!   classifies the outcome
//! - **[`ResponseFilter`]**: inherited payload reshaping
//! - **[`ResourceError`]**: the call-time error taxonomy
//!
//! # Example
//!
//! ```rust,ignore
//! use restroom::rest::ResourceError;
//!
//! let authors = api.collection("authors")?;
//!
//! // GET /api/authors?awesome=true
//! let awesome = authors.all_with(&serde_json::json!({"awesome": true})).await?;
//!
//! // GET /api/authors/hard-scifi
//! let hard = authors.filter("hard-scifi").await?;
//!
//! // GET /api/authors/2/books/mona-lisa-overdrive
//! let book = authors
//!     .get(2)
//!     .await?
//!     .relation("titles")?
//!     .get("mona-lisa-overdrive")
//!     .await?;
//! ```

mod collection;
mod dispatch;
mod errors;
mod filter;
mod path;
mod query;
mod record;

pub use collection::BoundCollection;
pub use dispatch::{Dispatcher, Payload};
pub use errors::ResourceError;
pub use filter::{apply_filter, ResponseFilter};
pub use path::{
    build_url, collection_segments, record_segments, validate_segment, DispatchMode, OwnerRef,
};
pub use query::to_query;
pub use record::Record;
