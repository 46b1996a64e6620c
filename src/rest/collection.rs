//! Bound collections: a node plus the record it was reached through.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::Api;
use crate::clients::Query;
use crate::model::Model;
use crate::resource::{NodeId, ResourceNode};
use crate::rest::{to_query, DispatchMode, OwnerRef, Payload, Record, ResourceError};

/// A collection ready to fetch: a node of the tree, and optionally the
/// record whose identifier prefixes its path.
///
/// Obtained from [`Api::collection`] (no owner) or [`Record::relation`].
/// Cheap to clone; holds no mutable state.
///
/// # Example
///
/// ```rust,ignore
/// let authors = api.collection("authors")?;
/// let gibson = authors.get(2).await?;
/// let book = gibson.relation("titles")?.get("mona-lisa-overdrive").await?;
/// assert_eq!(book.get_str("title"), Some("Mona Lisa Overdrive"));
/// ```
#[derive(Clone)]
pub struct BoundCollection {
    api: Api,
    node: NodeId,
    owner: Option<Arc<OwnerRef>>,
}

// Verify BoundCollection is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BoundCollection>();
};

impl BoundCollection {
    pub(crate) const fn new(api: Api, node: NodeId, owner: Option<Arc<OwnerRef>>) -> Self {
        Self { api, node, owner }
    }

    /// Returns the node this collection fetches.
    #[must_use]
    pub fn node(&self) -> &ResourceNode {
        self.api.tree().node(self.node)
    }

    /// Returns the node's key.
    #[must_use]
    pub fn key(&self) -> &str {
        self.node().label()
    }

    /// Returns the owning record's reference, if any.
    #[must_use]
    pub fn owner(&self) -> Option<&OwnerRef> {
        self.owner.as_deref()
    }

    /// Returns the URL a list fetch goes to.
    #[must_use]
    pub fn url(&self) -> String {
        self.api
            .dispatcher()
            .url(self.api.tree(), self.node, self.owner(), &DispatchMode::All)
    }

    /// Fetches every record of the collection.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ResourceError`] on transport, status, decode or
    /// model-construction failure.
    pub async fn all(&self) -> Result<Vec<Record>, ResourceError> {
        self.all_with_query(&Query::new()).await
    }

    /// Fetches the records matching `params`, sent as query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidQuery`] if `params` is not a flat
    /// object, or any error of [`BoundCollection::all`].
    pub async fn all_with<P: Serialize + ?Sized>(&self, params: &P) -> Result<Vec<Record>, ResourceError> {
        let query = to_query(params)?;
        self.all_with_query(&query).await
    }

    /// Fetches the records matching an already-built query.
    ///
    /// # Errors
    ///
    /// See [`BoundCollection::all`].
    pub async fn all_with_query(&self, query: &Query) -> Result<Vec<Record>, ResourceError> {
        let payload = self.fetch(query, &DispatchMode::All).await?;
        self.wrap_many(payload)
    }

    /// Fetches one record by identifier.
    ///
    /// # Errors
    ///
    /// See [`BoundCollection::all`].
    pub async fn get(&self, id: impl fmt::Display) -> Result<Record, ResourceError> {
        let mode = DispatchMode::Get(id.to_string());
        let payload = self.fetch(&Query::new(), &mode).await?;
        let url = self.api.dispatcher().url(self.api.tree(), self.node, self.owner(), &mode);
        match payload {
            Payload::One(attributes) => {
                let mut records = self.wrap(&url, vec![attributes])?;
                records.pop().ok_or_else(|| ResourceError::Decode {
                    url,
                    reason: "no record in response".to_string(),
                })
            }
            Payload::Many(_) => Err(ResourceError::Decode {
                url,
                reason: "expected a single record".to_string(),
            }),
        }
    }

    /// Fetches the list found at a named sub-path of the collection, such
    /// as `authors/hard-scifi`.
    ///
    /// # Errors
    ///
    /// See [`BoundCollection::all`].
    pub async fn filter(&self, path: impl AsRef<str>) -> Result<Vec<Record>, ResourceError> {
        let mode = DispatchMode::Filter(path.as_ref().to_string());
        let payload = self.fetch(&Query::new(), &mode).await?;
        self.wrap_many(payload)
    }

    /// Fetches every record and converts each into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ModelMismatch`] if the node's model is not
    /// `T`, or any error of [`BoundCollection::all`].
    pub async fn all_as<T: Model>(&self) -> Result<Vec<T>, ResourceError> {
        self.all().await?.iter().map(Record::to_model::<T>).collect()
    }

    /// Fetches one record and converts it into `T`.
    ///
    /// # Errors
    ///
    /// See [`BoundCollection::all_as`].
    pub async fn get_as<T: Model>(&self, id: impl fmt::Display) -> Result<T, ResourceError> {
        self.get(id).await?.to_model()
    }

    async fn fetch(&self, query: &Query, mode: &DispatchMode) -> Result<Payload, ResourceError> {
        self.api
            .dispatcher()
            .fetch(self.api.tree(), self.node, self.owner(), query, mode)
            .await
    }

    fn wrap_many(&self, payload: Payload) -> Result<Vec<Record>, ResourceError> {
        match payload {
            Payload::Many(items) => self.wrap(&self.url(), items),
            Payload::One(_) => Err(ResourceError::Decode {
                url: self.url(),
                reason: "expected a list of records".to_string(),
            }),
        }
    }

    /// Builds records from mappings. Every mapping is checked against the
    /// node's model first, so a failure returns no records at all.
    fn wrap(&self, url: &str, items: Vec<Map<String, Value>>) -> Result<Vec<Record>, ResourceError> {
        let node = self.node();
        let model = node.model().unwrap_or_default();

        if let Some(model_type) = self.api.models().get(model) {
            for (index, attributes) in items.iter().enumerate() {
                model_type
                    .construct(attributes)
                    .map_err(|reason| ResourceError::Decode {
                        url: url.to_string(),
                        reason: format!("record {index} is not a valid {model}: {reason}"),
                    })?;
            }
        }

        Ok(items
            .into_iter()
            .map(|attributes| {
                Record::new(
                    self.api.clone(),
                    self.node,
                    self.owner.clone(),
                    model.to_string(),
                    attributes,
                )
            })
            .collect())
    }
}

impl fmt::Debug for BoundCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundCollection")
            .field("key", &self.key())
            .field("node", &self.node)
            .field("owner", &self.owner)
            .finish()
    }
}
