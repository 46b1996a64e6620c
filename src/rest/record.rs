//! Fetched records.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::api::Api;
use crate::model::Model;
use crate::resource::{NodeId, ResourceNode};
use crate::rest::{
    build_url, record_segments, validate_segment, BoundCollection, DispatchMode, OwnerRef, ResourceError,
};

/// One fetched mapping, tagged with its model and the node it came from.
///
/// A record remembers the lineage it was reached through (never the owning
/// record itself), so navigating further with [`Record::relation`] composes
/// the full nested path.
#[derive(Clone)]
pub struct Record {
    api: Api,
    node: NodeId,
    owner: Option<Arc<OwnerRef>>,
    model: String,
    attributes: Map<String, Value>,
}

impl Record {
    pub(crate) const fn new(
        api: Api,
        node: NodeId,
        owner: Option<Arc<OwnerRef>>,
        model: String,
        attributes: Map<String, Value>,
    ) -> Self {
        Self {
            api,
            node,
            owner,
            model,
            attributes,
        }
    }

    /// Returns the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns every attribute.
    #[must_use]
    pub const fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Returns one attribute.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns one attribute if it is a string.
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns the value of the node's identifying attribute as a path
    /// segment. Strings and numbers qualify; anything else does not.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        match self.get(self.node().id_attribute())? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Returns the node this record was fetched from.
    #[must_use]
    pub fn node(&self) -> &ResourceNode {
        self.api.tree().node(self.node)
    }

    /// Returns the reference to the record this one was reached through.
    #[must_use]
    pub fn owner(&self) -> Option<&OwnerRef> {
        self.owner.as_deref()
    }

    /// Returns the keys navigable from this record, sorted.
    #[must_use]
    pub fn relations(&self) -> Vec<&str> {
        self.api.tree().relations().keys_for(&self.model)
    }

    /// Returns this record's URL, or its collection's URL when it has no
    /// identifier.
    #[must_use]
    pub fn url(&self) -> String {
        let tree = self.api.tree();
        let root_url = self.api.dispatcher().root_url();
        match self.id() {
            Some(id) if validate_segment(&id).is_ok() => {
                let this = OwnerRef::new(self.node, id, self.owner.clone());
                build_url(root_url, &record_segments(tree, &this), &DispatchMode::All)
            }
            _ => self
                .api
                .dispatcher()
                .url(tree, self.node, self.owner(), &DispatchMode::All),
        }
    }

    /// Navigates to the child collection bound under `key` on this record's
    /// model.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::UnknownRelation`] if the model has no such relation
    /// - [`ResourceError::MissingIdentifier`] if this record has no usable
    ///   identifier to prefix the child path with
    /// - [`ResourceError::InvalidIdentifier`] if the identifier is `.` or `..`
    pub fn relation(&self, key: &str) -> Result<BoundCollection, ResourceError> {
        let target = self
            .api
            .tree()
            .relations()
            .lookup(&self.model, key)
            .ok_or_else(|| ResourceError::UnknownRelation {
                host: self.model.clone(),
                key: key.to_string(),
            })?;

        let id = self.id().ok_or_else(|| ResourceError::MissingIdentifier {
            model: self.model.clone(),
            attribute: self.node().id_attribute().to_string(),
        })?;
        validate_segment(&id)?;

        let owner = Arc::new(OwnerRef::new(self.node, id, self.owner.clone()));
        Ok(BoundCollection::new(self.api.clone(), target, Some(owner)))
    }

    /// Converts the record into its model type.
    ///
    /// # Errors
    ///
    /// - [`ResourceError::ModelMismatch`] if the record is not a `T::NAME`
    /// - [`ResourceError::Decode`] if the attributes do not deserialize
    pub fn to_model<T: Model>(&self) -> Result<T, ResourceError> {
        if self.model != T::NAME {
            return Err(ResourceError::ModelMismatch {
                expected: T::NAME,
                actual: self.model.clone(),
            });
        }
        serde_json::from_value(Value::Object(self.attributes.clone())).map_err(|e| ResourceError::Decode {
            url: self.url(),
            reason: e.to_string(),
        })
    }

    /// Consumes the record, returning its attributes.
    #[must_use]
    pub fn into_attributes(self) -> Map<String, Value> {
        self.attributes
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("model", &self.model)
            .field("node", &self.node)
            .field("owner", &self.owner)
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
            && self.owner == other.owner
            && self.model == other.model
            && self.attributes == other.attributes
    }
}
