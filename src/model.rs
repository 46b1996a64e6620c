//! Domain model registration.
//!
//! Model types stay plain data carriers: a [`Model`] is any deserializable
//! type with a name. The [`ModelRegistry`] knows which names exist (so the
//! tree builder can infer `Author` from `authors`) and how to check that a
//! fetched mapping really constructs the model before it is handed out.
//!
//! # Example
//!
//! ```rust
//! use restroom::{Model, ModelRegistry};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Author {
//!     id: u64,
//!     name: String,
//! }
//!
//! impl Model for Author {
//!     const NAME: &'static str = "Author";
//! }
//!
//! let mut models = ModelRegistry::new();
//! models.register::<Author>();
//! assert!(models.contains("Author"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A domain type that resource records materialize as.
pub trait Model: DeserializeOwned + Send + Sync + 'static {
    /// The model name used for inference and relation lookup (e.g. "Author").
    const NAME: &'static str;
}

type Constructor = Arc<dyn Fn(&Map<String, Value>) -> Result<(), String> + Send + Sync>;

/// A registered model: its name and, for typed models, a constructor check.
#[derive(Clone)]
pub struct ModelType {
    name: String,
    constructor: Option<Constructor>,
}

impl ModelType {
    /// Returns the model name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` when mappings are checked against a Rust type.
    #[must_use]
    pub const fn is_typed(&self) -> bool {
        self.constructor.is_some()
    }

    /// Checks that `attributes` construct this model.
    ///
    /// Untyped models accept any mapping.
    ///
    /// # Errors
    ///
    /// Returns the deserialization failure as a message.
    pub fn construct(&self, attributes: &Map<String, Value>) -> Result<(), String> {
        self.constructor
            .as_ref()
            .map_or(Ok(()), |construct| construct(attributes))
    }
}

impl fmt::Debug for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelType")
            .field("name", &self.name)
            .field("typed", &self.is_typed())
            .finish()
    }
}

/// The set of models an API definition can refer to by name.
#[derive(Clone, Debug, Default)]
pub struct ModelRegistry {
    models: HashMap<String, ModelType>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under `T::NAME`, replacing any earlier registration.
    pub fn register<T: Model>(&mut self) {
        let constructor: Constructor = Arc::new(|attributes: &Map<String, Value>| {
            serde_json::from_value::<T>(Value::Object(attributes.clone()))
                .map(|_| ())
                .map_err(|e| e.to_string())
        });
        self.models.insert(
            T::NAME.to_string(),
            ModelType {
                name: T::NAME.to_string(),
                constructor: Some(constructor),
            },
        );
    }

    /// Registers a model by name only; records of it are never type-checked.
    pub fn register_named(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.models.insert(
            name.clone(),
            ModelType {
                name,
                constructor: None,
            },
        );
    }

    /// Looks up a model by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ModelType> {
        self.models.get(name)
    }

    /// Returns `true` if a model with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Returns the number of registered models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns `true` if no model is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Book {
        key: String,
        title: String,
    }

    impl Model for Book {
        const NAME: &'static str = "Book";
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_typed_model_accepts_matching_mapping() {
        let mut models = ModelRegistry::new();
        models.register::<Book>();

        let book = models.get("Book").unwrap();
        assert!(book.is_typed());
        assert!(book
            .construct(&object(json!({"key": "mona-lisa-overdrive", "title": "Mona Lisa Overdrive"})))
            .is_ok());
    }

    #[test]
    fn test_typed_model_rejects_missing_field() {
        let mut models = ModelRegistry::new();
        models.register::<Book>();

        let error = models
            .get("Book")
            .unwrap()
            .construct(&object(json!({"key": "neuromancer"})))
            .unwrap_err();
        assert!(error.contains("title"));
    }

    #[test]
    fn test_named_model_accepts_anything() {
        let mut models = ModelRegistry::new();
        models.register_named("Influence");

        let influence = models.get("Influence").unwrap();
        assert!(!influence.is_typed());
        assert!(influence.construct(&Map::new()).is_ok());
    }

    #[test]
    fn test_registration_replaces_by_name() {
        let mut models = ModelRegistry::new();
        models.register_named("Book");
        models.register::<Book>();

        assert_eq!(models.len(), 1);
        assert!(models.get("Book").unwrap().is_typed());
        assert!(!models.is_empty());
    }
}
