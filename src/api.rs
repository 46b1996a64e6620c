//! The API definition: a resolved resource tree bound to a transport.
//!
//! An [`Api`] is built once with [`ApiBuilder`] and is immutable afterwards.
//! It is cheap to clone and can be shared freely between tasks; every
//! collection and record keeps a handle to it.
//!
//! # Example
//!
//! ```rust
//! use restroom::{Api, BaseUrl, RestroomConfig};
//! use restroom::resource::NodeOptions;
//! use restroom::rest::ResponseFilter;
//!
//! let config = RestroomConfig::builder()
//!     .base_url(BaseUrl::new("https://scifi.org").unwrap())
//!     .base_path("api")
//!     .build()
//!     .unwrap();
//!
//! let api = Api::builder(config)
//!     .host("Client")
//!     .model_named("Author")
//!     .model_named("Book")
//!     .define(|root| {
//!         root.expose_with("authors", NodeOptions::new(), |authors| {
//!             authors.expose(
//!                 "influences",
//!                 NodeOptions::new()
//!                     .model("Author")
//!                     .response_filter(ResponseFilter::extract("influences")),
//!             );
//!             authors.expose(
//!                 "titles",
//!                 NodeOptions::new()
//!                     .model("Book")
//!                     .resource("books")
//!                     .id_attribute("key")
//!                     .response_filter(ResponseFilter::extract("data")),
//!             );
//!         });
//!     })
//!     .build()
//!     .unwrap();
//!
//! let authors = api.collection("authors").unwrap();
//! assert_eq!(authors.url(), "https://scifi.org/api/authors");
//! ```

use std::sync::Arc;

use serde_json::Value;

use crate::clients::{HttpClient, Middleware, MiddlewareTransport, Transport};
use crate::config::RestroomConfig;
use crate::error::ConfigError;
use crate::model::{Model, ModelRegistry};
use crate::resource::{build_tree, NodeBuilder, ResourceTree, RootDeclaration};
use crate::rest::{BoundCollection, Dispatcher, ResourceError};

/// Host name the root's children are bound on when none is given.
pub const DEFAULT_HOST: &str = "Api";

/// An immutable API definition.
///
/// # Thread Safety
///
/// `Api` is `Clone`, `Send` and `Sync`; clones share one definition.
#[derive(Clone, Debug)]
pub struct Api {
    inner: Arc<ApiInner>,
}

#[derive(Debug)]
struct ApiInner {
    config: RestroomConfig,
    host: String,
    models: ModelRegistry,
    tree: ResourceTree,
    dispatcher: Dispatcher,
}

// Verify Api is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Api>();
};

impl Api {
    /// Starts a new definition.
    #[must_use]
    pub fn builder(config: RestroomConfig) -> ApiBuilder {
        ApiBuilder::new(config)
    }

    /// Returns the top-level collection declared under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownRelation`] if no top-level resource
    /// has that key.
    pub fn collection(&self, key: &str) -> Result<BoundCollection, ResourceError> {
        self.navigate(&self.inner.host, key)
    }

    /// Returns the collection bound under `key` on `host`, with no owning
    /// record.
    ///
    /// This is type-level navigation: `navigate("Author", "titles")` lists
    /// every title below every author (`authors/books`), where
    /// [`Record::relation`](crate::Record::relation) lists one author's.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownRelation`] if nothing is bound under
    /// `(host, key)`.
    pub fn navigate(&self, host: &str, key: &str) -> Result<BoundCollection, ResourceError> {
        let node = self
            .inner
            .tree
            .relations()
            .lookup(host, key)
            .ok_or_else(|| ResourceError::UnknownRelation {
                host: host.to_string(),
                key: key.to_string(),
            })?;
        Ok(BoundCollection::new(self.clone(), node, None))
    }

    /// Returns the top-level keys, sorted.
    #[must_use]
    pub fn collections(&self) -> Vec<&str> {
        self.inner.tree.relations().keys_for(&self.inner.host)
    }

    /// Returns the declaring host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.inner.host
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RestroomConfig {
        &self.inner.config
    }

    /// Returns the resolved tree.
    #[must_use]
    pub fn tree(&self) -> &ResourceTree {
        &self.inner.tree
    }

    /// Returns the registered models.
    #[must_use]
    pub fn models(&self) -> &ModelRegistry {
        &self.inner.models
    }

    /// Returns the dispatcher every collection sends through.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    /// Renders the tree, one node per line.
    #[must_use]
    pub fn dump(&self) -> String {
        self.inner.tree.dump()
    }
}

/// Builder for an [`Api`].
///
/// Registration order does not matter: models, hosts and relations are
/// resolved together in [`ApiBuilder::build`].
#[derive(Debug)]
pub struct ApiBuilder {
    config: RestroomConfig,
    host: String,
    models: ModelRegistry,
    middleware: Vec<Arc<dyn Middleware>>,
    transport: Option<Arc<dyn Transport>>,
    root: NodeBuilder,
}

impl ApiBuilder {
    fn new(config: RestroomConfig) -> Self {
        Self {
            config,
            host: DEFAULT_HOST.to_string(),
            models: ModelRegistry::new(),
            middleware: Vec::new(),
            transport: None,
            root: NodeBuilder::root(),
        }
    }

    /// Names the declaring host (default `"Api"`).
    #[must_use]
    pub fn host(mut self, name: impl Into<String>) -> Self {
        self.host = name.into();
        self
    }

    /// Registers a typed model under `T::NAME`.
    #[must_use]
    pub fn model<T: Model>(mut self) -> Self {
        self.models.register::<T>();
        self
    }

    /// Registers an untyped model; its records accept any mapping.
    #[must_use]
    pub fn model_named(mut self, name: impl Into<String>) -> Self {
        self.models.register_named(name);
        self
    }

    /// Adds a middleware, run on every request in installation order.
    ///
    /// Applies to the default transport and to one installed with
    /// [`ApiBuilder::transport`] alike.
    #[must_use]
    pub fn middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Arc::new(middleware));
        self
    }

    /// Replaces the default reqwest transport.
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Declares resources under the root.
    ///
    /// May be called more than once; declarations accumulate.
    #[must_use]
    pub fn define<F>(mut self, block: F) -> Self
    where
        F: FnOnce(&mut NodeBuilder),
    {
        block(&mut self.root);
        self
    }

    /// Declares resources from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDeclaration`] for unknown fields or a
    /// wrong shape.
    pub fn declare_json(mut self, declaration: Value) -> Result<Self, ConfigError> {
        RootDeclaration::from_json(declaration)?.apply(&mut self.root);
        Ok(self)
    }

    /// Resolves the declaration and creates the transport.
    ///
    /// # Errors
    ///
    /// Returns every declaration error described on
    /// [`build_tree`], [`ConfigError::InvalidHeader`] if a configured header
    /// cannot be sent, or [`ConfigError::HttpClient`] if the default
    /// transport cannot be created.
    pub fn build(self) -> Result<Api, ConfigError> {
        let tree = build_tree(self.root, &self.host, &self.models)?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) if self.middleware.is_empty() => transport,
            Some(transport) => Arc::new(
                self.middleware
                    .into_iter()
                    .fold(MiddlewareTransport::new(transport), MiddlewareTransport::with_middleware),
            ),
            None => {
                let client = self
                    .middleware
                    .into_iter()
                    .fold(HttpClient::new(&self.config)?, HttpClient::with_middleware);
                Arc::new(client)
            }
        };

        tracing::debug!("Resource tree for {}:\n{}", self.host, tree.dump());

        let dispatcher = Dispatcher::new(self.config.root_url(), transport);
        Ok(Api {
            inner: Arc::new(ApiInner {
                config: self.config,
                host: self.host,
                models: self.models,
                tree,
                dispatcher,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{HttpRequest, HttpResponse, TransportError};
    use crate::config::BaseUrl;
    use crate::resource::NodeOptions;
    use crate::rest::ResponseFilter;
    use async_trait::async_trait;
    use serde::Deserialize;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    struct StubTransport {
        routes: HashMap<String, (u16, String)>,
    }

    impl StubTransport {
        fn respond(mut self, url: &str, body: Value) -> Self {
            self.routes.insert(url.to_string(), (200, body.to_string()));
            self
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let (code, body) = self
                .routes
                .get(&request.url)
                .cloned()
                .unwrap_or((404, String::new()));
            Ok(HttpResponse::new(code, HashMap::new(), body))
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Book {
        key: String,
        title: String,
    }

    impl Model for Book {
        const NAME: &'static str = "Book";
    }

    fn config() -> RestroomConfig {
        RestroomConfig::builder()
            .base_url(BaseUrl::new("https://scifi.org").unwrap())
            .base_path("api")
            .build()
            .unwrap()
    }

    fn scifi(transport: StubTransport) -> Api {
        Api::builder(config())
            .host("Client")
            .model_named("Author")
            .model::<Book>()
            .transport(transport)
            .define(|root| {
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
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_collection_is_bound_on_declaring_host() {
        let api = scifi(StubTransport::default());

        assert_eq!(api.host(), "Client");
        assert_eq!(api.collections(), vec!["authors"]);
        assert!(api.collection("authors").is_ok());
        assert_eq!(
            api.collection("titles").unwrap_err(),
            ResourceError::UnknownRelation {
                host: "Client".to_string(),
                key: "titles".to_string(),
            }
        );
    }

    #[test]
    fn test_default_host() {
        let api = Api::builder(config())
            .model_named("Author")
            .transport(StubTransport::default())
            .define(|root| {
                root.expose("authors", NodeOptions::new());
            })
            .build()
            .unwrap();

        assert_eq!(api.host(), DEFAULT_HOST);
        assert!(api.collection("authors").is_ok());
    }

    #[test]
    fn test_build_reports_missing_model() {
        let result = Api::builder(config())
            .transport(StubTransport::default())
            .define(|root| {
                root.expose("authors", NodeOptions::new());
            })
            .build();

        assert_eq!(
            result.unwrap_err(),
            ConfigError::ModelNotFound {
                name: "Author".to_string(),
                key: "authors".to_string(),
            }
        );
    }

    #[test]
    fn test_declare_json_rejects_unknown_fields() {
        let result = Api::builder(config()).declare_json(json!({
            "exposes": [{"key": "authors", "paginate": true}]
        }));

        assert!(matches!(result, Err(ConfigError::InvalidDeclaration { .. })));
    }

    #[test]
    fn test_default_transport_is_created() {
        let api = Api::builder(config())
            .model_named("Author")
            .middleware(crate::clients::HeaderMiddleware::new("AUTH_HEADER", "token").unwrap())
            .define(|root| {
                root.expose("authors", NodeOptions::new());
            })
            .build()
            .unwrap();

        assert_eq!(api.dispatcher().root_url(), "https://scifi.org/api");
    }

    #[tokio::test]
    async fn test_navigation_through_records() {
        let api = scifi(
            StubTransport::default()
                .respond(
                    "https://scifi.org/api/authors/2",
                    json!({"id": 2, "name": "William Gibson"}),
                )
                .respond(
                    "https://scifi.org/api/authors/2/books/mona-lisa-overdrive",
                    json!({"data": {"key": "mona-lisa-overdrive", "title": "Mona Lisa Overdrive"}}),
                ),
        );

        let gibson = api.collection("authors").unwrap().get(2).await.unwrap();
        assert_eq!(gibson.model(), "Author");
        assert_eq!(gibson.id(), Some("2".to_string()));
        assert_eq!(gibson.relations(), vec!["influences", "titles"]);
        assert_eq!(gibson.url(), "https://scifi.org/api/authors/2");

        let titles = gibson.relation("titles").unwrap();
        assert_eq!(titles.url(), "https://scifi.org/api/authors/2/books");

        let book = titles.get("mona-lisa-overdrive").await.unwrap();
        assert_eq!(book.model(), "Book");
        assert_eq!(book.owner().map(|owner| owner.id()), Some("2"));
        assert_eq!(
            book.to_model::<Book>().unwrap(),
            Book {
                key: "mona-lisa-overdrive".to_string(),
                title: "Mona Lisa Overdrive".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_relation_errors() {
        let api = scifi(StubTransport::default().respond(
            "https://scifi.org/api/authors",
            json!([{"name": "Anonymous"}]),
        ));

        let records = api.collection("authors").unwrap().all().await.unwrap();
        let anonymous = &records[0];

        assert!(matches!(
            anonymous.relation("titles"),
            Err(ResourceError::MissingIdentifier { .. })
        ));
        assert!(matches!(
            anonymous.relation("reviews"),
            Err(ResourceError::UnknownRelation { .. })
        ));
        assert!(matches!(
            anonymous.to_model::<Book>(),
            Err(ResourceError::ModelMismatch { expected: "Book", .. })
        ));
    }

    #[tokio::test]
    async fn test_dot_identifier_cannot_be_navigated() {
        let api = scifi(StubTransport::default().respond(
            "https://scifi.org/api/authors",
            json!([{"id": ".."}, {"id": "."}]),
        ));

        let records = api.collection("authors").unwrap().all().await.unwrap();

        for record in &records {
            assert!(matches!(
                record.relation("titles"),
                Err(ResourceError::InvalidIdentifier { .. })
            ));
            assert_eq!(record.url(), "https://scifi.org/api/authors");
        }
    }

    #[test]
    fn test_navigate_by_host_and_key() {
        let api = scifi(StubTransport::default());

        let titles = api.navigate("Author", "titles").unwrap();
        assert_eq!(titles.url(), "https://scifi.org/api/authors/books");

        let authors = api.navigate("Client", "authors").unwrap();
        assert_eq!(authors.url(), api.collection("authors").unwrap().url());

        assert_eq!(
            api.navigate("Book", "titles").unwrap_err(),
            ResourceError::UnknownRelation {
                host: "Book".to_string(),
                key: "titles".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_middleware_wraps_custom_transport() {
        #[derive(Debug, Default)]
        struct HeaderEcho;

        #[async_trait]
        impl Transport for HeaderEcho {
            async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
                let token = request.headers.get("AUTH_HEADER").cloned().unwrap_or_default();
                Ok(HttpResponse::new(
                    200,
                    HashMap::new(),
                    json!([{"id": 1, "token": token}]).to_string(),
                ))
            }
        }

        let api = Api::builder(config())
            .model_named("Author")
            .middleware(crate::clients::HeaderMiddleware::new("AUTH_HEADER", "token").unwrap())
            .transport(HeaderEcho)
            .define(|root| {
                root.expose("authors", NodeOptions::new());
            })
            .build()
            .unwrap();

        let authors = api.collection("authors").unwrap().all().await.unwrap();
        assert_eq!(authors[0].get_str("token"), Some("token"));
    }

    #[test]
    fn test_invalid_config_header_fails_build() {
        let config = RestroomConfig::builder()
            .base_url(BaseUrl::new("https://scifi.org").unwrap())
            .header("bad header", "x")
            .build()
            .unwrap();

        let result = Api::builder(config)
            .model_named("Author")
            .define(|root| {
                root.expose("authors", NodeOptions::new());
            })
            .build();

        assert!(matches!(result, Err(ConfigError::InvalidHeader { .. })));
    }

    #[tokio::test]
    async fn test_typed_model_failure_returns_no_records() {
        let api = scifi(
            StubTransport::default()
                .respond("https://scifi.org/api/authors/2", json!({"id": 2}))
                .respond(
                    "https://scifi.org/api/authors/2/books",
                    json!({"data": [
                        {"key": "neuromancer", "title": "Neuromancer"},
                        {"key": "count-zero"}
                    ]}),
                ),
        );

        let gibson = api.collection("authors").unwrap().get(2).await.unwrap();
        let titles = gibson.relation("titles").unwrap();

        assert!(matches!(titles.all().await, Err(ResourceError::Decode { .. })));
        assert!(matches!(
            titles.all_as::<Book>().await,
            Err(ResourceError::Decode { .. })
        ));
    }

    #[tokio::test]
    async fn test_unstubbed_path_is_an_api_error() {
        let api = scifi(StubTransport::default());
        let error = api.collection("authors").unwrap().get(9).await.unwrap_err();

        assert_eq!(error.status(), Some(404));
    }
}
