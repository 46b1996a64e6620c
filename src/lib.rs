//! # restroom
//!
//! Describe a REST API as a tree of nested resources and get typed,
//! navigable collections for it.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`RestroomConfig`] and [`RestroomConfigBuilder`]
//! - A declaration surface ([`ApiBuilder::define`], [`ApiBuilder::declare_json`])
//!   resolved once into an immutable [`Api`]
//! - Model inference from resource names and a central relation table, so a
//!   fetched record can navigate to its children ([`Record::relation`])
//! - Inherited response filters ([`ResponseFilter`])
//! - `all`, `get` and `filter` on every [`BoundCollection`]
//! - A small error taxonomy: [`ConfigError`] at build time,
//!   [`ResourceError`] at call time
//! - An async reqwest transport with middleware, replaceable through the
//!   [`Transport`](clients::Transport) trait
//!
//! ## Quick Start
//!
//! ```rust
//! use restroom::{Api, BaseUrl, RestroomConfig};
//! use restroom::resource::NodeOptions;
//!
//! let config = RestroomConfig::builder()
//!     .base_url(BaseUrl::new("https://scifi.org").unwrap())
//!     .base_path("api")
//!     .build()
//!     .unwrap();
//!
//! let api = Api::builder(config)
//!     .model_named("Author")
//!     .model_named("Book")
//!     .define(|root| {
//!         root.expose_with("authors", NodeOptions::new(), |authors| {
//!             authors.expose("titles", NodeOptions::new().model("Book").resource("books"));
//!         });
//!     })
//!     .build()
//!     .unwrap();
//!
//! println!("{}", api.dump());
//! ```
//!
//! ## Fetching
//!
//! ```rust,ignore
//! let authors = api.collection("authors")?;
//!
//! let everyone = authors.all().await?;
//! let gibson = authors.get(2).await?;
//! let books = gibson.relation("titles")?.all().await?;
//! ```
//!
//! ## Typed models
//!
//! ```rust,ignore
//! #[derive(Debug, serde::Deserialize)]
//! struct Book {
//!     key: String,
//!     title: String,
//! }
//!
//! impl restroom::Model for Book {
//!     const NAME: &'static str = "Book";
//! }
//!
//! let api = Api::builder(config).model::<Book>() /* ... */ .build()?;
//! let book: Book = titles.get_as("mona-lisa-overdrive").await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: the definition lives in the [`Api`] value
//! - **Fail fast**: declaration errors surface from [`ApiBuilder::build`]
//! - **Thread-safe**: every public type is `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod model;
pub mod resource;
pub mod rest;

// Re-export public types at crate root for convenience
pub use api::{Api, ApiBuilder, DEFAULT_HOST};
pub use config::{BaseUrl, RestroomConfig, RestroomConfigBuilder};
pub use error::ConfigError;
pub use model::{Model, ModelRegistry};

// Re-export call-time types
pub use clients::Query;
pub use rest::{BoundCollection, Record, ResourceError, ResponseFilter};
