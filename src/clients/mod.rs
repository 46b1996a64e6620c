//! HTTP transport types.
//!
//! The resource tree never talks to the network directly. It hands an
//! [`HttpRequest`] to a [`Transport`] and gets back a raw [`HttpResponse`]
//! or a [`TransportError`].
//!
//! - [`Transport`]: the collaborator trait
//! - [`HttpClient`]: the reqwest implementation used by default
//! - [`Middleware`] / [`HeaderMiddleware`]: pass-through request hooks
//! - [`HttpRequest`], [`HttpResponse`], [`HttpMethod`], [`Query`]
//!
//! # Example
//!
//! ```rust,ignore
//! use restroom::clients::{HttpClient, HttpMethod, HttpRequest, Transport};
//!
//! let client = HttpClient::new(&config)?;
//! let request = HttpRequest::builder(HttpMethod::Get, "https://scifi.org/api/authors")
//!     .query_param("awesome", "true")
//!     .build();
//!
//! let response = client.execute(request).await?;
//! println!("{} {}", response.code, response.body);
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod middleware;
mod transport;

pub use errors::TransportError;
pub use http_client::{HttpClient, RESTROOM_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder, Query};
pub use http_response::HttpResponse;
pub use middleware::{validate_header, HeaderMiddleware, Middleware};
pub use transport::{MiddlewareTransport, Transport};
