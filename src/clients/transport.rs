//! The transport seam between the resource tree and the network.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::clients::{HttpRequest, HttpResponse, Middleware, TransportError};

/// Executes HTTP requests on behalf of an [`Api`](crate::Api).
///
/// Implementations return every completed exchange as `Ok`, whatever its
/// status code; only failures to complete the exchange are errors. There are
/// no retries at this layer or above it.
///
/// [`HttpClient`](crate::clients::HttpClient) is the default implementation.
/// Tests and embedders can supply their own through
/// [`ApiBuilder::transport`](crate::ApiBuilder::transport).
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends `request` and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Timeout`] if the request timed out,
    /// [`TransportError::InvalidRequest`] if it could not be built and
    /// [`TransportError::Connection`] for any other transport failure.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Runs a middleware chain on every request, then hands it to another
/// transport.
///
/// Used when middleware is combined with a custom transport.
#[derive(Debug)]
pub struct MiddlewareTransport {
    inner: Arc<dyn Transport>,
    middleware: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareTransport {
    /// Wraps `inner` with an empty chain.
    #[must_use]
    pub fn new(inner: Arc<dyn Transport>) -> Self {
        Self {
            inner,
            middleware: Vec::new(),
        }
    }

    /// Appends a middleware to the chain.
    #[must_use]
    pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Returns the number of installed middleware.
    #[must_use]
    pub fn middleware_count(&self) -> usize {
        self.middleware.len()
    }
}

#[async_trait]
impl Transport for MiddlewareTransport {
    async fn execute(&self, mut request: HttpRequest) -> Result<HttpResponse, TransportError> {
        for middleware in &self.middleware {
            middleware.on_request(&mut request);
        }
        self.inner.execute(request).await
    }
}
