//! HTTP request types handed to the transport.
//!
//! This module provides the [`HttpRequest`] type and its builder.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Query parameters passed through to the transport.
///
/// A `BTreeMap` keeps the encoded query string deterministic.
pub type Query = BTreeMap<String, String>;

/// HTTP methods a transport must understand.
///
/// Collections only issue [`HttpMethod::Get`], but requests carry the method
/// so a transport is not tied to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for updating resources.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A request to be executed by a [`Transport`](crate::clients::Transport).
///
/// # Example
///
/// ```rust
/// use restroom::clients::{HttpMethod, HttpRequest};
///
/// let request = HttpRequest::builder(HttpMethod::Get, "https://scifi.org/api/authors")
///     .query_param("awesome", "true")
///     .header("AUTH_HEADER", "token")
///     .build();
///
/// assert_eq!(request.query.get("awesome"), Some(&"true".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute URL, without query string.
    pub url: String,
    /// Query parameters to append to the URL.
    pub query: Query,
    /// Headers for this request only, merged over the transport defaults.
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    url: String,
    query: Query,
    headers: HashMap<String, String>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            http_method: method,
            url: url.into(),
            query: Query::new(),
            headers: HashMap::new(),
        }
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Builds the [`HttpRequest`].
    #[must_use]
    pub fn build(self) -> HttpRequest {
        HttpRequest {
            http_method: self.http_method,
            url: self.url,
            query: self.query,
            headers: self.headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_builder_creates_bare_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "https://scifi.org/api/authors").build();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.url, "https://scifi.org/api/authors");
        assert!(request.query.is_empty());
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_query_replaces_previous_params() {
        let mut query = Query::new();
        query.insert("awesome".to_string(), "true".to_string());

        let request = HttpRequest::builder(HttpMethod::Get, "https://scifi.org")
            .query_param("limit", "5")
            .query(query)
            .build();

        assert_eq!(request.query.len(), 1);
        assert_eq!(request.query.get("awesome"), Some(&"true".to_string()));
    }
}
