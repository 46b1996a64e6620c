//! Request middleware applied by [`HttpClient`](crate::clients::HttpClient).
//!
//! Middleware is pass-through: it may rewrite the outgoing request (inject
//! an auth token, add a tracing header) but never sees the response.

use std::fmt;

use reqwest::header::{HeaderName, HeaderValue};

use crate::clients::HttpRequest;
use crate::error::ConfigError;

/// Checks that `name: value` is a header reqwest can send.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidHeader`] for an illegal name or value.
pub fn validate_header(name: &str, value: &str) -> Result<(), ConfigError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|e| ConfigError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}

/// A hook run on every outgoing request, in installation order.
pub trait Middleware: Send + Sync + fmt::Debug {
    /// Rewrites the request before it is sent.
    fn on_request(&self, request: &mut HttpRequest);
}

/// Sets a fixed header on every request.
///
/// # Example
///
/// ```rust
/// use restroom::clients::{HeaderMiddleware, HttpMethod, HttpRequest, Middleware};
///
/// let auth = HeaderMiddleware::new("AUTH_HEADER", "token")?;
/// let mut request = HttpRequest::builder(HttpMethod::Get, "https://scifi.org").build();
/// auth.on_request(&mut request);
///
/// assert_eq!(request.headers.get("AUTH_HEADER"), Some(&"token".to_string()));
/// # Ok::<(), restroom::ConfigError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderMiddleware {
    name: String,
    value: String,
}

impl HeaderMiddleware {
    /// Creates a middleware that sets `name: value`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if the pair cannot be sent.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        let value = value.into();
        validate_header(&name, &value)?;
        Ok(Self { name, value })
    }

    /// Creates a middleware that sends `Authorization: Bearer <token>`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if the token contains
    /// characters not allowed in a header value.
    pub fn bearer(token: impl AsRef<str>) -> Result<Self, ConfigError> {
        Self::new("Authorization", format!("Bearer {}", token.as_ref()))
    }
}

impl Middleware for HeaderMiddleware {
    fn on_request(&self, request: &mut HttpRequest) {
        request.headers.insert(self.name.clone(), self.value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpMethod;

    #[test]
    fn test_bearer_formats_authorization_header() {
        let middleware = HeaderMiddleware::bearer("abc").unwrap();
        let mut request = HttpRequest::builder(HttpMethod::Get, "https://scifi.org").build();
        middleware.on_request(&mut request);

        assert_eq!(
            request.headers.get("Authorization"),
            Some(&"Bearer abc".to_string())
        );
    }

    #[test]
    fn test_header_middleware_overrides_request_header() {
        let middleware = HeaderMiddleware::new("AUTH_HEADER", "token").unwrap();
        let mut request = HttpRequest::builder(HttpMethod::Get, "https://scifi.org")
            .header("AUTH_HEADER", "stale")
            .build();
        middleware.on_request(&mut request);

        assert_eq!(request.headers.get("AUTH_HEADER"), Some(&"token".to_string()));
    }

    #[test]
    fn test_unsendable_headers_are_rejected() {
        assert!(matches!(
            HeaderMiddleware::new("bad header", "x"),
            Err(ConfigError::InvalidHeader { .. })
        ));
        assert!(matches!(
            HeaderMiddleware::new("AUTH_HEADER", "line\nbreak"),
            Err(ConfigError::InvalidHeader { .. })
        ));
        assert!(HeaderMiddleware::bearer("abc\r\n").is_err());
    }
}
