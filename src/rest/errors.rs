//! Call-time error types.
//!
//! Every transport outcome is classified once, by the dispatcher:
//!
//! - transport failure (timeout, connection) -> [`ResourceError::Network`]
//! - **401 / 403** -> [`ResourceError::Authentication`]
//! - any other non-2xx -> [`ResourceError::Api`]
//! - undecodable or mis-shaped payload -> [`ResourceError::Decode`]
//!
//! Nothing is retried; callers decide.
//!
//! # Example
//!
//! ```rust,ignore
//! use restroom::rest::ResourceError;
//!
//! match authors.get(5).await {
//!     Ok(author) => println!("Found: {:?}", author.get("name")),
//!     Err(ResourceError::Authentication { code, .. }) => println!("refused with {code}"),
//!     Err(ResourceError::Network { source, .. }) if source.is_timeout() => println!("timed out"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::{HttpResponse, TransportError};

/// Longest body excerpt kept in error messages.
const MAX_MESSAGE_LEN: usize = 512;

/// Error type for collection and record operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// The exchange did not complete (timeout, connection failure).
    #[error("Network error for {url}: {source}")]
    Network {
        /// The requested URL.
        url: String,
        /// The transport failure.
        #[source]
        source: TransportError,
    },

    /// The server refused the credentials (HTTP 401 or 403).
    #[error("Authentication failed for {url} ({code}): {message}")]
    Authentication {
        /// The HTTP status code.
        code: u16,
        /// The requested URL.
        url: String,
        /// Excerpt of the response body.
        message: String,
        /// The X-Request-Id header value, if any.
        request_id: Option<String>,
    },

    /// Any other non-success status.
    #[error("API error for {url} ({code}): {message}")]
    Api {
        /// The HTTP status code.
        code: u16,
        /// The requested URL.
        url: String,
        /// Excerpt of the response body.
        message: String,
        /// The X-Request-Id header value, if any.
        request_id: Option<String>,
    },

    /// The response could not be decoded into the expected records.
    #[error("Could not decode response from {url}: {reason}")]
    Decode {
        /// The requested URL.
        url: String,
        /// What was wrong with the payload.
        reason: String,
    },

    /// A record has no usable value for its identifying attribute.
    #[error("{model} record has no usable '{attribute}' to navigate from")]
    MissingIdentifier {
        /// The record's model.
        model: String,
        /// The identifying attribute.
        attribute: String,
    },

    /// No relation with this key is bound on the host.
    #[error("{host} has no relation named '{key}'")]
    UnknownRelation {
        /// The host that was navigated from.
        host: String,
        /// The requested key.
        key: String,
    },

    /// An identifier or sub-path segment would not address anything below
    /// its collection (empty, `.` or `..`).
    #[error("Invalid path segment '{segment}': identifiers must be non-empty and not '.' or '..'")]
    InvalidIdentifier {
        /// The rejected segment.
        segment: String,
    },

    /// The transport could not build the request (e.g. an invalid header
    /// set by a middleware). Nothing was sent.
    #[error("Invalid request for {url}: {source}")]
    InvalidRequest {
        /// The requested URL.
        url: String,
        /// The transport's refusal.
        #[source]
        source: TransportError,
    },

    /// A record was converted into a model of another name.
    #[error("Record is a {actual}, not a {expected}")]
    ModelMismatch {
        /// The requested model.
        expected: &'static str,
        /// The record's model.
        actual: String,
    },

    /// Query parameters could not be serialized.
    #[error("Invalid query parameters: {reason}")]
    InvalidQuery {
        /// Why serialization failed.
        reason: String,
    },
}

impl ResourceError {
    /// Classifies a completed exchange.
    ///
    /// Returns `None` for 2xx responses.
    #[must_use]
    pub fn from_http_response(url: &str, response: &HttpResponse) -> Option<Self> {
        if response.is_ok() {
            return None;
        }

        let code = response.code;
        let message = excerpt(&response.body);
        let request_id = response.request_id().map(ToString::to_string);
        let url = url.to_string();

        Some(match code {
            401 | 403 => Self::Authentication {
                code,
                url,
                message,
                request_id,
            },
            _ => Self::Api {
                code,
                url,
                message,
                request_id,
            },
        })
    }

    /// Returns the HTTP status code for status-based errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { code, .. } | Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::Authentication { request_id, .. } | Self::Api { request_id, .. } => {
                request_id.as_deref()
            }
            _ => None,
        }
    }

    /// Returns `true` for [`ResourceError::Network`].
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

fn excerpt(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_MESSAGE_LEN) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn response(code: u16, body: &str) -> HttpResponse {
        HttpResponse::new(code, HashMap::new(), body)
    }

    #[test]
    fn test_success_is_not_an_error() {
        assert!(ResourceError::from_http_response("u", &response(200, "{}")).is_none());
        assert!(ResourceError::from_http_response("u", &response(204, "")).is_none());
    }

    #[test]
    fn test_401_and_403_are_authentication_errors() {
        for code in [401, 403] {
            let error = ResourceError::from_http_response("u", &response(code, "Who are you?")).unwrap();
            assert!(matches!(error, ResourceError::Authentication { .. }));
            assert_eq!(error.status(), Some(code));
        }
    }

    #[test]
    fn test_other_statuses_are_api_errors() {
        for code in [301, 400, 404, 422, 429, 500, 503] {
            let error = ResourceError::from_http_response("u", &response(code, "*bzzt*")).unwrap();
            assert!(matches!(error, ResourceError::Api { .. }), "status {code}");
        }
    }

    #[test]
    fn test_api_error_message_carries_body_and_url() {
        let error = ResourceError::from_http_response(
            "https://scifi.org/api/authors/3",
            &response(500, "*bzzt*"),
        )
        .unwrap();

        let message = error.to_string();
        assert!(message.contains("/authors/3"));
        assert!(message.contains("500"));
        assert!(message.contains("*bzzt*"));
    }

    #[test]
    fn test_request_id_is_kept() {
        let mut headers = HashMap::new();
        headers.insert("x-request-id".to_string(), vec!["req-42".to_string()]);
        let response = HttpResponse::new(503, headers, "");

        let error = ResourceError::from_http_response("u", &response).unwrap();
        assert_eq!(error.request_id(), Some("req-42"));
    }

    #[test]
    fn test_long_bodies_are_truncated() {
        let body = "x".repeat(MAX_MESSAGE_LEN * 2);
        let error = ResourceError::from_http_response("u", &response(500, &body)).unwrap();

        match error {
            ResourceError::Api { message, .. } => {
                assert_eq!(message.len(), MAX_MESSAGE_LEN + 3);
                assert!(message.ends_with("..."));
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_network_error_exposes_source() {
        let error = ResourceError::Network {
            url: "u".to_string(),
            source: TransportError::Timeout {
                url: "u".to_string(),
            },
        };
        assert!(error.is_network());
        assert!(std::error::Error::source(&error).is_some());
        assert_eq!(error.status(), None);
    }
}
