//! Transport-level error types.
//!
//! A transport only reports failures to complete the exchange. Status codes
//! are not errors at this layer; they are classified by the dispatcher.
//!
//! # Example
//!
//! ```rust
//! use restroom::clients::TransportError;
//!
//! let error = TransportError::Timeout {
//!     url: "https://scifi.org/api/authors/4".to_string(),
//! };
//! assert!(error.is_timeout());
//! ```

use thiserror::Error;

/// Failure to complete an HTTP exchange.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request did not complete within the configured timeout.
    #[error("Request to {url} timed out")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The connection could not be established or was interrupted.
    #[error("Request to {url} failed: {message}")]
    Connection {
        /// The URL being requested.
        url: String,
        /// Description of the underlying failure.
        message: String,
    },

    /// The request could not be built, so nothing was sent.
    #[error("Request to {url} could not be built: {message}")]
    InvalidRequest {
        /// The URL being requested.
        url: String,
        /// Description of the underlying failure.
        message: String,
    },
}

impl TransportError {
    /// Returns `true` for timeouts.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` when the request was refused before being sent.
    #[must_use]
    pub const fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. })
    }

    /// Maps a reqwest error onto the transport taxonomy.
    #[must_use]
    pub fn from_reqwest(url: &str, error: &reqwest::Error) -> Self {
        if error.is_builder() {
            Self::InvalidRequest {
                url: url.to_string(),
                message: error.to_string(),
            }
        } else if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Connection {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_includes_url() {
        let error = TransportError::Timeout {
            url: "https://scifi.org/api/authors/4".to_string(),
        };
        assert!(error.to_string().contains("/authors/4"));
        assert!(error.to_string().contains("timed out"));
        assert!(error.is_timeout());
    }

    #[test]
    fn test_connection_error_is_not_timeout() {
        let error = TransportError::Connection {
            url: "https://scifi.org".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(!error.is_timeout());
        assert!(error.to_string().contains("connection refused"));
    }

    #[test]
    fn test_builder_error_is_invalid_request() {
        let error = reqwest::Client::new()
            .get("https://scifi.org/api/authors")
            .header("bad header", "x")
            .build()
            .unwrap_err();

        let mapped = TransportError::from_reqwest("https://scifi.org/api/authors", &error);
        assert!(mapped.is_invalid_request());
        assert!(!mapped.is_timeout());
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: &dyn std::error::Error = &TransportError::Timeout {
            url: String::new(),
        };
        let _ = error;
    }
}
