//! Build-time error types for restroom.
//!
//! Everything that can go wrong while describing an API (configuration
//! values, the resource declaration, model resolution) is reported through
//! [`ConfigError`] when [`ApiBuilder::build`](crate::ApiBuilder::build) runs.
//! Call-time failures live in [`ResourceError`](crate::rest::ResourceError).
//!
//! # Example
//!
//! ```rust
//! use restroom::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors raised while configuring or declaring an API.
///
/// These are never deferred to the first request: a tree that builds
/// successfully has every model, host and relation resolved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://api.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A resource was declared with an empty key.
    #[error("Resource declared under '{parent}' has an empty key.")]
    EmptyKey {
        /// Key of the enclosing resource.
        parent: String,
    },

    /// Two siblings share a key.
    #[error("Resource '{key}' is declared more than once under '{parent}'.")]
    DuplicateKey {
        /// The repeated key.
        key: String,
        /// Key of the enclosing resource.
        parent: String,
    },

    /// No model is registered under the given or inferred name.
    #[error("Model '{name}' for resource '{key}' is not registered. Register it or pass an explicit model.")]
    ModelNotFound {
        /// The model name that could not be resolved.
        name: String,
        /// The key of the resource that needed it.
        key: String,
    },

    /// An explicit host names neither a registered model nor the declaring host.
    #[error("Host '{name}' for resource '{key}' is not a registered model.")]
    HostNotFound {
        /// The host name that could not be resolved.
        name: String,
        /// The key of the resource that named it.
        key: String,
    },

    /// The default HTTP client could not be created.
    #[error("Failed to create HTTP client: {reason}")]
    HttpClient {
        /// Description of the underlying failure.
        reason: String,
    },

    /// A configured header name or value cannot be sent over HTTP.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader {
        /// The header name as configured.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A serialized declaration could not be read.
    #[error("Invalid declaration: {reason}")]
    InvalidDeclaration {
        /// Why the declaration was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_not_found_names_model_and_key() {
        let error = ConfigError::ModelNotFound {
            name: "Author".to_string(),
            key: "authors".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("Author"));
        assert!(message.contains("authors"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "base_url" };
        let message = error.to_string();
        assert!(message.contains("base_url"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_invalid_declaration_carries_reason() {
        let error = ConfigError::InvalidDeclaration {
            reason: "unknown field `resourse`".to_string(),
        };
        assert!(error.to_string().contains("resourse"));
    }

    #[test]
    fn test_invalid_header_names_the_header() {
        let error = ConfigError::InvalidHeader {
            name: "bad header".to_string(),
            reason: "invalid HTTP header name".to_string(),
        };
        assert!(error.to_string().contains("'bad header'"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::MissingRequiredField { field: "base_url" };
        let _: &dyn std::error::Error = &error;
    }
}
