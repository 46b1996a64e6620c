//! Configuration types for restroom.
//!
//! - [`RestroomConfig`]: where the API lives and how the default transport talks to it
//! - [`RestroomConfigBuilder`]: a builder for constructing [`RestroomConfig`] instances
//! - [`BaseUrl`]: a validated base URL
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use restroom::{BaseUrl, RestroomConfig};
//!
//! let config = RestroomConfig::builder()
//!     .base_url(BaseUrl::new("https://scifi.org").unwrap())
//!     .base_path("api")
//!     .timeout(Duration::from_secs(5))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.root_url(), "https://scifi.org/api");
//! ```

mod newtypes;

pub use newtypes::BaseUrl;

use std::collections::HashMap;
use std::time::Duration;

use crate::error::ConfigError;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for an API definition.
///
/// # Thread Safety
///
/// `RestroomConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct RestroomConfig {
    base_url: BaseUrl,
    base_path: Option<String>,
    timeout: Duration,
    user_agent_prefix: Option<String>,
    headers: HashMap<String, String>,
}

impl RestroomConfig {
    /// Creates a new builder for constructing a `RestroomConfig`.
    #[must_use]
    pub fn builder() -> RestroomConfigBuilder {
        RestroomConfigBuilder::new()
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &BaseUrl {
        &self.base_url
    }

    /// Returns the base path, if configured (without surrounding slashes).
    #[must_use]
    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    /// Returns the URL every resource path is appended to.
    #[must_use]
    pub fn root_url(&self) -> String {
        match &self.base_path {
            Some(path) => format!("{}/{path}", self.base_url.as_ref()),
            None => self.base_url.as_ref().to_string(),
        }
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the extra headers sent with every request.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

// Verify RestroomConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestroomConfig>();
};

/// Builder for constructing [`RestroomConfig`] instances.
///
/// `base_url` is required. Defaults:
///
/// - `base_path`: `None`
/// - `timeout`: [`DEFAULT_TIMEOUT`]
/// - `user_agent_prefix`: `None`
/// - headers: empty
#[derive(Debug, Default)]
pub struct RestroomConfigBuilder {
    base_url: Option<BaseUrl>,
    base_path: Option<String>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
    headers: HashMap<String, String>,
}

impl RestroomConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL (required).
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets a path prefix shared by every resource (e.g. `api`).
    #[must_use]
    pub fn base_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = path.trim_matches('/');
        self.base_path = (!path.is_empty()).then(|| path.to_string());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Adds a header sent with every request.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Builds the [`RestroomConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `base_url` is not set.
    pub fn build(self) -> Result<RestroomConfig, ConfigError> {
        let base_url = self
            .base_url
            .ok_or(ConfigError::MissingRequiredField { field: "base_url" })?;

        Ok(RestroomConfig {
            base_url,
            base_path: self.base_path,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            user_agent_prefix: self.user_agent_prefix,
            headers: self.headers,
        })
    }
}
