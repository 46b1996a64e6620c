//! reqwest-backed transport.
//!
//! This module provides the [`HttpClient`] type, the default
//! [`Transport`] used by an [`Api`](crate::Api).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::clients::{
    validate_header, HttpMethod, HttpRequest, HttpResponse, Middleware, Transport, TransportError,
};
use crate::config::RestroomConfig;
use crate::error::ConfigError;

/// Crate version from Cargo.toml.
pub const RESTROOM_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP transport built on reqwest.
///
/// The client handles:
/// - Default headers including User-Agent, Accept and configured headers
/// - The middleware chain, run on every request
/// - The request timeout from [`RestroomConfig::timeout`]
///
/// It does not retry and does not interpret status codes.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust
/// use restroom::{BaseUrl, RestroomConfig};
/// use restroom::clients::HttpClient;
///
/// let config = RestroomConfig::builder()
///     .base_url(BaseUrl::new("https://scifi.org").unwrap())
///     .user_agent_prefix("Scifi/1.0")
///     .build()
///     .unwrap();
///
/// let client = HttpClient::new(&config).unwrap();
/// assert!(client.default_headers()["User-Agent"].starts_with("Scifi/1.0 | "));
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    default_headers: HashMap<String, String>,
    middleware: Vec<Arc<dyn Middleware>>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidHeader`] if a configured header cannot be sent
    /// - [`ConfigError::HttpClient`] if the underlying reqwest client cannot
    ///   be created (e.g., TLS initialization failure)
    pub fn new(config: &RestroomConfig) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Restroom v{RESTROOM_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        for (name, value) in config.headers() {
            validate_header(name, value)?;
            default_headers.insert(name.clone(), value.clone());
        }

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConfigError::HttpClient {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            default_headers,
            middleware: Vec::new(),
        })
    }

    /// Appends a middleware to the chain.
    #[must_use]
    pub fn with_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the number of installed middleware.
    #[must_use]
    pub fn middleware_count(&self) -> usize {
        self.middleware.len()
    }

    /// Runs the middleware chain and merges default headers under the
    /// request's own headers.
    fn prepare(&self, mut request: HttpRequest) -> HttpRequest {
        for middleware in &self.middleware {
            middleware.on_request(&mut request);
        }
        for (key, value) in &self.default_headers {
            request
                .headers
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        request
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let request = self.prepare(request);

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Put => self.client.put(&request.url),
            HttpMethod::Delete => self.client.delete(&request.url),
        };

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.query.is_empty() {
            req_builder = req_builder.query(&request.query);
        }

        let res = req_builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&request.url, &e))?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(&request.url, &e))?;

        Ok(HttpResponse::new(code, headers, body))
    }
}
