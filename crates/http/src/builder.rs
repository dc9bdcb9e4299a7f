//! Builder for constructing [`HttpSource`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for request configuration
//! - Validating the endpoint, method and headers once, at `build()`
//! - Configuring the underlying HTTP client (timeout, redirect policy)
//!
//! # What this module does NOT handle:
//! - Sending requests or reading bodies (see `source.rs` and `body.rs`)
//! - Retrying failed requests
//!
//! # Invariants
//! - `timeout` only applies to the client built here; a client supplied via
//!   `client()` is used as-is
//! - Header edits are applied in call order: `header` replaces every value
//!   for its name, `headers` appends

use std::time::Duration;

use confstore::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};
use tracing::warn;

use crate::constants::{DEFAULT_MAX_BODY_SIZE, DEFAULT_MAX_REDIRECTS, DEFAULT_METHOD};
use crate::source::HttpSource;

enum HeaderEdit {
    Set(String, String),
    Append(HeaderMap),
}

/// Builder for creating a new [`HttpSource`].
///
/// # Example
///
/// ```rust,ignore
/// use std::time::Duration;
/// use confstore_http::HttpSource;
///
/// let source = HttpSource::builder("https://config.internal/service.json")
///     .header("Authorization", "Bearer token")
///     .max_body_size(1024 * 1024)
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub struct HttpSourceBuilder {
    url: String,
    method: String,
    headers: Vec<HeaderEdit>,
    timeout: Option<Duration>,
    client: Option<reqwest::Client>,
    max_body_size: u64,
}

impl HttpSourceBuilder {
    /// Create a builder for `url` with default settings.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: DEFAULT_METHOD.to_string(),
            headers: Vec::new(),
            timeout: None,
            client: None,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Set the HTTP method. Default is `GET`.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Set a header, replacing any value already configured for that name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(HeaderEdit::Set(name.into(), value.into()));
        self
    }

    /// Append every entry of `headers` to the request headers.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.push(HeaderEdit::Append(headers));
        self
    }

    /// Set a client-level request timeout.
    ///
    /// Prefer bounding reads with [`confstore::OperationContext`] deadlines.
    /// Ignored when a custom client is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a preconfigured client instead of building one.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Limit the response body size in bytes. 0 disables the limit.
    pub fn max_body_size(mut self, bytes: u64) -> Self {
        self.max_body_size = bytes;
        self
    }

    fn invalid(&self, message: impl Into<String>) -> Error {
        Error::InvalidEndpoint {
            url: self.url.clone(),
            message: message.into(),
        }
    }

    fn parse_url(&self) -> Result<Url> {
        if self.url.trim().is_empty() {
            return Err(self.invalid("url is required"));
        }
        let url = Url::parse(&self.url).map_err(|e| self.invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(self.invalid(format!("unsupported scheme '{scheme}'"))),
        }
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        for edit in &self.headers {
            match edit {
                HeaderEdit::Set(name, value) => {
                    let name = HeaderName::from_bytes(name.as_bytes())
                        .map_err(|_| self.invalid(format!("invalid header name '{name}'")))?;
                    let value = HeaderValue::from_str(value)
                        .map_err(|_| self.invalid(format!("invalid value for header '{name}'")))?;
                    headers.insert(name, value);
                }
                HeaderEdit::Append(extra) => {
                    for (name, value) in extra {
                        headers.append(name.clone(), value.clone());
                    }
                }
            }
        }
        Ok(headers)
    }

    /// Build the [`HttpSource`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] if the URL is empty, unparsable or
    /// not `http`/`https`, or if the method or a header is malformed.
    /// Returns [`Error::Transport`] if the HTTP client fails to build.
    pub fn build(self) -> Result<HttpSource> {
        let url = self.parse_url()?;
        let method = Method::from_bytes(self.method.to_uppercase().as_bytes())
            .map_err(|_| self.invalid(format!("invalid method '{}'", self.method)))?;
        let headers = self.build_headers()?;

        let client = match self.client {
            Some(client) => {
                if self.timeout.is_some() {
                    warn!("timeout has no effect when a custom client is supplied");
                }
                client
            }
            None => {
                let mut http_builder = reqwest::Client::builder()
                    .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS));
                if let Some(timeout) = self.timeout {
                    http_builder = http_builder.timeout(timeout);
                }
                http_builder.build().map_err(|e| Error::Transport {
                    method: method.to_string(),
                    url: url.to_string(),
                    source: Box::new(e),
                })?
            }
        };

        Ok(HttpSource {
            client,
            url,
            method,
            headers,
            max_body_size: self.max_body_size,
        })
    }
}

impl std::fmt::Debug for HttpSourceBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSourceBuilder")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("timeout", &self.timeout)
            .field("custom_client", &self.client.is_some())
            .field("max_body_size", &self.max_body_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confstore::ErrorKind;

    #[test]
    fn test_defaults() {
        let source = HttpSourceBuilder::new("http://localhost:8080/app.json")
            .build()
            .unwrap();
        assert_eq!(source.method(), &Method::GET);
        assert_eq!(source.max_body_size(), 0);
        assert!(source.headers().is_empty());
        assert_eq!(source.url().as_str(), "http://localhost:8080/app.json");
    }

    #[test]
    fn test_method_is_normalized() {
        let source = HttpSourceBuilder::new("http://localhost/app")
            .method("post")
            .build()
            .unwrap();
        assert_eq!(source.method(), &Method::POST);
    }

    #[test]
    fn test_empty_url_rejected() {
        let err = HttpSourceBuilder::new("").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEndpoint);
        assert!(err.to_string().contains("url is required"));
    }

    #[test]
    fn test_unparsable_url_rejected() {
        let err = HttpSourceBuilder::new("http://[::1").build().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEndpoint);
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        let err = HttpSourceBuilder::new("ftp://example.com/app.json")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEndpoint);
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_invalid_header_rejected() {
        let err = HttpSourceBuilder::new("http://localhost/app")
            .header("bad header", "v")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidEndpoint);
    }

    #[test]
    fn test_header_overrides_previous_value() {
        let source = HttpSourceBuilder::new("http://localhost/app")
            .header("X-Env", "staging")
            .header("x-env", "prod")
            .build()
            .unwrap();
        let values: Vec<_> = source.headers().get_all("x-env").iter().collect();
        assert_eq!(values, vec!["prod"]);
    }

    #[test]
    fn test_headers_append() {
        let mut extra = HeaderMap::new();
        extra.append("accept", HeaderValue::from_static("application/yaml"));
        let source = HttpSourceBuilder::new("http://localhost/app")
            .header("Accept", "application/json")
            .headers(extra)
            .build()
            .unwrap();
        let values: Vec<_> = source.headers().get_all("accept").iter().collect();
        assert_eq!(values, vec!["application/json", "application/yaml"]);
    }

    #[test]
    fn test_header_after_headers_replaces_appended_values() {
        let mut extra = HeaderMap::new();
        extra.append("accept", HeaderValue::from_static("application/yaml"));
        let source = HttpSourceBuilder::new("http://localhost/app")
            .headers(extra)
            .header("Accept", "text/plain")
            .build()
            .unwrap();
        let values: Vec<_> = source.headers().get_all("accept").iter().collect();
        assert_eq!(values, vec!["text/plain"]);
    }
}
