//! HTTP(S) endpoint source.
//!
//! Responsibilities:
//! - Send one request per read with the configured method and headers.
//! - Reject non-2xx responses with method, URL and full status text.
//! - Enforce the body ceiling while streaming.
//!
//! Does NOT handle:
//! - Retries, caching or conditional requests.
//! - Interpreting the payload; decoding is the caller's job.
//!
//! Invariants:
//! - Connect, headers and every body chunk are awaited through the context.
//! - A client-level timeout is reported as `DeadlineExceeded`, like a context
//!   deadline.

use async_trait::async_trait;
use confstore::{Error, OperationContext, Result, Source};
use reqwest::header::HeaderMap;
use reqwest::{Method, Url};
use tracing::debug;

use crate::body;
use crate::builder::HttpSourceBuilder;

/// Configuration bytes fetched from an HTTP(S) endpoint.
#[derive(Clone)]
pub struct HttpSource {
    pub(crate) client: reqwest::Client,
    pub(crate) url: Url,
    pub(crate) method: Method,
    pub(crate) headers: HeaderMap,
    pub(crate) max_body_size: u64,
}

impl HttpSource {
    /// Create a new builder for `url`.
    pub fn builder(url: impl Into<String>) -> HttpSourceBuilder {
        HttpSourceBuilder::new(url)
    }

    /// A `GET` source for `url` with every other option at its default.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::builder(url).build()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Body ceiling in bytes; 0 means unlimited.
    pub fn max_body_size(&self) -> u64 {
        self.max_body_size
    }

    fn transport_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            return Error::DeadlineExceeded;
        }
        Error::Transport {
            method: self.method.to_string(),
            url: self.url.to_string(),
            source: Box::new(error),
        }
    }
}

// Header values may carry credentials; only names are printed.
impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header_names: Vec<&str> = self.headers.keys().map(|name| name.as_str()).collect();
        f.debug_struct("HttpSource")
            .field("url", &self.url.as_str())
            .field("method", &self.method)
            .field("headers", &header_names)
            .field("max_body_size", &self.max_body_size)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Source for HttpSource {
    async fn read(&self, ctx: &OperationContext) -> Result<Vec<u8>> {
        ctx.check()?;
        debug!(method = %self.method, url = %self.url, "Sending configuration request");

        let request = self
            .client
            .request(self.method.clone(), self.url.clone())
            .headers(self.headers.clone());
        let mut response = ctx
            .run(request.send())
            .await?
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        debug!(status = %status, content_length = ?response.content_length(), "Received configuration response");

        if !status.is_success() {
            body::drain(ctx, &mut response).await;
            return Err(Error::UnexpectedStatus {
                method: self.method.to_string(),
                url: self.url.to_string(),
                status: status.to_string(),
            });
        }

        let data =
            body::read_limited(ctx, &mut response, self.max_body_size, |e| self.transport_error(e))
                .await?;
        debug!(bytes = data.len(), "Read configuration body");
        Ok(data)
    }
}

/// Whether `location` is an `http`/`https` URL with a host.
pub fn is_remote_url(location: &str) -> bool {
    match Url::parse(location) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}
