//! Declarative request descriptor.
//!
//! # Design
//! `Endpoint` is a plain value: every field is public and defaulted except
//! `host`, and the consuming builder methods only exist to make construction
//! read left to right. Nothing is validated until `url()` or `url_request()`
//! realizes the URL.
//!
//! Identity is the URL. Equality, `Display` and `Debug` all go through
//! `url_components()`, so two endpoints that differ only in headers or body
//! compare equal and print the same.
//!
//! Port `80` is a sentinel for "no explicit port". It is not scheme-aware:
//! `https` on port 80 prints no port, `https` on 443 prints `:443`.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::components::{QueryItem, UrlComponents};
use crate::error::EndpointError;
use crate::header::Header;
use crate::http::{HttpMethod, HttpRequest, RequestOptions, Scheme};

/// Port value that leaves the port out of the URL.
pub const DEFAULT_PORT: u16 = 80;

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// A query parameter. Keys need not be unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub key: String,
    pub value: String,
}

impl Query {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Everything needed to build one HTTP or WebSocket request.
#[derive(Clone, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub scheme: Scheme,
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub queries: Vec<Query>,
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<u8>>,
}

impl Endpoint {
    /// A `GET https://{host}` endpoint with every other field defaulted.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::default(),
            scheme: Scheme::default(),
            host: host.into(),
            port: DEFAULT_PORT,
            user: None,
            password: None,
            paths: Vec::new(),
            queries: Vec::new(),
            headers: Vec::new(),
            data: None,
        }
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Append one path segment.
    pub fn path(mut self, segment: impl Into<String>) -> Self {
        self.paths.push(segment.into());
        self
    }

    /// Append several path segments in order.
    pub fn paths<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths.extend(segments.into_iter().map(Into::into));
        self
    }

    /// Append one query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.queries.push(Query::new(key, value));
        self
    }

    pub fn queries(mut self, queries: impl IntoIterator<Item = Query>) -> Self {
        self.queries.extend(queries);
        self
    }

    /// Append a header. Earlier headers with the same key are kept.
    pub fn header(mut self, header: Header) -> Self {
        self.headers.push(header);
        self
    }

    pub fn headers(mut self, headers: impl IntoIterator<Item = Header>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Map the descriptor onto structured URL components. Never fails.
    pub fn url_components(&self) -> UrlComponents {
        UrlComponents {
            scheme: self.scheme.as_str().to_string(),
            host: self.host.clone(),
            port: (self.port != DEFAULT_PORT).then_some(self.port),
            user: self.user.clone(),
            password: self.password.clone(),
            path: if self.paths.is_empty() {
                String::new()
            } else {
                format!("/{}", self.paths.join("/"))
            },
            query_items: if self.queries.is_empty() {
                None
            } else {
                Some(
                    self.queries
                        .iter()
                        .map(|q| QueryItem::new(q.key.clone(), q.value.clone()))
                        .collect(),
                )
            },
        }
    }

    /// Realize the absolute URL. A port equal to the scheme default is
    /// implicit in the returned `Url`; `url_request` keeps it explicit.
    pub fn url(&self) -> Result<Url, EndpointError> {
        self.url_components().url()
    }

    /// Materialize a request with default options: cellular access allowed,
    /// the client's own cache policy.
    pub fn url_request(&self) -> Result<HttpRequest, EndpointError> {
        self.url_request_with(RequestOptions::default())
    }

    /// Materialize a request for a networking client.
    ///
    /// Fails only when the URL cannot be realized, in which case no request
    /// is produced. Headers are appended in order; repeated keys keep every
    /// value.
    pub fn url_request_with(&self, options: RequestOptions) -> Result<HttpRequest, EndpointError> {
        let components = self.url_components();
        let mut request = HttpRequest::new(components.url()?);
        request.port = components.port;
        request.method = self.method;
        request.body = self.data.clone();
        request.allows_cellular_access = options.allows_cellular_access;
        if let Some(cache_policy) = options.cache_policy {
            request.cache_policy = cache_policy;
        }
        for header in &self.headers {
            let (key, value) = header.pair();
            request.add_header(key, value);
        }

        tracing::debug!(
            method = %request.method,
            url = %request.uri(),
            headers = request.headers.len(),
            body_len = request.body.as_ref().map_or(0, Vec::len),
            "materialized request"
        );
        Ok(request)
    }
}

impl PartialEq for Endpoint {
    fn eq(&self, other: &Self) -> bool {
        self.url_components() == other.url_components()
    }
}

impl Eq for Endpoint {}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.url_components(), f)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Endpoint").field(&self.url_components()).finish()
    }
}
