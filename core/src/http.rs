//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe requests and responses as plain data. `Endpoint`
//! materializes an `HttpRequest` without touching the network; whatever
//! networking client the caller picks (see `session`) executes it and hands
//! back an `HttpResponse`.
//!
//! Headers are kept as an ordered list of pairs rather than a map: the same
//! key may appear several times and every value is sent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::{Position, Url};

/// Returned by the `FromStr` impls when a string names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseVariantError {
    kind: &'static str,
    value: String,
}

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
    Connect,
}

impl HttpMethod {
    /// The verb as it appears on the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Connect => "CONNECT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            "TRACE" => Ok(HttpMethod::Trace),
            "CONNECT" => Ok(HttpMethod::Connect),
            other => Err(ParseVariantError {
                kind: "method",
                value: other.to_string(),
            }),
        }
    }
}

/// URL scheme of an endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    #[default]
    Https,
    Ws,
    Wss,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::Ws => "ws",
            Scheme::Wss => "wss",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            "ws" => Ok(Scheme::Ws),
            "wss" => Ok(Scheme::Wss),
            other => Err(ParseVariantError {
                kind: "scheme",
                value: other.to_string(),
            }),
        }
    }
}

/// Cache directive forwarded to the networking client. The core never acts
/// on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// Whatever the client does by default.
    #[default]
    UseProtocolCachePolicy,
    ReloadIgnoringLocalCacheData,
    ReloadIgnoringLocalAndRemoteCacheData,
    ReturnCacheDataElseLoad,
    ReturnCacheDataDontLoad,
    ReloadRevalidatingCacheData,
}

/// Execution hints applied by `Endpoint::url_request_with`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOptions {
    pub allows_cellular_access: bool,
    /// `None` leaves the request on the client's default policy.
    pub cache_policy: Option<CachePolicy>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            allows_cellular_access: true,
            cache_policy: None,
        }
    }
}

/// A fully materialized request, ready for a networking client.
///
/// Built by `Endpoint::url_request`. The caller (or a `Session`) is
/// responsible for executing it and producing an `HttpResponse`.
///
/// `url` leaves a port equal to the scheme default implicit; `port` keeps
/// the port the endpoint asked for, and `uri()` renders both together.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub url: Url,
    pub port: Option<u16>,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub allows_cellular_access: bool,
    pub cache_policy: CachePolicy,
}

impl HttpRequest {
    /// A bare request for `url`: `GET`, no headers, no body, client defaults.
    pub fn new(url: Url) -> Self {
        Self {
            port: url.port(),
            url,
            method: HttpMethod::Get,
            headers: Vec::new(),
            body: None,
            allows_cellular_access: true,
            cache_policy: CachePolicy::default(),
        }
    }

    /// The request target to put on the wire.
    ///
    /// Identical to `url` unless an explicit port equals the scheme default,
    /// in which case the port is written out (`https://host:443/`).
    pub fn uri(&self) -> String {
        match self.port {
            Some(port) if self.url.port().is_none() => format!(
                "{}:{port}{}",
                &self.url[..Position::AfterHost],
                &self.url[Position::BeforePath..]
            ),
            _ => self.url.to_string(),
        }
    }

    /// Append a header value. Existing values under the same key are kept.
    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.headers.push((key.into(), value.into()));
    }

    /// All values sent under `key`, compared case-insensitively, in the order
    /// they were added.
    pub fn header_values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// The combined field value for `key`, multiple values joined with `", "`.
    pub fn header(&self, key: &str) -> Option<String> {
        let values: Vec<&str> = self.header_values(key).collect();
        if values.is_empty() {
            None
        } else {
            Some(values.join(", "))
        }
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a `Session` after executing an `HttpRequest`. Non-2xx
/// statuses are carried here, not turned into errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HttpRequest {
        HttpRequest::new(Url::parse("https://localhost/").unwrap())
    }

    #[test]
    fn method_wire_strings_roundtrip() {
        let all = [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
            HttpMethod::Head,
            HttpMethod::Options,
            HttpMethod::Trace,
            HttpMethod::Connect,
        ];
        for method in all {
            assert_eq!(method.as_str().parse::<HttpMethod>().unwrap(), method);
        }
        assert_eq!(HttpMethod::default(), HttpMethod::Get);
    }

    #[test]
    fn unknown_method_is_rejected() {
        let err = "get".parse::<HttpMethod>().unwrap_err();
        assert_eq!(err.to_string(), "unknown method: get");
    }

    #[test]
    fn scheme_defaults_to_https() {
        assert_eq!(Scheme::default(), Scheme::Https);
        assert_eq!("wss".parse::<Scheme>().unwrap(), Scheme::Wss);
        assert!("ftp".parse::<Scheme>().is_err());
    }

    #[test]
    fn request_options_default() {
        let options = RequestOptions::default();
        assert!(options.allows_cellular_access);
        assert!(options.cache_policy.is_none());
    }

    #[test]
    fn add_header_keeps_every_value() {
        let mut req = request();
        req.add_header("Accept", "text/html");
        req.add_header("accept", "application/json");
        req.add_header("Range", "bytes=0-1");

        let values: Vec<&str> = req.header_values("ACCEPT").collect();
        assert_eq!(values, vec!["text/html", "application/json"]);
        assert_eq!(req.header("Accept").as_deref(), Some("text/html, application/json"));
        assert_eq!(req.headers.len(), 3);
    }

    #[test]
    fn uri_keeps_explicit_default_port() {
        let mut req = HttpRequest::new(Url::parse("https://example.com:443/a?b=c").unwrap());
        assert_eq!(req.url.port(), None);
        assert_eq!(req.uri(), "https://example.com/a?b=c");

        req.port = Some(443);
        assert_eq!(req.uri(), "https://example.com:443/a?b=c");

        let req = HttpRequest::new(Url::parse("http://u:p@localhost:3000/").unwrap());
        assert_eq!(req.port, Some(3000));
        assert_eq!(req.uri(), "http://u:p@localhost:3000/");
    }

    #[test]
    fn missing_header_is_none() {
        assert!(request().header("Accept").is_none());
    }

    #[test]
    fn response_success_range() {
        let mut response = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: Vec::new(),
        };
        assert!(response.is_success());
        response.status = 404;
        assert!(!response.is_success());
    }
}
