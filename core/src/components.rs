//! Structured URL components and their realization into a `Url`.
//!
//! # Design
//! `UrlComponents` is the unvalidated intermediate form an `Endpoint` maps
//! onto. Producing it never fails; all validation happens in `url()`, which
//! is the single place an `EndpointError` can originate.

use std::fmt;

use url::{Host, Url};

use crate::error::EndpointError;

/// One `name=value` pair of a query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryItem {
    pub name: String,
    pub value: String,
}

impl QueryItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The pieces of an absolute URL before realization.
///
/// `port`, `user`, `password` and `query_items` are `None` when the URL
/// carries no such component at all. An empty `path` means no path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlComponents {
    pub scheme: String,
    pub host: String,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub path: String,
    pub query_items: Option<Vec<QueryItem>>,
}

impl UrlComponents {
    /// Realize the components into an absolute URL.
    ///
    /// The host must satisfy the URL host grammar on its own; a host that
    /// smuggles in a port, path or userinfo is rejected rather than
    /// reinterpreted. Credentials, path and query are percent-encoded by
    /// `url` as needed.
    ///
    /// The path keeps the segments it was built from: a backslash is encoded so it
    /// cannot split a segment, and `.`/`..` segments (which `url` would
    /// collapse) are rejected.
    pub fn url(&self) -> Result<Url, EndpointError> {
        let host = Host::parse(&self.host).map_err(|err| {
            tracing::trace!(host = %self.host, %err, "host rejected");
            EndpointError::UrlFormation
        })?;

        let mut url = Url::parse(&format!("{}://{host}", self.scheme)).map_err(|err| {
            tracing::trace!(scheme = %self.scheme, %err, "scheme and host do not form a URL");
            EndpointError::UrlFormation
        })?;

        url.set_port(self.port).map_err(|()| EndpointError::UrlFormation)?;
        if let Some(user) = &self.user {
            url.set_username(user).map_err(|()| EndpointError::UrlFormation)?;
        }
        if let Some(password) = &self.password {
            url.set_password(Some(password))
                .map_err(|()| EndpointError::UrlFormation)?;
        }
        if self.path.split('/').any(is_dot_segment) {
            tracing::trace!(path = %self.path, "dot segment in path");
            return Err(EndpointError::UrlFormation);
        }
        url.set_path(&self.path.replace('\\', "%5C"));

        if let Some(items) = &self.query_items {
            let mut query = url.query_pairs_mut();
            for item in items {
                query.append_pair(&item.name, &item.value);
            }
        }

        Ok(url)
    }
}

/// `.` or `..`, including their percent-encoded spellings.
fn is_dot_segment(segment: &str) -> bool {
    matches!(
        segment.to_ascii_lowercase().replace("%2e", ".").as_str(),
        "." | ".."
    )
}

/// Renders the components verbatim, without percent-encoding, as
/// `scheme://[user[:password]@]host[:port]path[?name=value&...]`.
impl fmt::Display for UrlComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://", self.scheme)?;
        if self.user.is_some() || self.password.is_some() {
            if let Some(user) = &self.user {
                f.write_str(user)?;
            }
            if let Some(password) = &self.password {
                write!(f, ":{password}")?;
            }
            f.write_str("@")?;
        }
        f.write_str(&self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        f.write_str(&self.path)?;
        if let Some(items) = &self.query_items {
            f.write_str("?")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str("&")?;
                }
                write!(f, "{}={}", item.name, item.value)?;
            }
        }
        Ok(())
    }
}
