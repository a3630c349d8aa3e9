//! Declarative HTTP/WebSocket request descriptors.
//!
//! # Overview
//! An `Endpoint` describes one request (method, scheme, host, port,
//! credentials, path segments, query, headers, body). It turns into
//! structured `UrlComponents`, an absolute `Url`, or a fully materialized
//! `HttpRequest` that any networking client can execute. The core never
//! touches the network (host-does-IO pattern).
//!
//! # Design
//! - `Endpoint` is a value; equality and printing come from its URL only.
//! - `Header` is a closed vocabulary with one `Custom` escape hatch.
//! - URL realization is the only fallible step and fails with
//!   `EndpointError::UrlFormation`.
//! - `session` adapts any client implementing `Session`; with the `ureq`
//!   feature, `ureq::Agent` is one.

#[cfg(feature = "ureq")]
pub mod agent;
pub mod components;
pub mod endpoint;
pub mod error;
pub mod header;
pub mod http;
pub mod session;

#[cfg(feature = "ureq")]
pub use agent::{agent, AgentError};
pub use components::{QueryItem, UrlComponents};
pub use endpoint::{Endpoint, Query, DEFAULT_PORT};
pub use error::EndpointError;
pub use header::Header;
pub use http::{CachePolicy, HttpMethod, HttpRequest, HttpResponse, RequestOptions, Scheme};
pub use session::{DataTask, Download, DownloadTask, Session, SessionExt};
pub use url::Url;
