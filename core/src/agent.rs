//! `Session` backed by a blocking `ureq::Agent`.
//!
//! # Design
//! The agent should be built with `agent()` so 4xx/5xx responses come back as
//! data rather than `Err`; status interpretation belongs to the caller.
//! Cellular access and cache directives have no ureq equivalent and are
//! carried only as far as the request object.

use ureq::http;

use crate::error::EndpointError;
use crate::http::{CachePolicy, HttpRequest, HttpResponse};
use crate::session::Session;

/// Errors from executing a request through ureq.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error(transparent)]
    Endpoint(#[from] EndpointError),

    /// A header or method could not be expressed as an `http::Request`.
    #[error("invalid request: {0}")]
    Request(#[from] http::Error),

    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// An agent that returns every status as a response.
pub fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

impl Session for ureq::Agent {
    type Error = AgentError;

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, AgentError> {
        if !request.allows_cellular_access || request.cache_policy != CachePolicy::default() {
            tracing::debug!(
                allows_cellular_access = request.allows_cellular_access,
                cache_policy = ?request.cache_policy,
                "execution hints not supported by ureq, ignoring"
            );
        }

        let mut builder = http::Request::builder()
            .method(request.method.as_str())
            .uri(request.uri());
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        tracing::debug!(method = %request.method, url = %request.uri(), "sending request");
        let mut response = match &request.body {
            Some(body) => self.run(builder.body(body.as_slice())?)?,
            None => self.run(builder.body(())?)?,
        };

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(key, value)| {
                (
                    key.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.body_mut().read_to_vec()?;
        tracing::debug!(status, len = body.len(), "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::Endpoint;
    use crate::header::Header;
    use crate::session::SessionExt;

    #[test]
    fn invalid_header_name_is_request_error() {
        let request = Endpoint::new("127.0.0.1")
            .port(9)
            .header(Header::Custom("bad header".into(), "x".into()))
            .url_request()
            .unwrap();
        let err = agent().send(&request).unwrap_err();
        assert!(matches!(err, AgentError::Request(_)));
    }

    #[test]
    fn invalid_endpoint_never_reaches_agent() {
        let Err(err) = agent().data_task(&Endpoint::new("bad host")) else {
            panic!("expected URL formation failure");
        };
        assert_eq!(err, EndpointError::UrlFormation);
        assert_eq!(AgentError::from(err).to_string(), "URL could not be formed");
    }
}
