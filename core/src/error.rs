//! Error type for endpoint realization.
//!
//! # Design
//! Building an `Endpoint` and deriving its `UrlComponents` cannot fail. The
//! only fallible step is realizing those components into an absolute `Url`,
//! which `Endpoint::url` and `Endpoint::url_request` both go through, so a
//! single variant covers the whole core.

/// Errors returned by `Endpoint::url` and `Endpoint::url_request`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    /// The structured components do not form a valid absolute URL, e.g. the
    /// host contains characters the URL host grammar forbids.
    #[error("URL could not be formed")]
    UrlFormation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_formation_message() {
        assert_eq!(EndpointError::UrlFormation.to_string(), "URL could not be formed");
    }
}
