//! The closed vocabulary of request headers.
//!
//! # Design
//! Every well-known header is its own variant carrying the raw value, so a
//! typo in a header name is a compile error rather than a silently ignored
//! field. Anything outside the vocabulary goes through `Header::Custom`.
//! Values are never escaped, validated or re-cased; what the caller puts in
//! is what ends up on the wire.

use serde::{Deserialize, Serialize};

/// A single request header.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Header {
    Accept(String),
    AcceptCharset(String),
    AcceptEncoding(String),
    AcceptLanguage(String),
    AcceptRanges(String),
    Age(String),
    Allow(String),
    Authorization(String),
    CacheControl(String),
    Connection(String),
    ContentEncoding(String),
    ContentLanguage(String),
    ContentLength(String),
    ContentLocation(String),
    ContentMd5(String),
    ContentRange(String),
    ContentType(String),
    Date(String),
    Etag(String),
    Expect(String),
    Expires(String),
    From(String),
    Host(String),
    IfMatch(String),
    IfModifiedSince(String),
    IfNoneMatch(String),
    IfRange(String),
    IfUnmodifiedSince(String),
    LastModified(String),
    Location(String),
    MaxForwards(String),
    Pragma(String),
    ProxyAuthenticate(String),
    ProxyAuthorization(String),
    Range(String),
    Referer(String),
    RetryAfter(String),
    Server(String),
    Te(String),
    Trailer(String),
    TransferEncoding(String),
    Upgrade(String),
    UserAgent(String),
    Vary(String),
    Via(String),
    Warning(String),
    WwwAuthenticate(String),
    /// An arbitrary `(key, value)` pair outside the named set.
    Custom(String, String),
}

/// Named variants keyed by their canonical wire name.
const NAMED: [(&str, fn(String) -> Header); 47] = [
    ("Accept", Header::Accept),
    ("Accept-Charset", Header::AcceptCharset),
    ("Accept-Encoding", Header::AcceptEncoding),
    ("Accept-Language", Header::AcceptLanguage),
    ("Accept-Ranges", Header::AcceptRanges),
    ("Age", Header::Age),
    ("Allow", Header::Allow),
    ("Authorization", Header::Authorization),
    ("Cache-Control", Header::CacheControl),
    ("Connection", Header::Connection),
    ("Content-Encoding", Header::ContentEncoding),
    ("Content-Language", Header::ContentLanguage),
    ("Content-Length", Header::ContentLength),
    ("Content-Location", Header::ContentLocation),
    ("Content-MD5", Header::ContentMd5),
    ("Content-Range", Header::ContentRange),
    ("Content-Type", Header::ContentType),
    ("Date", Header::Date),
    ("ETag", Header::Etag),
    ("Expect", Header::Expect),
    ("Expires", Header::Expires),
    ("From", Header::From),
    ("Host", Header::Host),
    ("If-Match", Header::IfMatch),
    ("If-Modified-Since", Header::IfModifiedSince),
    ("If-None-Match", Header::IfNoneMatch),
    ("If-Range", Header::IfRange),
    ("If-Unmodified-Since", Header::IfUnmodifiedSince),
    ("Last-Modified", Header::LastModified),
    ("Location", Header::Location),
    ("Max-Forwards", Header::MaxForwards),
    ("Pragma", Header::Pragma),
    ("Proxy-Authenticate", Header::ProxyAuthenticate),
    ("Proxy-Authorization", Header::ProxyAuthorization),
    ("Range", Header::Range),
    ("Referer", Header::Referer),
    ("Retry-After", Header::RetryAfter),
    ("Server", Header::Server),
    ("TE", Header::Te),
    ("Trailer", Header::Trailer),
    ("Transfer-Encoding", Header::TransferEncoding),
    ("Upgrade", Header::Upgrade),
    ("User-Agent", Header::UserAgent),
    ("Vary", Header::Vary),
    ("Via", Header::Via),
    ("Warning", Header::Warning),
    ("WWW-Authenticate", Header::WwwAuthenticate),
];

impl Header {
    /// Canonical wire name of this header.
    pub fn key(&self) -> &str {
        match self {
            Header::Accept(_) => "Accept",
            Header::AcceptCharset(_) => "Accept-Charset",
            Header::AcceptEncoding(_) => "Accept-Encoding",
            Header::AcceptLanguage(_) => "Accept-Language",
            Header::AcceptRanges(_) => "Accept-Ranges",
            Header::Age(_) => "Age",
            Header::Allow(_) => "Allow",
            Header::Authorization(_) => "Authorization",
            Header::CacheControl(_) => "Cache-Control",
            Header::Connection(_) => "Connection",
            Header::ContentEncoding(_) => "Content-Encoding",
            Header::ContentLanguage(_) => "Content-Language",
            Header::ContentLength(_) => "Content-Length",
            Header::ContentLocation(_) => "Content-Location",
            Header::ContentMd5(_) => "Content-MD5",
            Header::ContentRange(_) => "Content-Range",
            Header::ContentType(_) => "Content-Type",
            Header::Date(_) => "Date",
            Header::Etag(_) => "ETag",
            Header::Expect(_) => "Expect",
            Header::Expires(_) => "Expires",
            Header::From(_) => "From",
            Header::Host(_) => "Host",
            Header::IfMatch(_) => "If-Match",
            Header::IfModifiedSince(_) => "If-Modified-Since",
            Header::IfNoneMatch(_) => "If-None-Match",
            Header::IfRange(_) => "If-Range",
            Header::IfUnmodifiedSince(_) => "If-Unmodified-Since",
            Header::LastModified(_) => "Last-Modified",
            Header::Location(_) => "Location",
            Header::MaxForwards(_) => "Max-Forwards",
            Header::Pragma(_) => "Pragma",
            Header::ProxyAuthenticate(_) => "Proxy-Authenticate",
            Header::ProxyAuthorization(_) => "Proxy-Authorization",
            Header::Range(_) => "Range",
            Header::Referer(_) => "Referer",
            Header::RetryAfter(_) => "Retry-After",
            Header::Server(_) => "Server",
            Header::Te(_) => "TE",
            Header::Trailer(_) => "Trailer",
            Header::TransferEncoding(_) => "Transfer-Encoding",
            Header::Upgrade(_) => "Upgrade",
            Header::UserAgent(_) => "User-Agent",
            Header::Vary(_) => "Vary",
            Header::Via(_) => "Via",
            Header::Warning(_) => "Warning",
            Header::WwwAuthenticate(_) => "WWW-Authenticate",
            Header::Custom(key, _) => key,
        }
    }

    /// The carried value, unchanged.
    pub fn value(&self) -> &str {
        match self {
            Header::Accept(value)
            | Header::AcceptCharset(value)
            | Header::AcceptEncoding(value)
            | Header::AcceptLanguage(value)
            | Header::AcceptRanges(value)
            | Header::Age(value)
            | Header::Allow(value)
            | Header::Authorization(value)
            | Header::CacheControl(value)
            | Header::Connection(value)
            | Header::ContentEncoding(value)
            | Header::ContentLanguage(value)
            | Header::ContentLength(value)
            | Header::ContentLocation(value)
            | Header::ContentMd5(value)
            | Header::ContentRange(value)
            | Header::ContentType(value)
            | Header::Date(value)
            | Header::Etag(value)
            | Header::Expect(value)
            | Header::Expires(value)
            | Header::From(value)
            | Header::Host(value)
            | Header::IfMatch(value)
            | Header::IfModifiedSince(value)
            | Header::IfNoneMatch(value)
            | Header::IfRange(value)
            | Header::IfUnmodifiedSince(value)
            | Header::LastModified(value)
            | Header::Location(value)
            | Header::MaxForwards(value)
            | Header::Pragma(value)
            | Header::ProxyAuthenticate(value)
            | Header::ProxyAuthorization(value)
            | Header::Range(value)
            | Header::Referer(value)
            | Header::RetryAfter(value)
            | Header::Server(value)
            | Header::Te(value)
            | Header::Trailer(value)
            | Header::TransferEncoding(value)
            | Header::Upgrade(value)
            | Header::UserAgent(value)
            | Header::Vary(value)
            | Header::Via(value)
            | Header::Warning(value)
            | Header::WwwAuthenticate(value)
            | Header::Custom(_, value) => value,
        }
    }

    pub fn pair(&self) -> (&str, &str) {
        (self.key(), self.value())
    }

    pub fn into_pair(self) -> (String, String) {
        match self {
            Header::Custom(key, value) => (key, value),
            named => (named.key().to_string(), named.value().to_string()),
        }
    }

    /// Map a raw `(key, value)` pair back into the vocabulary.
    ///
    /// Known wire names match case-insensitively and yield the named variant;
    /// anything else becomes `Header::Custom` with the key kept as given.
    pub fn from_pair(key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match NAMED.iter().find(|(name, _)| name.eq_ignore_ascii_case(&key)) {
            Some((_, named)) => named(value),
            None => Header::Custom(key, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every_named(value: &str) -> Vec<Header> {
        NAMED.iter().map(|(_, named)| named(value.to_string())).collect()
    }

    #[test]
    fn named_headers_map_to_canonical_keys() {
        let cases = [
            (Header::Accept("x".into()), "Accept"),
            (Header::AcceptCharset("x".into()), "Accept-Charset"),
            (Header::Authorization("x".into()), "Authorization"),
            (Header::CacheControl("x".into()), "Cache-Control"),
            (Header::ContentMd5("x".into()), "Content-MD5"),
            (Header::ContentType("x".into()), "Content-Type"),
            (Header::Etag("x".into()), "ETag"),
            (Header::IfUnmodifiedSince("x".into()), "If-Unmodified-Since"),
            (Header::Range("x".into()), "Range"),
            (Header::Te("x".into()), "TE"),
            (Header::UserAgent("x".into()), "User-Agent"),
            (Header::WwwAuthenticate("x".into()), "WWW-Authenticate"),
        ];
        for (header, key) in cases {
            assert_eq!(header.pair(), (key, "x"));
        }
    }

    #[test]
    fn every_named_variant_keeps_value_and_has_distinct_key() {
        let headers = every_named("example");
        assert_eq!(headers.len(), 47);
        let mut keys: Vec<&str> = headers.iter().map(Header::key).collect();
        for header in &headers {
            assert_eq!(header.value(), "example");
        }
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 47);
    }

    #[test]
    fn lookup_table_agrees_with_key() {
        for (name, named) in NAMED {
            assert_eq!(named(String::new()).key(), name);
        }
    }

    #[test]
    fn custom_passes_key_and_value_through() {
        let header = Header::Custom("X-Request-Id".into(), "  raw value\t".into());
        assert_eq!(header.pair(), ("X-Request-Id", "  raw value\t"));
        assert_eq!(
            header.into_pair(),
            ("X-Request-Id".to_string(), "  raw value\t".to_string())
        );
    }

    #[test]
    fn into_pair_for_named_variant() {
        let pair = Header::ContentType("application/json".into()).into_pair();
        assert_eq!(pair, ("Content-Type".to_string(), "application/json".to_string()));
    }

    #[test]
    fn from_pair_recognizes_known_names_case_insensitively() {
        assert_eq!(
            Header::from_pair("content-type", "text/plain"),
            Header::ContentType("text/plain".into())
        );
        assert_eq!(Header::from_pair("ETAG", "\"abc\""), Header::Etag("\"abc\"".into()));
        assert_eq!(
            Header::from_pair("X-Trace", "1"),
            Header::Custom("X-Trace".into(), "1".into())
        );
    }

    #[test]
    fn serde_uses_kebab_case_tags() {
        let json = serde_json::to_value(Header::ContentMd5("sum".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "content-md5": "sum" }));

        let custom: Header = serde_json::from_str(r#"{"custom":["X-Key","v"]}"#).unwrap();
        assert_eq!(custom, Header::Custom("X-Key".into(), "v".into()));

        let www: Header = serde_json::from_str(r#"{"www-authenticate":"Basic"}"#).unwrap();
        assert_eq!(www.key(), "WWW-Authenticate");
    }
}
