//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointer + length instead of `Vec`,
//! and tagged enums with explicit discriminants. Enum values coming *from* C
//! arrive as plain integers and are range-checked here, since an out-of-range
//! discriminant in a Rust enum is undefined behavior.

use std::ffi::CString;
use std::os::raw::c_char;

use endpoint_core::{CachePolicy, EndpointError, HttpMethod, HttpRequest, Scheme};

/// Opaque handle to an `Endpoint`. C callers receive a pointer to this and
/// pass it back into every FFI function.
pub struct FfiEndpoint {
    pub(crate) inner: endpoint_core::Endpoint,
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// HTTP method as a C enum. Also the accepted integer codes for
/// `endpoint_set_method`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Patch = 3,
    Delete = 4,
    Head = 5,
    Options = 6,
    Trace = 7,
    Connect = 8,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Patch => FfiHttpMethod::Patch,
            HttpMethod::Delete => FfiHttpMethod::Delete,
            HttpMethod::Head => FfiHttpMethod::Head,
            HttpMethod::Options => FfiHttpMethod::Options,
            HttpMethod::Trace => FfiHttpMethod::Trace,
            HttpMethod::Connect => FfiHttpMethod::Connect,
        }
    }
}

pub(crate) fn method_from_code(code: u32) -> Option<HttpMethod> {
    Some(match code {
        0 => HttpMethod::Get,
        1 => HttpMethod::Post,
        2 => HttpMethod::Put,
        3 => HttpMethod::Patch,
        4 => HttpMethod::Delete,
        5 => HttpMethod::Head,
        6 => HttpMethod::Options,
        7 => HttpMethod::Trace,
        8 => HttpMethod::Connect,
        _ => return None,
    })
}

/// Integer codes accepted by `endpoint_set_scheme`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiScheme {
    Http = 0,
    Https = 1,
    Ws = 2,
    Wss = 3,
}

pub(crate) fn scheme_from_code(code: u32) -> Option<Scheme> {
    Some(match code {
        0 => Scheme::Http,
        1 => Scheme::Https,
        2 => Scheme::Ws,
        3 => Scheme::Wss,
        _ => return None,
    })
}

/// Cache policy as a C enum. `endpoint_url_request` takes the same codes,
/// or `-1` to keep the client default.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiCachePolicy {
    UseProtocolCachePolicy = 0,
    ReloadIgnoringLocalCacheData = 1,
    ReloadIgnoringLocalAndRemoteCacheData = 2,
    ReturnCacheDataElseLoad = 3,
    ReturnCacheDataDontLoad = 4,
    ReloadRevalidatingCacheData = 5,
}

impl From<CachePolicy> for FfiCachePolicy {
    fn from(p: CachePolicy) -> Self {
        match p {
            CachePolicy::UseProtocolCachePolicy => FfiCachePolicy::UseProtocolCachePolicy,
            CachePolicy::ReloadIgnoringLocalCacheData => FfiCachePolicy::ReloadIgnoringLocalCacheData,
            CachePolicy::ReloadIgnoringLocalAndRemoteCacheData => {
                FfiCachePolicy::ReloadIgnoringLocalAndRemoteCacheData
            }
            CachePolicy::ReturnCacheDataElseLoad => FfiCachePolicy::ReturnCacheDataElseLoad,
            CachePolicy::ReturnCacheDataDontLoad => FfiCachePolicy::ReturnCacheDataDontLoad,
            CachePolicy::ReloadRevalidatingCacheData => FfiCachePolicy::ReloadRevalidatingCacheData,
        }
    }
}

/// `Some(None)` for `-1`, `Some(Some(_))` for a known code, `None` otherwise.
pub(crate) fn cache_policy_from_code(code: i32) -> Option<Option<CachePolicy>> {
    Some(Some(match code {
        -1 => return Some(None),
        0 => CachePolicy::UseProtocolCachePolicy,
        1 => CachePolicy::ReloadIgnoringLocalCacheData,
        2 => CachePolicy::ReloadIgnoringLocalAndRemoteCacheData,
        3 => CachePolicy::ReturnCacheDataElseLoad,
        4 => CachePolicy::ReturnCacheDataDontLoad,
        5 => CachePolicy::ReloadRevalidatingCacheData,
        _ => return None,
    }))
}

/// Status codes returned by setters and carried in `FfiRequestResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    UrlFormation = 1,
    NullArg = 2,
    InvalidArg = 3,
    Panic = 4,
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A materialized request described as C-compatible plain data.
///
/// `headers` keeps insertion order and may repeat keys. `has_body` tells an
/// empty body apart from none; `body` is null whenever `body_len` is 0.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: usize,
    pub has_body: bool,
    pub body: *mut u8,
    pub body_len: usize,
    pub allows_cellular_access: bool,
    pub cache_policy: FfiCachePolicy,
}

pub(crate) fn c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let url = c_string(req.uri());

        let has_body = req.body.is_some();
        let (body, body_len) = match req.body {
            Some(b) if !b.is_empty() => {
                let len = b.len();
                (Box::into_raw(b.into_boxed_slice()) as *mut u8, len)
            }
            _ => (std::ptr::null_mut(), 0),
        };

        let headers_len = req.headers.len();
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: c_string(k),
                    value: c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        let ffi_req = Box::new(FfiHttpRequest {
            method: req.method.into(),
            url,
            headers,
            headers_len,
            has_body,
            body,
            body_len,
            allows_cellular_access: req.allows_cellular_access,
            cache_policy: req.cache_policy.into(),
        });
        Box::into_raw(ffi_req)
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Result envelope for `endpoint_url_request`.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `request`
/// points to the materialized request. On failure `error_code` describes the
/// category, `error_message` is a human-readable C string, and `request` is
/// null.
#[repr(C)]
pub struct FfiRequestResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub request: *mut FfiHttpRequest,
}

impl FfiRequestResult {
    pub(crate) fn ok(req: HttpRequest) -> *mut Self {
        Box::into_raw(Box::new(FfiRequestResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            request: FfiHttpRequest::from_core(req),
        }))
    }

    pub(crate) fn from_error(err: EndpointError) -> *mut Self {
        let error_code = match err {
            EndpointError::UrlFormation => FfiErrorCode::UrlFormation,
        };
        Self::failure(error_code, &err.to_string())
    }

    pub(crate) fn failure(error_code: FfiErrorCode, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiRequestResult {
            error_code,
            error_message: c_string(msg),
            request: std::ptr::null_mut(),
        }))
    }
}
