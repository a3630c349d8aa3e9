//! C-ABI wrapper around `endpoint-core`.
//!
//! # Overview
//! Lets any language with a C FFI describe an endpoint, realize its URL and
//! materialize the request, then execute it with its own networking stack.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - The endpoint is an opaque handle mutated through setters and
//!   `endpoint_push_*` appenders, mirroring the core builder 1:1.
//! - Setters report through `FfiErrorCode`; materialization returns a single
//!   `FfiRequestResult` envelope.
//! - The C caller owns all returned pointers and must call the matching
//!   `endpoint_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use endpoint_core::{Endpoint, Header, RequestOptions};

use types::*;

/// Borrow a C string as UTF-8. `None` for invalid UTF-8.
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated string that outlives
/// the returned reference.
unsafe fn read_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Run `f` against the endpoint behind `endpoint`, mapping null pointers and
/// panics to error codes.
fn with_endpoint(
    endpoint: *mut FfiEndpoint,
    f: impl FnOnce(&mut Endpoint) -> FfiErrorCode + std::panic::UnwindSafe,
) -> FfiErrorCode {
    if endpoint.is_null() {
        return FfiErrorCode::NullArg;
    }
    catch_unwind(|| {
        let endpoint = unsafe { &mut *endpoint };
        f(&mut endpoint.inner)
    })
    .unwrap_or(FfiErrorCode::Panic)
}

// ---------------------------------------------------------------------------
// Endpoint lifecycle
// ---------------------------------------------------------------------------

/// Create a new `GET https://{host}` endpoint.
///
/// Returns null if `host` is null or not valid UTF-8.
/// The caller must free the returned pointer with `endpoint_free`.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_new(host: *const c_char) -> *mut FfiEndpoint {
    catch_unwind(|| {
        if host.is_null() {
            return std::ptr::null_mut();
        }
        match unsafe { read_str(host) } {
            Some(host) => Box::into_raw(Box::new(FfiEndpoint {
                inner: Endpoint::new(host),
            })),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free an endpoint created by `endpoint_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_free(endpoint: *mut FfiEndpoint) {
    if !endpoint.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(endpoint) });
        });
    }
}

// ---------------------------------------------------------------------------
// Setters
// ---------------------------------------------------------------------------

/// Set the method from an `FfiHttpMethod` code.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_set_method(endpoint: *mut FfiEndpoint, method: u32) -> FfiErrorCode {
    with_endpoint(endpoint, |ep| match method_from_code(method) {
        Some(method) => {
            ep.method = method;
            FfiErrorCode::Ok
        }
        None => FfiErrorCode::InvalidArg,
    })
}

/// Set the scheme from an `FfiScheme` code.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_set_scheme(endpoint: *mut FfiEndpoint, scheme: u32) -> FfiErrorCode {
    with_endpoint(endpoint, |ep| match scheme_from_code(scheme) {
        Some(scheme) => {
            ep.scheme = scheme;
            FfiErrorCode::Ok
        }
        None => FfiErrorCode::InvalidArg,
    })
}

/// Set the port. `80` leaves the port out of the URL.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_set_port(endpoint: *mut FfiEndpoint, port: u16) -> FfiErrorCode {
    with_endpoint(endpoint, |ep| {
        ep.port = port;
        FfiErrorCode::Ok
    })
}

/// Set the user. Null clears it.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_set_user(endpoint: *mut FfiEndpoint, user: *const c_char) -> FfiErrorCode {
    with_endpoint(endpoint, |ep| {
        if user.is_null() {
            ep.user = None;
            return FfiErrorCode::Ok;
        }
        match unsafe { read_str(user) } {
            Some(user) => {
                ep.user = Some(user.to_string());
                FfiErrorCode::Ok
            }
            None => FfiErrorCode::InvalidArg,
        }
    })
}

/// Set the password. Null clears it.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_set_password(
    endpoint: *mut FfiEndpoint,
    password: *const c_char,
) -> FfiErrorCode {
    with_endpoint(endpoint, |ep| {
        if password.is_null() {
            ep.password = None;
            return FfiErrorCode::Ok;
        }
        match unsafe { read_str(password) } {
            Some(password) => {
                ep.password = Some(password.to_string());
                FfiErrorCode::Ok
            }
            None => FfiErrorCode::InvalidArg,
        }
    })
}

/// Copy `len` bytes from `data` into the body. Null `data` clears it.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_set_data(
    endpoint: *mut FfiEndpoint,
    data: *const u8,
    len: usize,
) -> FfiErrorCode {
    with_endpoint(endpoint, |ep| {
        ep.data = if data.is_null() {
            None
        } else {
            Some(unsafe { std::slice::from_raw_parts(data, len) }.to_vec())
        };
        FfiErrorCode::Ok
    })
}

// ---------------------------------------------------------------------------
// Appenders
// ---------------------------------------------------------------------------

/// Append one path segment.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_push_path(endpoint: *mut FfiEndpoint, segment: *const c_char) -> FfiErrorCode {
    with_endpoint(endpoint, |ep| {
        if segment.is_null() {
            return FfiErrorCode::NullArg;
        }
        match unsafe { read_str(segment) } {
            Some(segment) => {
                ep.paths.push(segment.to_string());
                FfiErrorCode::Ok
            }
            None => FfiErrorCode::InvalidArg,
        }
    })
}

/// Append one query parameter.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_push_query(
    endpoint: *mut FfiEndpoint,
    key: *const c_char,
    value: *const c_char,
) -> FfiErrorCode {
    with_endpoint(endpoint, |ep| {
        if key.is_null() || value.is_null() {
            return FfiErrorCode::NullArg;
        }
        match unsafe { (read_str(key), read_str(value)) } {
            (Some(key), Some(value)) => {
                ep.queries.push(endpoint_core::Query::new(key, value));
                FfiErrorCode::Ok
            }
            _ => FfiErrorCode::InvalidArg,
        }
    })
}

/// Append a header. Known names map onto the header vocabulary
/// case-insensitively; any other key is sent as given.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_push_header(
    endpoint: *mut FfiEndpoint,
    key: *const c_char,
    value: *const c_char,
) -> FfiErrorCode {
    with_endpoint(endpoint, |ep| {
        if key.is_null() || value.is_null() {
            return FfiErrorCode::NullArg;
        }
        match unsafe { (read_str(key), read_str(value)) } {
            (Some(key), Some(value)) => {
                ep.headers.push(Header::from_pair(key, value));
                FfiErrorCode::Ok
            }
            _ => FfiErrorCode::InvalidArg,
        }
    })
}

// ---------------------------------------------------------------------------
// Transformations
// ---------------------------------------------------------------------------

/// Realize the endpoint's URL as it goes on the wire, explicit port included.
///
/// Returns null if `endpoint` is null or the URL cannot be formed.
/// The caller must free the returned string with `endpoint_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_url(endpoint: *const FfiEndpoint) -> *mut c_char {
    catch_unwind(|| {
        if endpoint.is_null() {
            return std::ptr::null_mut();
        }
        let endpoint = unsafe { &*endpoint };
        match endpoint.inner.url_request() {
            Ok(req) => c_string(req.uri()),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Describe the endpoint by its unencoded URL components. Never fails for a
/// non-null endpoint.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_description(endpoint: *const FfiEndpoint) -> *mut c_char {
    catch_unwind(|| {
        if endpoint.is_null() {
            return std::ptr::null_mut();
        }
        let endpoint = unsafe { &*endpoint };
        c_string(endpoint.inner.to_string())
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Materialize the request.
///
/// `cache_policy` is an `FfiCachePolicy` code, or `-1` to keep the client
/// default. Always returns a result; free it with `endpoint_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_url_request(
    endpoint: *const FfiEndpoint,
    allows_cellular_access: bool,
    cache_policy: i32,
) -> *mut FfiRequestResult {
    catch_unwind(|| {
        if endpoint.is_null() {
            return FfiRequestResult::failure(FfiErrorCode::NullArg, "null argument: endpoint");
        }
        let Some(cache_policy) = cache_policy_from_code(cache_policy) else {
            return FfiRequestResult::failure(
                FfiErrorCode::InvalidArg,
                &format!("unknown cache policy: {cache_policy}"),
            );
        };
        let endpoint = unsafe { &*endpoint };
        let options = RequestOptions {
            allows_cellular_access,
            cache_policy,
        };
        match endpoint.inner.url_request_with(options) {
            Ok(req) => FfiRequestResult::ok(req),
            Err(err) => FfiRequestResult::from_error(err),
        }
    })
    .unwrap_or_else(|_| FfiRequestResult::failure(FfiErrorCode::Panic, "panic in endpoint_url_request"))
}

// ---------------------------------------------------------------------------
// Memory management
// ---------------------------------------------------------------------------

/// Free the request owned by a result, if any.
fn free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let req = unsafe { Box::from_raw(req) };
    if !req.url.is_null() {
        drop(unsafe { CString::from_raw(req.url) });
    }
    if !req.body.is_null() && req.body_len > 0 {
        let body = std::ptr::slice_from_raw_parts_mut(req.body, req.body_len);
        drop(unsafe { Box::from_raw(body) });
    }
    if !req.headers.is_null() && req.headers_len > 0 {
        let headers = std::ptr::slice_from_raw_parts_mut(req.headers, req.headers_len);
        let headers = unsafe { Box::from_raw(headers) };
        for h in headers.iter() {
            if !h.key.is_null() {
                drop(unsafe { CString::from_raw(h.key) });
            }
            if !h.value.is_null() {
                drop(unsafe { CString::from_raw(h.value) });
            }
        }
    }
}

/// Free an `FfiRequestResult` returned by `endpoint_url_request`, including
/// the request it carries. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_free_result(result: *mut FfiRequestResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        free_request(result.request);
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn endpoint_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
