//! FFI bindings
//!
//! This module provides C-compatible functions for calling the suggestion service
//! from other languages. All functions use C strings (null-terminated) and return
//! allocated memory that must be freed by the caller using `suggest_free_string`.
//!
//! Responses are the JSON-serialized [`ServiceResponse`] envelope
//! (`{"status": 200, "body": {...}}`), so callers see the same status mapping as
//! any other host.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use std::sync::OnceLock;

use crate::service::{ServiceResponse, SuggestionService};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn service() -> &'static SuggestionService {
    static SERVICE: OnceLock<SuggestionService> = OnceLock::new();
    SERVICE.get_or_init(SuggestionService::default)
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

fn response_to_cstr(response: &ServiceResponse) -> *mut c_char {
    match serde_json::to_string(response) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Service API
// ============================================================================

/// Analyze a request JSON body and return the response envelope JSON.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `suggest_free_string`.
/// - Returns NULL only if the input pointer is invalid; request errors are
///   reported inside the envelope with a 4xx/5xx status.
#[no_mangle]
pub unsafe extern "C" fn suggest_analyze(json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    response_to_cstr(&service().analyze(&json_str))
}

/// Dispatch a request by method and path.
///
/// # Safety
/// - `method`, `path`, and `body` must be valid null-terminated C strings;
///   `body` may be NULL for routes without a body.
/// - Returns a newly allocated string that must be freed with `suggest_free_string`.
#[no_mangle]
pub unsafe extern "C" fn suggest_route(
    method: *const c_char,
    path: *const c_char,
    body: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let method_str = match cstr_to_string(method) {
        Some(s) => s,
        None => {
            set_last_error("Invalid method string pointer");
            return ptr::null_mut();
        }
    };

    let path_str = match cstr_to_string(path) {
        Some(s) => s,
        None => {
            set_last_error("Invalid path string pointer");
            return ptr::null_mut();
        }
    };

    let body_str = cstr_to_string(body).unwrap_or_default();

    response_to_cstr(&service().route(&method_str, &path_str, &body_str))
}

/// Liveness probe.
///
/// # Safety
/// - Returns a newly allocated string that must be freed with `suggest_free_string`.
#[no_mangle]
pub unsafe extern "C" fn suggest_health() -> *mut c_char {
    clear_last_error();
    response_to_cstr(&service().health())
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by a `suggest_*` function.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a `suggest_*` function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn suggest_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next `suggest_*` call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn suggest_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn suggest_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
