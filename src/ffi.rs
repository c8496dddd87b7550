//! FFI bindings for Focus Flux
//!
//! This module provides C-compatible functions so a host app can call the focus
//! calculation directly. Functions returning strings hand back allocated memory
//! that must be freed by the caller using `focus_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::calculator::{compute_focus_minutes, FocusScoreCalculator};
use crate::config::WeightConfiguration;
use crate::encoder::FocusReportEncoder;
use crate::engine::ResolvedSignals;
use crate::types::{parse_date, SignalDurations};

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
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

/// Focus minutes for one day's signals using the default weights.
///
/// Never fails.
#[no_mangle]
pub extern "C" fn focus_compute_minutes(still: f64, mindful: f64, interrupt: f64) -> u64 {
    compute_focus_minutes(still, mindful, interrupt, WeightConfiguration::global())
}

/// Focus minutes with weights given as JSON (missing fields use defaults).
///
/// Minute counts above `i64::MAX` saturate.
///
/// # Safety
/// - `weights_json` must be NULL or a valid null-terminated C string. NULL means default weights.
/// - Returns -1 if the weights cannot be parsed; call `focus_last_error` for the message.
#[no_mangle]
pub unsafe extern "C" fn focus_compute_minutes_weighted(
    still: f64,
    mindful: f64,
    interrupt: f64,
    weights_json: *const c_char,
) -> i64 {
    clear_last_error();

    let weights = if weights_json.is_null() {
        WeightConfiguration::DEFAULT
    } else {
        let json = match cstr_to_string(weights_json) {
            Some(s) => s,
            None => {
                set_last_error("Invalid weights string");
                return -1;
            }
        };
        match WeightConfiguration::from_json(&json) {
            Ok(w) => w,
            Err(e) => {
                set_last_error(&e.to_string());
                return -1;
            }
        }
    };

    let minutes = compute_focus_minutes(still, mindful, interrupt, &weights);
    i64::try_from(minutes).unwrap_or(i64::MAX)
}

/// Focus report JSON for a day (`YYYY-MM-DD`) using the default weights.
///
/// # Safety
/// - `date` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `focus_free_string`.
/// - Returns NULL on error; call `focus_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn focus_report_json(
    date: *const c_char,
    still: f64,
    mindful: f64,
    interrupt: f64,
) -> *mut c_char {
    clear_last_error();

    let date_str = match cstr_to_string(date) {
        Some(s) => s,
        None => {
            set_last_error("Invalid date string pointer");
            return ptr::null_mut();
        }
    };

    let date = match parse_date(&date_str) {
        Ok(d) => d,
        Err(e) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    };

    let resolved = ResolvedSignals {
        date,
        signals: SignalDurations::new(still, mindful, interrupt),
        unavailable: Vec::new(),
    };

    match FocusReportEncoder::new().encode_to_json(&resolved, &FocusScoreCalculator::default()) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by Focus Flux functions.
///
/// # Safety
/// - `s` must be a pointer returned by a Focus Flux function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn focus_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a static string that is valid until the next Focus Flux call.
/// - Do NOT free this pointer.
/// - Returns NULL if there was no error.
#[no_mangle]
pub unsafe extern "C" fn focus_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}
