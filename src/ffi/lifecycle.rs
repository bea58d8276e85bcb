//! State creation, destruction, and generation queries.

use std::ffi::{c_char, CStr};

use crate::config::LifeConfig;
use crate::state::LifeState;

/// Creates a new, empty grid and returns an opaque pointer.
///
/// # Returns
/// A pointer to a new LifeState. Non-positive dimensions give a degenerate
/// grid where no cell is valid.
///
/// # Safety
/// The returned pointer must eventually be freed with `gl_destroy()`.
#[no_mangle]
pub extern "C" fn gl_create(width: i32, height: i32) -> *mut LifeState {
    Box::into_raw(Box::new(LifeState::new(width, height)))
}

/// Creates a grid from a TOML config file.
///
/// # Safety
/// - `path` must be a valid NUL-terminated string, or null
///
/// # Returns
/// A pointer to a new LifeState, or null if the path is null or the config
/// cannot be loaded.
#[no_mangle]
pub unsafe extern "C" fn gl_create_from_config(path: *const c_char) -> *mut LifeState {
    if path.is_null() {
        return std::ptr::null_mut();
    }

    let Ok(path) = CStr::from_ptr(path).to_str() else {
        tracing::warn!("config path is not valid UTF-8");
        return std::ptr::null_mut();
    };

    match LifeConfig::load(path) {
        Ok(config) => Box::into_raw(Box::new(LifeState::from_config(&config))),
        Err(err) => {
            tracing::warn!("failed to load {path}: {err}");
            std::ptr::null_mut()
        }
    }
}

/// Destroys a grid and frees its memory.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by `gl_create()`, or null
/// - `ptr` must not be used after this call
#[no_mangle]
pub unsafe extern "C" fn gl_destroy(ptr: *mut LifeState) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Gets the current generation counter.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeState, or null
///
/// # Returns
/// The generation counter, or 0 if ptr is null.
#[no_mangle]
pub unsafe extern "C" fn gl_get_generation(ptr: *const LifeState) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).generation
}
