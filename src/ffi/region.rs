//! Region extraction/import and random seeding FFI functions.

use crate::automaton;
use crate::state::LifeState;

/// Byte length of a rectangle, or 0 if empty/inverted.
fn region_len(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> usize {
    let width = (max_x as i64 - min_x as i64).max(0) as usize;
    let height = (max_y as i64 - min_y as i64).max(0) as usize;
    width * height
}

/// Extracts a rectangular region of liveness into a flat output buffer.
///
/// # Layout
/// The buffer is filled in x,y order (x changes slowest, y changes fastest).
/// This matches the layout expected by `gl_import_region`.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeState, or null
/// - `out_buf` must point to a buffer with at least
///   `(max_x - min_x) * (max_y - min_y)` bytes
///
/// # Returns
/// Number of bytes written, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn gl_extract_region(
    ptr: *const LifeState,
    out_buf: *mut u8,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }

    let state = &*ptr;
    let buf_slice = std::slice::from_raw_parts_mut(out_buf, region_len(min_x, min_y, max_x, max_y));
    automaton::extract_region(state, buf_slice, min_x, min_y, max_x, max_y)
}

/// Imports a rectangular region of liveness from a flat buffer.
///
/// # Layout
/// The buffer is expected to be in x,y order (matching `gl_extract_region`).
/// Input values are normalized: 0 = dead, non-zero = alive.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeState, or null
/// - `in_buf` must point to a buffer with at least
///   `(max_x - min_x) * (max_y - min_y)` bytes
///
/// # Returns
/// Number of bytes read, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn gl_import_region(
    ptr: *mut LifeState,
    in_buf: *const u8,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
) -> u64 {
    if ptr.is_null() || in_buf.is_null() {
        return 0;
    }

    let state = &mut *ptr;
    let buf_slice = std::slice::from_raw_parts(in_buf, region_len(min_x, min_y, max_x, max_y));
    automaton::import_region(state, buf_slice, min_x, min_y, max_x, max_y)
}

/// Replaces the alive set with a deterministic random soup.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeState, or null
///
/// # Returns
/// Number of alive cells after seeding, or 0 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn gl_seed_random(ptr: *mut LifeState, fill_rate: f64, seed: u64) -> u64 {
    if ptr.is_null() {
        return 0;
    }

    let state = &mut *ptr;
    automaton::seed_random(state, fill_rate, seed);
    state.alive_count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::grid::{gl_is_alive_cell, gl_toggle_cell};
    use crate::ffi::lifecycle;
    use std::ptr;

    #[test]
    fn test_extract_region() {
        unsafe {
            let state = lifecycle::gl_create(8, 8);
            gl_toggle_cell(state, 2, 2, 1);
            gl_toggle_cell(state, 3, 3, 1);

            let mut buffer = vec![0u8; 4];
            let written = gl_extract_region(state, buffer.as_mut_ptr(), 2, 2, 4, 4);
            assert_eq!(written, 4);
            assert_eq!(buffer, vec![1, 0, 0, 1]);

            lifecycle::gl_destroy(state);
        }
    }

    #[test]
    fn test_import_region() {
        unsafe {
            let state = lifecycle::gl_create(8, 8);

            let pattern = [0u8, 1, 0, 0, 1, 0, 0, 1, 0];
            let read = gl_import_region(state, pattern.as_ptr(), 1, 1, 4, 4);
            assert_eq!(read, 9);

            // Horizontal blinker on row y = 2
            assert_eq!(gl_is_alive_cell(state, 1, 2), 1);
            assert_eq!(gl_is_alive_cell(state, 2, 2), 1);
            assert_eq!(gl_is_alive_cell(state, 3, 2), 1);
            assert_eq!(gl_is_alive_cell(state, 2, 1), 0);

            lifecycle::gl_destroy(state);
        }
    }

    #[test]
    fn test_inverted_region() {
        unsafe {
            let state = lifecycle::gl_create(4, 4);
            let mut buffer = [0u8; 4];
            assert_eq!(gl_extract_region(state, buffer.as_mut_ptr(), 3, 3, 1, 1), 0);
            assert_eq!(gl_import_region(state, buffer.as_ptr(), 3, 3, 1, 1), 0);
            lifecycle::gl_destroy(state);
        }
    }

    #[test]
    fn test_seed_random() {
        unsafe {
            let a = lifecycle::gl_create(16, 16);
            let b = lifecycle::gl_create(16, 16);

            let count = gl_seed_random(a, 0.5, 99);
            assert!(count > 0 && count < 256);
            assert_eq!(gl_seed_random(b, 0.5, 99), count);
            assert_eq!((*a).alive, (*b).alive);

            lifecycle::gl_destroy(a);
            lifecycle::gl_destroy(b);
        }
    }

    #[test]
    fn test_null_pointer_handling() {
        unsafe {
            let mut buffer = [0u8; 4];
            assert_eq!(gl_extract_region(ptr::null(), buffer.as_mut_ptr(), 0, 0, 2, 2), 0);
            assert_eq!(gl_import_region(ptr::null_mut(), buffer.as_ptr(), 0, 0, 2, 2), 0);
            assert_eq!(gl_seed_random(ptr::null_mut(), 0.5, 1), 0);

            let state = lifecycle::gl_create(4, 4);
            assert_eq!(gl_extract_region(state, ptr::null_mut(), 0, 0, 2, 2), 0);
            lifecycle::gl_destroy(state);
        }
    }
}
