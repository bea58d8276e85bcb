//! Grid initialization, cell queries, toggling and index mapping.

use crate::automaton;
use crate::state::{Coord, Dimensions, LifeState, TogglePolicy};

/// Re-initializes the grid with new dimensions.
///
/// The alive set is kept; call `gl_clear` first for a fresh grid.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeState
///
/// # Returns
/// 0 on success, 1 on failure (null pointer)
#[no_mangle]
pub unsafe extern "C" fn gl_init_grid(ptr: *mut LifeState, width: i32, height: i32) -> i32 {
    if ptr.is_null() {
        return 1;
    }

    let state = &mut *ptr;
    automaton::initialize(state, Dimensions::new(width, height));
    0
}

/// Kills every cell.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeState, or null
#[no_mangle]
pub unsafe extern "C" fn gl_clear(ptr: *mut LifeState) {
    if ptr.is_null() {
        return;
    }
    (*ptr).clear();
}

/// Selects how out-of-bounds toggles are treated (0 = permissive, non-zero = strict).
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeState
///
/// # Returns
/// 0 on success, 1 on failure (null pointer)
#[no_mangle]
pub unsafe extern "C" fn gl_set_toggle_policy(ptr: *mut LifeState, strict: u8) -> i32 {
    if ptr.is_null() {
        return 1;
    }

    (*ptr).toggle_policy = if strict != 0 {
        TogglePolicy::Strict
    } else {
        TogglePolicy::Permissive
    };
    0
}

/// Returns 1 if the coordinate is inside the grid, 0 otherwise or on null pointer.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeState, or null
#[no_mangle]
pub unsafe extern "C" fn gl_is_valid_cell(ptr: *const LifeState, x: i32, y: i32) -> u8 {
    if ptr.is_null() {
        return 0;
    }
    u8::from(automaton::is_valid_cell(&*ptr, Coord::new(x, y)))
}

/// Gets the state of a cell (0 = dead, 1 = alive).
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeState, or null
///
/// # Returns
/// 0 if null pointer or dead; 1 if alive. Out-of-bounds cells toggled alive
/// under the permissive policy report 1.
#[no_mangle]
pub unsafe extern "C" fn gl_is_alive_cell(ptr: *const LifeState, x: i32, y: i32) -> u8 {
    if ptr.is_null() {
        return 0;
    }
    u8::from(automaton::is_alive_cell(&*ptr, Coord::new(x, y)))
}

/// Counts alive Moore neighbours (0-8) of a cell.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeState, or null
#[no_mangle]
pub unsafe extern "C" fn gl_count_live_neighbors(ptr: *const LifeState, x: i32, y: i32) -> u8 {
    if ptr.is_null() {
        return 0;
    }
    automaton::count_live_neighbors(&*ptr, Coord::new(x, y))
}

/// Number of alive cells.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeState, or null
#[no_mangle]
pub unsafe extern "C" fn gl_alive_count(ptr: *const LifeState) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    (*ptr).alive_count() as u64
}

/// Sets a cell to alive (non-zero) or dead (0).
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeState
///
/// # Returns
/// 0 on success, 1 on null pointer or an out-of-bounds cell under the strict policy.
#[no_mangle]
pub unsafe extern "C" fn gl_toggle_cell(ptr: *mut LifeState, x: i32, y: i32, alive: u8) -> i32 {
    if ptr.is_null() {
        return 1;
    }

    let state = &mut *ptr;
    match automaton::toggle_cell(state, Coord::new(x, y), alive != 0) {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

/// Instance index of a cell.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeState, or null
///
/// # Returns
/// `x * height + y`, or -1 for out-of-bounds cells and null pointer.
#[no_mangle]
pub unsafe extern "C" fn gl_cell_index(ptr: *const LifeState, x: i32, y: i32) -> i64 {
    if ptr.is_null() {
        return -1;
    }
    automaton::coordinate_to_index(&*ptr, Coord::new(x, y)).map_or(-1, |index| index as i64)
}

/// Cell at an instance index.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeState, or null
/// - `out_x` and `out_y` must be valid for writes, or null
///
/// # Returns
/// 0 on success, 1 if the index is outside the grid or any pointer is null.
#[no_mangle]
pub unsafe extern "C" fn gl_cell_from_index(
    ptr: *const LifeState,
    index: u64,
    out_x: *mut i32,
    out_y: *mut i32,
) -> i32 {
    if ptr.is_null() || out_x.is_null() || out_y.is_null() {
        return 1;
    }

    match automaton::index_to_coordinate(&*ptr, index as usize) {
        Some(c) => {
            *out_x = c.x;
            *out_y = c.y;
            0
        }
        None => 1,
    }
}
