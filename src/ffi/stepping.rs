//! Generation stepping and alive-set export.

use std::collections::HashSet;

use crate::automaton;
use crate::state::{Coord, LifeState};

/// Refresh record handed to the host for one cell.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlCellUpdate {
    pub x: i32,
    pub y: i32,
    /// Instance index, or -1 for cells outside the grid.
    pub index: i64,
    /// 1 = alive, 0 = dead.
    pub alive: u8,
}

impl From<automaton::CellUpdate> for GlCellUpdate {
    fn from(update: automaton::CellUpdate) -> Self {
        GlCellUpdate {
            x: update.coord.x,
            y: update.coord.y,
            index: update.index.map_or(-1, |index| index as i64),
            alive: u8::from(update.alive),
        }
    }
}

/// Write refresh records for `cells` into a host buffer.
///
/// At most `capacity` records are written, in instance-index order. The full
/// record count goes to `out_total` (if non-null) so the host can detect a
/// short buffer.
///
/// # Safety
/// - `out_buf` must be valid for `capacity` writes, or null
/// - `out_total` must be valid for a write, or null
pub(crate) unsafe fn write_updates(
    state: &LifeState,
    cells: &HashSet<Coord>,
    out_buf: *mut GlCellUpdate,
    capacity: usize,
    out_total: *mut u64,
) {
    let updates = automaton::visual_updates(state, cells);
    if !out_total.is_null() {
        *out_total = updates.len() as u64;
    }
    if out_buf.is_null() {
        return;
    }

    let out = std::slice::from_raw_parts_mut(out_buf, capacity);
    for (slot, update) in out.iter_mut().zip(updates) {
        *slot = update.into();
    }
}

/// Copy instance origins into a host buffer, returning the full count.
///
/// # Safety
/// - `out_buf` must be valid for `capacity` writes, or null
pub(crate) unsafe fn write_layout(
    layout: &[[f32; 3]],
    out_buf: *mut [f32; 3],
    capacity: usize,
) -> u64 {
    if !out_buf.is_null() {
        let out = std::slice::from_raw_parts_mut(out_buf, capacity);
        for (slot, origin) in out.iter_mut().zip(layout) {
            *slot = *origin;
        }
    }
    layout.len() as u64
}

/// Advances the simulation by one generation using B3/S23 rules.
///
/// Changed cells are written to `out_buf` as refresh records (see
/// `write_updates`). Pass a null buffer to skip them.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeState
/// - `out_buf` must be valid for `capacity` writes, or null
/// - `out_total` must be valid for a write, or null
///
/// # Returns
/// 1 if the generation converged (no change), 0 if it changed, -1 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn gl_advance(
    ptr: *mut LifeState,
    out_buf: *mut GlCellUpdate,
    capacity: usize,
    out_total: *mut u64,
) -> i32 {
    if ptr.is_null() {
        return -1;
    }

    let state = &mut *ptr;
    let generation = automaton::advance_generation(state);
    write_updates(state, &generation.changed, out_buf, capacity, out_total);
    i32::from(generation.converged)
}

/// Writes refresh records for every cell in the grid (full visual refresh).
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeState, or null
/// - `out_buf` must be valid for `capacity` writes, or null
/// - `out_total` must be valid for a write, or null
///
/// # Returns
/// 0 on success, 1 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn gl_refresh_all(
    ptr: *const LifeState,
    out_buf: *mut GlCellUpdate,
    capacity: usize,
    out_total: *mut u64,
) -> i32 {
    if ptr.is_null() {
        return 1;
    }

    let state = &*ptr;
    write_updates(state, &state.all_cells, out_buf, capacity, out_total);
    0
}

/// Writes instance origins `[x * step, y * step, 0]` in instance-index order.
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeState, or null
/// - `out_buf` must be valid for `capacity` writes, or null
///
/// # Returns
/// Total number of instances (may exceed `capacity`), or 0 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn gl_instance_layout(
    ptr: *const LifeState,
    step: f32,
    out_buf: *mut [f32; 3],
    capacity: usize,
) -> u64 {
    if ptr.is_null() {
        return 0;
    }
    write_layout(&automaton::instance_layout(&*ptr, step), out_buf, capacity)
}

/// Copies alive coordinates into `out_buf`, sorted by (x, y).
///
/// # Safety
/// - `ptr` must be a valid pointer to a LifeState, or null
/// - `out_buf` must be valid for `capacity` writes, or null
///
/// # Returns
/// Total number of alive cells (may exceed `capacity`), or 0 on null pointer.
#[no_mangle]
pub unsafe extern "C" fn gl_export_alive(
    ptr: *const LifeState,
    out_buf: *mut Coord,
    capacity: usize,
) -> u64 {
    if ptr.is_null() {
        return 0;
    }

    let state = &*ptr;
    let mut alive: Vec<Coord> = state.alive.iter().copied().collect();
    alive.sort_unstable();

    if !out_buf.is_null() {
        let out = std::slice::from_raw_parts_mut(out_buf, capacity);
        for (slot, c) in out.iter_mut().zip(&alive) {
            *slot = *c;
        }
    }

    alive.len() as u64
}
