//! Grid initialization, bounds, neighbourhood queries and cell toggling.

use std::collections::HashSet;

use crate::error::{LifeError, LifeResult};
use crate::state::{Coord, Dimensions, LifeState, TogglePolicy};

/// The eight Moore neighbourhood offsets.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Set the grid dimensions and rebuild the set of all in-bounds cells.
///
/// The alive set is left as is; callers that want a fresh grid clear it
/// themselves. The generation counter restarts at 0.
pub fn initialize(state: &mut LifeState, dimensions: Dimensions) {
    state.dimensions = dimensions;
    state.generation = 0;

    state.all_cells.clear();
    state.all_cells.reserve(dimensions.cell_count());
    for x in 0..dimensions.width.max(0) {
        for y in 0..dimensions.height.max(0) {
            state.all_cells.insert(Coord::new(x, y));
        }
    }

    tracing::info!(
        "initialized {}x{} grid ({} cells)",
        dimensions.width,
        dimensions.height,
        state.all_cells.len()
    );
}

/// Check if a coordinate is within grid bounds.
#[inline]
pub fn is_valid_cell(state: &LifeState, c: Coord) -> bool {
    c.x >= 0 && c.x < state.dimensions.width && c.y >= 0 && c.y < state.dimensions.height
}

/// Check if a coordinate is in the alive set. No bounds check.
#[inline]
pub fn is_alive_cell(state: &LifeState, c: Coord) -> bool {
    state.alive.contains(&c)
}

/// In-bounds Moore neighbours of `c`, or nothing if `c` itself is out of bounds.
pub fn neighbor_coordinates(state: &LifeState, c: Coord) -> HashSet<Coord> {
    neighbors_iter(state, c).collect()
}

/// Iterator form of `neighbor_coordinates`, used by the hot paths.
pub(crate) fn neighbors_iter(state: &LifeState, c: Coord) -> impl Iterator<Item = Coord> + '_ {
    let center_valid = is_valid_cell(state, c);
    NEIGHBOR_OFFSETS
        .iter()
        .filter(move |_| center_valid)
        .map(move |&(dx, dy)| Coord::new(c.x + dx, c.y + dy))
        .filter(move |&n| is_valid_cell(state, n))
}

/// Count alive neighbours using the Moore neighbourhood (8 neighbours).
pub fn count_live_neighbors(state: &LifeState, c: Coord) -> u8 {
    neighbors_iter(state, c)
        .filter(|n| is_alive_cell(state, *n))
        .count() as u8
}

/// Set a cell alive or dead and return the single cell to refresh.
///
/// Under `TogglePolicy::Permissive` any coordinate is accepted, including ones
/// outside the grid. Such cells answer `is_alive_cell` but never take part in
/// stepping. Under `TogglePolicy::Strict` they are rejected.
pub fn toggle_cell(state: &mut LifeState, c: Coord, alive: bool) -> LifeResult<HashSet<Coord>> {
    if state.toggle_policy == TogglePolicy::Strict && !is_valid_cell(state, c) {
        tracing::warn!("rejected toggle of out-of-bounds cell ({}, {})", c.x, c.y);
        return Err(LifeError::OutOfBounds { x: c.x, y: c.y });
    }

    if alive {
        state.alive.insert(c);
    } else {
        state.alive.remove(&c);
    }
    tracing::trace!("toggled ({}, {}) -> {}", c.x, c.y, alive);

    Ok(HashSet::from([c]))
}

/// Linear instance index of a valid coordinate: `x * height + y`.
#[inline]
pub fn coordinate_to_index(state: &LifeState, c: Coord) -> Option<usize> {
    if !is_valid_cell(state, c) {
        return None;
    }
    Some(c.x as usize * state.dimensions.height as usize + c.y as usize)
}

/// Inverse of `coordinate_to_index`, keyed on height as well.
#[inline]
pub fn index_to_coordinate(state: &LifeState, index: usize) -> Option<Coord> {
    if index >= state.dimensions.cell_count() {
        return None;
    }
    let height = state.dimensions.height as usize;
    Some(Coord::new((index / height) as i32, (index % height) as i32))
}
