//! Translation of changed cells into per-instance refresh records.
//!
//! The host keeps one visual instance per in-bounds cell, addressed by
//! `coordinate_to_index`. Nothing here touches simulation state.

use std::collections::HashSet;

use super::grid::{coordinate_to_index, index_to_coordinate, is_alive_cell};
use crate::state::{Coord, LifeState};

/// Refresh record for a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellUpdate {
    pub coord: Coord,
    /// Instance index, or `None` for cells outside the grid.
    pub index: Option<usize>,
    pub alive: bool,
}

/// Classify each cell as alive or dead, sorted by instance index.
///
/// Out-of-bounds cells sort last, by coordinate.
pub fn visual_updates(state: &LifeState, cells: &HashSet<Coord>) -> Vec<CellUpdate> {
    let mut updates: Vec<CellUpdate> = cells
        .iter()
        .map(|&coord| CellUpdate {
            coord,
            index: coordinate_to_index(state, coord),
            alive: is_alive_cell(state, coord),
        })
        .collect();

    updates.sort_by_key(|u| (u.index.is_none(), u.index, u.coord));
    updates
}

/// World-space origin of a cell instance.
#[inline]
pub fn instance_origin(coord: Coord, step: f32) -> [f32; 3] {
    [coord.x as f32 * step, coord.y as f32 * step, 0.0]
}

/// Origins of every instance, in instance-index order.
pub fn instance_layout(state: &LifeState, step: f32) -> Vec<[f32; 3]> {
    (0..state.dimensions.cell_count())
        .filter_map(|index| index_to_coordinate(state, index))
        .map(|coord| instance_origin(coord, step))
        .collect()
}
