//! Core life engine logic and grid operations.
//!
//! This module contains the actual logic for querying and mutating the alive
//! set, stepping generations, and bulk import/export.
//! The FFI layer in `ffi/` calls these functions.

pub mod driver;
pub mod grid;
pub mod region;
pub mod seeding;
pub mod stepping;
pub mod visuals;

pub use driver::{LifeDriver, RunState, TickReport};
pub use grid::{
    coordinate_to_index, count_live_neighbors, index_to_coordinate, initialize, is_alive_cell,
    is_valid_cell, neighbor_coordinates, toggle_cell,
};
pub use region::{extract_region, import_region};
pub use seeding::seed_random;
pub use stepping::{
    advance_generation, compute_reachable_set, is_stale_state, will_live_next_generation,
    Generation,
};
pub use visuals::{instance_layout, instance_origin, visual_updates, CellUpdate};
