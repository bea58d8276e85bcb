//! C FFI layer for host engine integration.
//!
//! This module exports C ABI functions for the host's native plugin layer.
//! All functions are marked with `#[no_mangle]` and use `extern "C"`.
//!
//! The actual logic is in the `automaton` module. These functions are thin wrappers
//! that handle null checks, pointer safety, and C-to-Rust conversions.

pub mod driver;
pub mod grid;
pub mod lifecycle;
pub mod region;
pub mod stepping;

pub use driver::{
    gl_create_driver, gl_create_driver_from_config, gl_destroy_driver, gl_driver_instance_layout,
    gl_driver_is_active, gl_driver_start, gl_driver_state, gl_driver_stop, gl_driver_tick,
};
pub use grid::{
    gl_alive_count, gl_cell_from_index, gl_cell_index, gl_clear, gl_count_live_neighbors,
    gl_init_grid, gl_is_alive_cell, gl_is_valid_cell, gl_set_toggle_policy, gl_toggle_cell,
};
pub use lifecycle::{gl_create, gl_create_from_config, gl_destroy, gl_get_generation};
pub use region::{gl_extract_region, gl_import_region, gl_seed_random};
pub use stepping::{gl_advance, gl_export_alive, gl_instance_layout, gl_refresh_all, GlCellUpdate};
