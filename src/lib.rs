//! Grid Life - bounded Conway's Game of Life engine
//!
//! This library tracks the alive cells of a finite 2D grid and advances them
//! one generation at a time under B3/S23 rules, reporting which cells need a
//! visual refresh and whether the simulation reached a fixed point. The host
//! engine drives it through the C ABI in `ffi/` or the Rust API in `automaton/`.

pub mod automaton;
pub mod config;
pub mod error;
pub mod ffi;
pub mod state;

pub use automaton::{Generation, LifeDriver};
pub use config::LifeConfig;
pub use error::{LifeError, LifeResult};
pub use state::{Coord, Dimensions, LifeState, TogglePolicy};
