//! Core state structure and helper methods.

use std::collections::HashSet;

use crate::automaton::grid::initialize;
use crate::config::LifeConfig;

/// A grid cell coordinate. No inherent bounds; validity depends on the grid.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Coord { x, y }
    }
}

/// Grid size. Valid coordinates are `[0, width) x [0, height)`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: i32,
    pub height: i32,
}

impl Dimensions {
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Dimensions { width, height }
    }

    /// Number of addressable cells; 0 for degenerate grids.
    pub fn cell_count(&self) -> usize {
        if self.width <= 0 || self.height <= 0 {
            return 0;
        }
        self.width as usize * self.height as usize
    }
}

/// How `toggle_cell` treats coordinates outside the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TogglePolicy {
    /// Any coordinate can be toggled, in or out of bounds.
    #[default]
    Permissive,
    /// Out-of-bounds toggles are rejected with `LifeError::OutOfBounds`.
    Strict,
}

/// Reachable sets at least this large are evaluated through rayon.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// The internal state of a life simulation.
pub struct LifeState {
    pub dimensions: Dimensions,
    /// Every currently alive cell. This is the whole simulation state.
    pub alive: HashSet<Coord>,
    /// Every in-bounds cell, rebuilt by `initialize`.
    pub all_cells: HashSet<Coord>,
    pub generation: u64,
    pub toggle_policy: TogglePolicy,
    pub parallel_threshold: usize,
}

impl LifeState {
    /// Create an initialized, empty grid.
    pub fn new(width: i32, height: i32) -> Self {
        let mut state = LifeState {
            dimensions: Dimensions::default(),
            alive: HashSet::new(),
            all_cells: HashSet::new(),
            generation: 0,
            toggle_policy: TogglePolicy::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        };
        initialize(&mut state, Dimensions::new(width, height));
        state
    }

    /// Create a grid from the `[grid]` and `[simulation]` config sections.
    pub fn from_config(config: &LifeConfig) -> Self {
        let mut state = LifeState::new(config.grid.width, config.grid.height);
        state.toggle_policy = config.simulation.toggle_policy;
        state.parallel_threshold = config.simulation.parallel_threshold;
        state
    }

    /// Number of alive cells.
    #[inline]
    pub fn alive_count(&self) -> usize {
        self.alive.len()
    }

    /// Independent copy of the alive set.
    pub fn alive_cells(&self) -> HashSet<Coord> {
        self.alive.clone()
    }

    /// Kill every cell without touching dimensions or the generation counter.
    pub fn clear(&mut self) {
        self.alive.clear();
    }
}
