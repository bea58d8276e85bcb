//! Generation stepping with B3/S23 rules over the reachable set.

use std::collections::HashSet;

use rayon::prelude::*;

use super::grid::{count_live_neighbors, is_alive_cell, is_valid_cell, neighbors_iter};
use crate::state::{Coord, LifeState};

/// Outcome of a single `advance_generation` call.
///
/// All sets are owned copies, independent of the engine state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generation {
    /// The alive set after the step.
    pub alive: HashSet<Coord>,
    /// Every evaluated cell. Conservatively includes cells that did not flip.
    pub changed: HashSet<Coord>,
    /// True when the step produced exactly the previous alive set.
    pub converged: bool,
    /// Generation number after the step.
    pub generation: u64,
}

/// Decide whether a cell is alive in the next generation.
///
/// B3/S23 rules:
/// - Birth: A dead cell with exactly 3 neighbours becomes alive
/// - Survival: An alive cell with 2 or 3 neighbours survives
/// - Cells outside the grid are never alive in the next generation
pub fn will_live_next_generation(state: &LifeState, c: Coord) -> bool {
    if !is_valid_cell(state, c) {
        return false;
    }

    let neighbors = count_live_neighbors(state, c);
    if is_alive_cell(state, c) {
        neighbors == 2 || neighbors == 3
    } else {
        neighbors == 3
    }
}

/// Cells whose liveness can change next generation: every alive cell plus
/// every valid neighbour of an alive cell.
pub fn compute_reachable_set(state: &LifeState) -> HashSet<Coord> {
    let mut reachable = state.alive.clone();
    for &cell in &state.alive {
        reachable.extend(neighbors_iter(state, cell));
    }
    reachable
}

/// True if `next` is exactly the current alive set.
#[inline]
pub fn is_stale_state(state: &LifeState, next: &HashSet<Coord>) -> bool {
    *next == state.alive
}

/// Step the simulation forward by one generation.
///
/// Only the reachable set is evaluated. Large reachable sets are evaluated
/// through rayon on the current thread pool; the result does not depend on it.
pub fn advance_generation(state: &mut LifeState) -> Generation {
    let reachable = compute_reachable_set(state);

    let next: HashSet<Coord> = {
        let view: &LifeState = state;
        if reachable.len() >= view.parallel_threshold {
            reachable
                .par_iter()
                .copied()
                .filter(|&c| will_live_next_generation(view, c))
                .collect()
        } else {
            reachable
                .iter()
                .copied()
                .filter(|&c| will_live_next_generation(view, c))
                .collect()
        }
    };

    let converged = is_stale_state(state, &next);
    state.alive = next;
    state.generation += 1;

    tracing::debug!(
        generation = state.generation,
        reachable = reachable.len(),
        alive = state.alive.len(),
        converged,
        "advanced generation"
    );

    Generation {
        alive: state.alive.clone(),
        changed: reachable,
        converged,
        generation: state.generation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::grid::neighbor_coordinates;

    fn coords(list: &[(i32, i32)]) -> HashSet<Coord> {
        list.iter().map(|&p| Coord::from(p)).collect()
    }

    fn seeded(width: i32, height: i32, cells: &[(i32, i32)]) -> LifeState {
        let mut state = LifeState::new(width, height);
        state.alive = coords(cells);
        state
    }

    #[test]
    fn test_will_live_rules() {
        // Row of three: middle survives with 2, ends die with 1
        let state = seeded(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        assert!(will_live_next_generation(&state, Coord::new(2, 2)));
        assert!(!will_live_next_generation(&state, Coord::new(1, 2)));
        assert!(!will_live_next_generation(&state, Coord::new(3, 2)));

        // Dead cells with 3 neighbours are born
        assert!(will_live_next_generation(&state, Coord::new(2, 1)));
        assert!(will_live_next_generation(&state, Coord::new(2, 3)));

        // Dead cells with 2 neighbours stay dead
        assert!(!will_live_next_generation(&state, Coord::new(1, 1)));
    }

    #[test]
    fn test_overcrowding() {
        // Center has 4 live neighbours and dies
        let state = seeded(5, 5, &[(2, 2), (1, 1), (3, 1), (1, 3), (3, 3)]);
        assert_eq!(count_live_neighbors(&state, Coord::new(2, 2)), 4);
        assert!(!will_live_next_generation(&state, Coord::new(2, 2)));
    }

    #[test]
    fn test_invalid_cell_never_lives() {
        // (-1, 1) would have 3 live neighbours if the grid extended
        let state = seeded(5, 5, &[(0, 0), (0, 1), (0, 2)]);
        assert!(!will_live_next_generation(&state, Coord::new(-1, 1)));
    }

    #[test]
    fn test_reachable_set_bounds() {
        let state = seeded(6, 6, &[(0, 0), (3, 3), (5, 4)]);
        let reachable = compute_reachable_set(&state);

        let mut upper = state.alive.clone();
        for &c in &state.alive {
            upper.extend(neighbor_coordinates(&state, c));
        }

        assert!(state.alive.is_subset(&reachable));
        assert!(reachable.is_subset(&upper));
        assert_eq!(reachable, upper);
    }

    #[test]
    fn test_reachable_set_keeps_out_of_bounds_alive() {
        let state = seeded(4, 4, &[(9, 9)]);
        assert_eq!(compute_reachable_set(&state), coords(&[(9, 9)]));
    }

    #[test]
    fn test_blinker_oscillates() {
        let vertical = coords(&[(2, 1), (2, 2), (2, 3)]);
        let horizontal = coords(&[(1, 2), (2, 2), (3, 2)]);
        let mut state = seeded(5, 5, &[(2, 1), (2, 2), (2, 3)]);

        let first = advance_generation(&mut state);
        assert_eq!(state.alive, horizontal);
        assert_eq!(first.alive, horizontal);
        assert!(!first.converged);
        assert_eq!(first.generation, 1);

        let second = advance_generation(&mut state);
        assert_eq!(state.alive, vertical);
        assert!(!second.converged);
        assert_eq!(state.generation, 2);
    }

    #[test]
    fn test_block_is_still_life() {
        let block = coords(&[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let mut state = seeded(4, 4, &[(1, 1), (1, 2), (2, 1), (2, 2)]);

        let result = advance_generation(&mut state);
        assert_eq!(state.alive, block);
        assert!(result.converged);
    }

    #[test]
    fn test_extinction_then_converged() {
        let mut state = seeded(5, 5, &[(2, 2)]);

        let first = advance_generation(&mut state);
        assert!(state.alive.is_empty());
        assert!(!first.converged);
        assert_eq!(first.changed.len(), 9);

        let second = advance_generation(&mut state);
        assert!(second.converged);
        assert!(second.changed.is_empty());
    }

    #[test]
    fn test_changed_covers_every_flip() {
        let mut state = seeded(8, 8, &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);
        for _ in 0..6 {
            let before = state.alive.clone();
            let result = advance_generation(&mut state);
            let flipped: HashSet<Coord> =
                before.symmetric_difference(&state.alive).copied().collect();
            assert!(flipped.is_subset(&result.changed));
        }
    }

    #[test]
    fn test_out_of_bounds_alive_cell_is_dropped() {
        let mut state = seeded(4, 4, &[(1, 1), (1, 2), (2, 1), (2, 2), (-5, 0)]);
        let result = advance_generation(&mut state);
        assert!(!state.alive.contains(&Coord::new(-5, 0)));
        assert!(!result.converged);
    }

    #[test]
    fn test_degenerate_grid_converges() {
        let mut state = LifeState::new(0, 0);
        let result = advance_generation(&mut state);
        assert!(result.converged);
        assert!(result.changed.is_empty());
    }

    #[test]
    fn test_parallel_matches_serial() {
        let cells: Vec<(i32, i32)> = (0..40)
            .flat_map(|x| (0..40).map(move |y| (x, y)))
            .filter(|&(x, y)| (x * 7 + y * 13) % 5 < 2)
            .collect();

        let mut serial = seeded(40, 40, &cells);
        serial.parallel_threshold = usize::MAX;
        let mut parallel = seeded(40, 40, &cells);
        parallel.parallel_threshold = 0;

        for _ in 0..5 {
            let a = advance_generation(&mut serial);
            let b = advance_generation(&mut parallel);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_is_stale_state() {
        let state = seeded(4, 4, &[(1, 1)]);
        assert!(is_stale_state(&state, &coords(&[(1, 1)])));
        assert!(!is_stale_state(&state, &coords(&[(1, 1), (2, 2)])));
        assert!(!is_stale_state(&state, &HashSet::new()));
    }
}
