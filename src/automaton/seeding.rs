//! Deterministic random seeding.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::state::{Coord, LifeState};

/// Replace the alive set with a random soup over the whole grid.
///
/// Each in-bounds cell is alive with probability `fill_rate` (clamped to
/// `[0, 1]`). The same seed always produces the same soup.
pub fn seed_random(state: &mut LifeState, fill_rate: f64, seed: u64) {
    let fill_rate = if fill_rate.is_nan() {
        0.0
    } else {
        fill_rate.clamp(0.0, 1.0)
    };
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    state.alive.clear();
    // Walk in index order so the soup does not depend on hash iteration order.
    for x in 0..state.dimensions.width.max(0) {
        for y in 0..state.dimensions.height.max(0) {
            if rng.gen_bool(fill_rate) {
                state.alive.insert(Coord::new(x, y));
            }
        }
    }

    tracing::debug!(
        "seeded {} alive cells (fill rate {}, seed {})",
        state.alive.len(),
        fill_rate,
        seed
    );
}
