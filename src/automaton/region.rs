//! Region extraction and import operations.

use super::grid::is_valid_cell;
use crate::state::{Coord, LifeState};

/// Clamp a rectangle to grid bounds. Returns `None` for empty or inverted regions.
fn clamp_region(
    state: &LifeState,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
) -> Option<(i32, i32, i32, i32)> {
    let width = state.dimensions.width.max(0);
    let height = state.dimensions.height.max(0);

    let min_x = min_x.clamp(0, width);
    let min_y = min_y.clamp(0, height);
    let max_x = max_x.clamp(0, width);
    let max_y = max_y.clamp(0, height);

    if min_x >= max_x || min_y >= max_y {
        return None;
    }
    Some((min_x, min_y, max_x, max_y))
}

/// Extract a rectangular region of liveness into a flat buffer.
///
/// # Layout
/// The buffer is filled in x,y order (x changes slowest, y changes fastest),
/// the same order as instance indices. This order matches `import_region`.
///
/// # Returns
/// Number of bytes written to the buffer, or 0 on error.
pub fn extract_region(
    state: &LifeState,
    out_buf: &mut [u8],
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
) -> u64 {
    let Some((min_x, min_y, max_x, max_y)) = clamp_region(state, min_x, min_y, max_x, max_y)
    else {
        return 0;
    };

    let total_size = (max_x - min_x) as usize * (max_y - min_y) as usize;
    if out_buf.len() < total_size {
        return 0;
    }

    let mut offset = 0;
    for x in min_x..max_x {
        for y in min_y..max_y {
            out_buf[offset] = u8::from(state.alive.contains(&Coord::new(x, y)));
            offset += 1;
        }
    }

    offset as u64
}

/// Import a rectangular region of liveness from a flat buffer.
///
/// # Layout
/// The buffer is expected in x,y order (matching `extract_region`).
/// Input values are normalized: 0 = dead, any non-zero = alive.
///
/// # Returns
/// Number of bytes read from the buffer, or 0 on error.
pub fn import_region(
    state: &mut LifeState,
    in_buf: &[u8],
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
) -> u64 {
    let Some((min_x, min_y, max_x, max_y)) = clamp_region(state, min_x, min_y, max_x, max_y)
    else {
        return 0;
    };

    let total_size = (max_x - min_x) as usize * (max_y - min_y) as usize;
    if in_buf.len() < total_size {
        return 0;
    }

    let mut offset = 0;
    for x in min_x..max_x {
        for y in min_y..max_y {
            let c = Coord::new(x, y);
            debug_assert!(is_valid_cell(state, c));
            if in_buf[offset] != 0 {
                state.alive.insert(c);
            } else {
                state.alive.remove(&c);
            }
            offset += 1;
        }
    }

    tracing::debug!(
        "imported {}x{} region at ({}, {})",
        max_x - min_x,
        max_y - min_y,
        min_x,
        min_y
    );
    offset as u64
}
