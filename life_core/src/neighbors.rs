// neighbors.rs - Clipped Moore-neighbourhood counting

use crate::error::{LifeError, Result};
use crate::grid::TRow;

/// Live cells among the up-to-8 neighbours of `(x, y)`.
///
/// Positions beyond the edges count as dead; there is no wrap-around, so
/// edge cells see 5 neighbours and corner cells see 3.
pub fn surrounding_live_count(grid: &[TRow], x: usize, y: usize) -> Result<u8> {
    let height = grid.len();
    let width = grid.first().map_or(0, |row| row.len());
    if x >= width || y >= height {
        return Err(LifeError::OutOfRange {
            x: x as i64,
            y: y as i64,
            width,
            height,
        });
    }

    let mut count = 0;
    for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
        for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
            if (nx, ny) == (x, y) {
                continue;
            }
            // Rows shorter than the first one are malformed input, not dead space.
            let alive = grid[ny].get(nx).copied().ok_or(LifeError::OutOfRange {
                x: nx as i64,
                y: ny as i64,
                width: grid[ny].len(),
                height,
            })?;
            if alive {
                count += 1;
            }
        }
    }
    Ok(count)
}

/// Coordinates of the clipped 3x3 block centred on `(x, y)`, centre included.
pub(crate) fn block(width: usize, height: usize, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
    let xs = x.saturating_sub(1)..=(x + 1).min(width - 1);
    (y.saturating_sub(1)..=(y + 1).min(height - 1))
        .flat_map(move |ny| xs.clone().map(move |nx| (nx, ny)))
}
