// grid.rs - Grid storage for Conway's Game of Life

use std::fmt;

use log::{debug, trace};

use crate::error::{LifeError, Result};

pub type TRow = Vec<bool>;
pub type TGrid = Vec<TRow>; // Row-major: grid[y][x]

/// Cell coordinate as `(x, y)`, already known to be inside the grid.
pub type Coord = (usize, usize);

/// Fixed-size boolean matrix. Every write goes through [`GridState::toggle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    cells: TGrid,
    width: usize,
    height: usize,
}

impl GridState {
    /// Allocates an all-dead `width` x `height` grid.
    ///
    /// Fails with [`LifeError::InvalidDimension`] if either side is `<= 0`
    /// or the grid cannot be addressed or allocated on this target.
    pub fn new(width: i64, height: i64) -> Result<Self> {
        let invalid = || LifeError::InvalidDimension { width, height };
        if width <= 0 || height <= 0 {
            return Err(invalid());
        }
        let w = usize::try_from(width).map_err(|_| invalid())?;
        let h = usize::try_from(height).map_err(|_| invalid())?;
        w.checked_mul(h)
            .filter(|&total| total <= isize::MAX as usize)
            .ok_or_else(invalid)?;

        debug!("allocating {}x{} grid", w, h);
        let mut cells = TGrid::new();
        cells.try_reserve_exact(h).map_err(|_| invalid())?;
        for _ in 0..h {
            let mut row = TRow::new();
            row.try_reserve_exact(w).map_err(|_| invalid())?;
            row.resize(w, false);
            cells.push(row);
        }
        Ok(Self {
            cells,
            width: w,
            height: h,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Independent copy of the matrix; edits to it never reach the engine.
    pub fn grid(&self) -> TGrid {
        self.cells.clone()
    }

    /// Borrowed view for read-only hot loops inside the crate.
    pub(crate) fn cells(&self) -> &TGrid {
        &self.cells
    }

    /// Validates a signed coordinate and converts it to a [`Coord`].
    pub fn coord(&self, x: i64, y: i64) -> Result<Coord> {
        if x < 0 || y < 0 || x as u64 >= self.width as u64 || y as u64 >= self.height as u64 {
            return Err(LifeError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((x as usize, y as usize))
    }

    fn check(&self, (x, y): Coord) -> Result<Coord> {
        if x >= self.width || y >= self.height {
            return Err(LifeError::OutOfRange {
                x: x as i64,
                y: y as i64,
                width: self.width,
                height: self.height,
            });
        }
        Ok((x, y))
    }

    pub fn is_alive(&self, x: i64, y: i64) -> Result<bool> {
        let (x, y) = self.coord(x, y)?;
        Ok(self.cells[y][x])
    }

    /// Flips the cell at `(x, y)`.
    pub fn toggle_cell(&mut self, x: i64, y: i64) -> Result<()> {
        let coord = self.coord(x, y)?;
        self.toggle(coord)
    }

    /// Flips one cell and returns nothing else. The only write path.
    pub fn toggle(&mut self, coord: Coord) -> Result<()> {
        let (x, y) = self.check(coord)?;
        self.cells[y][x] = !self.cells[y][x];
        trace!("toggled ({}, {}) -> {}", x, y, self.cells[y][x]);
        Ok(())
    }

    /// Live coordinates in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &alive)| alive)
                .map(move |(x, _)| (x, y))
        })
    }

    pub fn live_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&alive| alive).count())
            .sum()
    }
}

impl fmt::Display for GridState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_dead() {
        let grid = GridState::new(4, 3).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        let cells = grid.grid();
        assert_eq!(cells.len(), 3);
        assert!(cells.iter().all(|row| row.len() == 4 && row.iter().all(|&c| !c)));
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        for (w, h) in [(0, 5), (5, 0), (-1, 5), (5, -3), (0, 0)] {
            assert_eq!(
                GridState::new(w, h),
                Err(LifeError::InvalidDimension { width: w, height: h })
            );
        }
    }

    #[test]
    fn rejects_unallocatable_dimensions() {
        for (w, h) in [(1 << 62, 1), (1, 1 << 62), (i64::MAX, i64::MAX), (1 << 40, 1 << 40)] {
            assert_eq!(
                GridState::new(w, h),
                Err(LifeError::InvalidDimension { width: w, height: h })
            );
        }
    }

    #[test]
    fn toggle_flips_only_the_target() {
        let mut grid = GridState::new(3, 2).unwrap();
        grid.toggle_cell(2, 1).unwrap();
        assert_eq!(grid.grid(), vec![vec![false, false, false], vec![false, false, true]]);
        grid.toggle_cell(2, 1).unwrap();
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn toggle_rejects_out_of_range() {
        let mut grid = GridState::new(3, 2).unwrap();
        for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 2), (i64::MAX, 0)] {
            assert!(matches!(
                grid.toggle_cell(x, y),
                Err(LifeError::OutOfRange { .. })
            ));
        }
        assert!(grid.toggle((3, 0)).is_err());
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn snapshot_is_detached() {
        let mut grid = GridState::new(2, 2).unwrap();
        let mut copy = grid.grid();
        copy[0][0] = true;
        assert!(!grid.is_alive(0, 0).unwrap());
        grid.toggle_cell(1, 1).unwrap();
        assert!(!copy[1][1]);
    }

    #[test]
    fn live_cells_are_row_major() {
        let mut grid = GridState::new(3, 3).unwrap();
        grid.toggle_cell(2, 0).unwrap();
        grid.toggle_cell(0, 2).unwrap();
        grid.toggle_cell(1, 0).unwrap();
        let live: Vec<Coord> = grid.live_cells().collect();
        assert_eq!(live, vec![(1, 0), (2, 0), (0, 2)]);
    }

    #[test]
    fn display_draws_rows() {
        let mut grid = GridState::new(3, 2).unwrap();
        grid.toggle_cell(0, 0).unwrap();
        grid.toggle_cell(2, 1).unwrap();
        assert_eq!(grid.to_string(), "#..\n..#\n");
    }
}
