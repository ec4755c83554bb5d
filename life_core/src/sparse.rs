// sparse.rs - Stepper that only looks near live cells

use std::collections::HashSet;

use log::debug;

use crate::error::Result;
use crate::grid::{Coord, GridState};
use crate::neighbors::block;
use crate::stepper::sealed::Counter;
use crate::stepper::{collect_toggles, Algorithm, Stepper};

/// Keeps an index of live cells next to the grid and, each generation,
/// evaluates only the clipped 3x3 blocks around them. A cell with no live
/// cell within one step cannot change, so the result matches a full scan.
#[derive(Debug, Clone)]
pub struct SparseStepper {
    grid: GridState,
    live: HashSet<Coord>,
    generation: u64,
}

impl SparseStepper {
    pub fn new(width: i64, height: i64) -> Result<Self> {
        Ok(Self {
            grid: GridState::new(width, height)?,
            live: HashSet::new(),
            generation: 0,
        })
    }

    /// Live-cell index. Always equal to the set of live cells in the grid.
    pub fn live_set(&self) -> &HashSet<Coord> {
        &self.live
    }

    /// Cells that may change this generation: every live cell and its
    /// in-bounds neighbours, each once.
    pub fn candidates(&self) -> HashSet<Coord> {
        let (width, height) = (self.grid.width(), self.grid.height());
        self.live
            .iter()
            .flat_map(|&(x, y)| block(width, height, x, y))
            .collect()
    }

    /// Grid flip and index update in one step; fails without touching either.
    fn flip(&mut self, coord: Coord) -> Result<()> {
        self.grid.toggle(coord)?;
        if !self.live.remove(&coord) {
            self.live.insert(coord);
        }
        Ok(())
    }
}

impl Stepper for SparseStepper {
    fn grid_state(&self) -> &GridState {
        &self.grid
    }

    fn toggle_cell(&mut self, x: i64, y: i64) -> Result<()> {
        let coord = self.grid.coord(x, y)?;
        self.flip(coord)
    }

    fn update_state(&mut self) -> Result<()> {
        let candidates = self.candidates();
        let toggles = collect_toggles(self.grid.cells(), candidates.iter().copied())?;

        for &coord in &toggles {
            self.flip(coord)?;
        }
        self.generation += 1;
        debug!(
            "sparse generation {}: {} candidates, {} flips, {} live",
            self.generation,
            candidates.len(),
            toggles.len(),
            self.live.len()
        );
        Ok(())
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Sparse
    }

    fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl Counter for SparseStepper {
    fn set_generation(&mut self, generation: u64) {
        self.generation = generation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_matches_grid(engine: &SparseStepper) -> bool {
        let from_grid: HashSet<Coord> = engine.grid_state().live_cells().collect();
        &from_grid == engine.live_set()
    }

    #[test]
    fn toggles_keep_index_in_sync() {
        let mut engine = SparseStepper::new(4, 4).unwrap();
        engine.toggle_cell(1, 2).unwrap();
        engine.toggle_cell(3, 3).unwrap();
        assert!(engine.live_set().contains(&(1, 2)));
        engine.toggle_cell(1, 2).unwrap();
        assert!(!engine.live_set().contains(&(1, 2)));
        assert!(index_matches_grid(&engine));
        assert_eq!(engine.live_count(), 1);
    }

    #[test]
    fn rejected_toggle_leaves_index_alone() {
        let mut engine = SparseStepper::new(2, 2).unwrap();
        assert!(engine.toggle_cell(2, 0).is_err());
        assert!(engine.toggle_cell(0, -1).is_err());
        assert!(engine.live_set().is_empty());
    }

    #[test]
    fn candidates_cover_clipped_neighbourhoods() {
        let mut engine = SparseStepper::new(5, 5).unwrap();
        engine.toggle_cell(0, 0).unwrap();
        engine.toggle_cell(1, 0).unwrap();
        let candidates = engine.candidates();
        // Union of the two clipped blocks: columns 0..=2, rows 0..=1.
        assert_eq!(candidates.len(), 6);
        assert!(candidates.iter().all(|&(x, y)| x <= 2 && y <= 1));
    }

    #[test]
    fn empty_grid_has_no_candidates() {
        let mut engine = SparseStepper::new(3, 3).unwrap();
        assert!(engine.candidates().is_empty());
        engine.update_state().unwrap();
        assert_eq!(engine.generation(), 1);
        assert_eq!(engine.live_count(), 0);
    }

    #[test]
    fn index_survives_generations_and_clear() {
        let mut engine = SparseStepper::new(6, 6).unwrap();
        for (x, y) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
            engine.toggle_cell(x, y).unwrap();
        }
        for _ in 0..12 {
            engine.update_state().unwrap();
            assert!(index_matches_grid(&engine));
        }
        engine.clear().unwrap();
        assert!(engine.live_set().is_empty());
        assert_eq!(engine.grid_state().live_count(), 0);
    }
}
