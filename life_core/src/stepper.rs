// stepper.rs - Generational transition strategies

use log::debug;

use crate::error::Result;
use crate::grid::{Coord, GridState, TGrid, TRow};
use crate::neighbors::surrounding_live_count;
use crate::rule::needs_toggle;
use crate::sparse::SparseStepper;

pub(crate) mod sealed {
    /// Write access to the generation counter, kept out of the public API.
    pub trait Counter {
        fn set_generation(&mut self, generation: u64);
    }
}

use sealed::Counter;

/// A grid plus a way of advancing it one generation.
///
/// Implementations differ only in which cells they look at; the rule and the
/// collect-then-apply discipline are shared, so all of them must produce the
/// same grids.
///
/// The generation counter is read-only from outside the crate:
///
/// ```compile_fail
/// use life_core::{NaiveStepper, Stepper};
///
/// let mut engine = NaiveStepper::new(3, 3).unwrap();
/// engine.set_generation(42);
/// ```
pub trait Stepper: Counter {
    /// Underlying storage, read-only.
    fn grid_state(&self) -> &GridState;

    /// Flips one cell. The only way a caller edits the grid.
    fn toggle_cell(&mut self, x: i64, y: i64) -> Result<()>;

    /// Advances one generation.
    fn update_state(&mut self) -> Result<()>;

    /// Generations advanced since construction or the last `clear`.
    fn generation(&self) -> u64;

    fn algorithm(&self) -> Algorithm;

    fn width(&self) -> usize {
        self.grid_state().width()
    }

    fn height(&self) -> usize {
        self.grid_state().height()
    }

    /// Detached copy of the current matrix.
    fn grid(&self) -> TGrid {
        self.grid_state().grid()
    }

    fn is_alive(&self, x: i64, y: i64) -> Result<bool> {
        self.grid_state().is_alive(x, y)
    }

    fn live_count(&self) -> usize {
        self.grid_state().live_count()
    }

    /// Kills every live cell, one toggle at a time, and resets the counter.
    fn clear(&mut self) -> Result<()> {
        let live: Vec<Coord> = self.grid_state().live_cells().collect();
        for (x, y) in live {
            self.toggle_cell(x as i64, y as i64)?;
        }
        self.set_generation(0);
        Ok(())
    }

    /// Runs `n` consecutive generations.
    fn step_n(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.update_state()?;
        }
        Ok(())
    }
}

/// Evaluates every candidate against the same snapshot and returns the cells
/// that must flip. Nothing is written here.
pub(crate) fn collect_toggles<I>(cells: &[TRow], candidates: I) -> Result<Vec<Coord>>
where
    I: IntoIterator<Item = Coord>,
{
    let mut toggles = Vec::new();
    for (x, y) in candidates {
        let count = surrounding_live_count(cells, x, y)?;
        if needs_toggle(cells[y][x], count) {
            toggles.push((x, y));
        }
    }
    Ok(toggles)
}

/// Full-scan stepper: evaluates all `width * height` cells every generation.
#[derive(Debug, Clone)]
pub struct NaiveStepper {
    grid: GridState,
    generation: u64,
}

impl NaiveStepper {
    pub fn new(width: i64, height: i64) -> Result<Self> {
        Ok(Self {
            grid: GridState::new(width, height)?,
            generation: 0,
        })
    }
}

impl Stepper for NaiveStepper {
    fn grid_state(&self) -> &GridState {
        &self.grid
    }

    fn toggle_cell(&mut self, x: i64, y: i64) -> Result<()> {
        self.grid.toggle_cell(x, y)
    }

    fn update_state(&mut self) -> Result<()> {
        let (width, height) = (self.grid.width(), self.grid.height());
        let all = (0..height).flat_map(|y| (0..width).map(move |x| (x, y)));
        let toggles = collect_toggles(self.grid.cells(), all)?;

        for &coord in &toggles {
            self.grid.toggle(coord)?;
        }
        self.generation += 1;
        debug!(
            "naive generation {}: {} flips, {} live",
            self.generation,
            toggles.len(),
            self.grid.live_count()
        );
        Ok(())
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Naive
    }
}

impl Counter for NaiveStepper {
    fn set_generation(&mut self, generation: u64) {
        self.generation = generation;
    }
}

/// Which stepping strategy to run. Chosen by the caller at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    Naive,
    #[default]
    Sparse,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Naive, Algorithm::Sparse];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Naive => "Naive",
            Algorithm::Sparse => "Sparse",
        }
    }

    /// Case-insensitive lookup by [`Algorithm::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Fresh all-dead engine of this kind.
    pub fn build(self, width: i64, height: i64) -> Result<Box<dyn Stepper>> {
        Ok(match self {
            Algorithm::Naive => Box::new(NaiveStepper::new(width, height)?),
            Algorithm::Sparse => Box::new(SparseStepper::new(width, height)?),
        })
    }

    /// Engine of this kind holding the same live cells as `from`.
    /// The generation counter carries over.
    pub fn rebuild(self, from: &dyn Stepper) -> Result<Box<dyn Stepper>> {
        let state = from.grid_state();
        let mut engine = self.build(state.width() as i64, state.height() as i64)?;
        for (x, y) in state.live_cells() {
            engine.toggle_cell(x as i64, y as i64)?;
        }
        engine.set_generation(from.generation());
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(cells: &[(i64, i64)], width: i64, height: i64) -> NaiveStepper {
        let mut engine = NaiveStepper::new(width, height).unwrap();
        for &(x, y) in cells {
            engine.toggle_cell(x, y).unwrap();
        }
        engine
    }

    #[test]
    fn lonely_cell_dies() {
        let mut engine = seeded(&[(1, 1)], 3, 3);
        engine.update_state().unwrap();
        assert_eq!(engine.live_count(), 0);
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn corner_birth_uses_clipped_count() {
        // (0,0) has exactly three live neighbours inside the grid.
        let mut engine = seeded(&[(1, 0), (0, 1), (1, 1)], 2, 2);
        engine.update_state().unwrap();
        assert_eq!(engine.grid(), vec![vec![true, true], vec![true, true]]);
    }

    #[test]
    fn updates_are_simultaneous() {
        // A sequential in-place scan would birth (1,0) early and change the
        // counts seen by later cells of the blinker.
        let mut engine = seeded(&[(0, 1), (1, 1), (2, 1)], 3, 3);
        engine.update_state().unwrap();
        let live: Vec<Coord> = engine.grid_state().live_cells().collect();
        assert_eq!(live, vec![(1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn clear_resets_everything() {
        let mut engine = seeded(&[(0, 0), (1, 1)], 3, 3);
        engine.step_n(2).unwrap();
        engine.toggle_cell(2, 2).unwrap();
        engine.clear().unwrap();
        assert_eq!(engine.live_count(), 0);
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn algorithm_names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(Algorithm::from_name(algorithm.name()), Some(algorithm));
        }
        assert_eq!(Algorithm::from_name(" naive "), Some(Algorithm::Naive));
        assert_eq!(Algorithm::from_name("hashlife"), None);
    }

    #[test]
    fn rebuild_keeps_cells_and_generation() {
        let mut engine = seeded(&[(1, 0), (1, 1), (1, 2)], 4, 4);
        engine.update_state().unwrap();
        let sparse = Algorithm::Sparse.rebuild(&engine).unwrap();
        assert_eq!(sparse.algorithm(), Algorithm::Sparse);
        assert_eq!(sparse.grid(), engine.grid());
        assert_eq!(sparse.generation(), 1);
    }
}
