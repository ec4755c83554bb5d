// lib.rs - Conway's Game of Life engine
//
// One bounded grid, one mutation path (`toggle_cell`), and two interchangeable
// stepping strategies that must agree cell for cell.

pub mod error;
pub mod grid;
pub mod neighbors;
pub mod rule;
pub mod stepper;
pub mod sparse;

pub use error::{LifeError, Result};
pub use grid::{Coord, GridState, TGrid, TRow};
pub use neighbors::surrounding_live_count;
pub use rule::{needs_toggle, next_state};
pub use sparse::SparseStepper;
pub use stepper::{Algorithm, NaiveStepper, Stepper};
