// patterns.rs - Built-in structures and grid seeding

use std::borrow::Cow;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use life_core::{Result, Stepper};
use log::{debug, info};
use thiserror::Error;

/// Named structure as `(x, y)` offsets from its top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub name: Cow<'static, str>,
    pub cells: Cow<'static, [(i64, i64)]>,
}

const fn builtin(name: &'static str, cells: &'static [(i64, i64)]) -> Pattern {
    Pattern {
        name: Cow::Borrowed(name),
        cells: Cow::Borrowed(cells),
    }
}

impl Pattern {
    /// Captures the live cells of `engine`, shifted so the bounding box
    /// starts at `(0, 0)`. `None` when the board is empty.
    pub fn from_board(name: &str, engine: &dyn Stepper) -> Option<Self> {
        let live: Vec<(i64, i64)> = engine
            .grid_state()
            .live_cells()
            .map(|(x, y)| (x as i64, y as i64))
            .collect();
        let min_x = live.iter().map(|&(x, _)| x).min()?;
        let min_y = live.iter().map(|&(_, y)| y).min()?;
        Some(Self {
            name: Cow::Owned(name.to_string()),
            cells: live.into_iter().map(|(x, y)| (x - min_x, y - min_y)).collect(),
        })
    }

    /// Bounding box `(width, height)`; `(0, 0)` for an empty pattern.
    pub fn dimensions(&self) -> (i64, i64) {
        if self.cells.is_empty() {
            return (0, 0);
        }
        let width = self.cells.iter().map(|&(x, _)| x).max().unwrap_or(0);
        let height = self.cells.iter().map(|&(_, y)| y).max().unwrap_or(0);
        (width + 1, height + 1)
    }
}

pub const PATTERNS: &[Pattern] = &[
    builtin("Glider", &[(2, 0), (0, 1), (2, 1), (1, 2), (2, 2)]),
    builtin("Blinker", &[(0, 0), (1, 0), (2, 0)]),
    builtin("Block", &[(0, 0), (1, 0), (0, 1), (1, 1)]),
    builtin("Toad", &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)]),
    builtin("Beacon", &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)]),
    builtin(
        "Pulsar",
        &[
            // Top half
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            // Bottom half (mirrored)
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    ),
    builtin("R-pentomino", &[(2, 0), (1, 1), (2, 1), (0, 2), (1, 2)]),
    builtin(
        "Lightweight Ship",
        &[
            (1, 0), (4, 0),
            (0, 1),
            (0, 2), (4, 2),
            (0, 3), (1, 3), (2, 3), (3, 3),
        ],
    ),
    builtin(
        "Copperhead Ship",
        &[
            (1, 0), (2, 0), (5, 0), (6, 0),
            (3, 1), (4, 1),
            (3, 2), (4, 2),
            (0, 3), (2, 3), (5, 3), (7, 3),
            (0, 4), (7, 4),
            (0, 6), (7, 6),
            (1, 7), (2, 7), (5, 7), (6, 7),
            (2, 8), (3, 8), (4, 8), (5, 8),
            (3, 10), (4, 10),
            (3, 11), (4, 11),
        ],
    ),
    builtin(
        "Glider Gun",
        &[
            (24, 0),
            (22, 1), (24, 1),
            (12, 2), (13, 2), (20, 2), (21, 2), (34, 2), (35, 2),
            (11, 3), (15, 3), (20, 3), (21, 3), (34, 3), (35, 3),
            (0, 4), (1, 4), (10, 4), (16, 4), (20, 4), (21, 4),
            (0, 5), (1, 5), (10, 5), (14, 5), (16, 5), (17, 5), (22, 5), (24, 5),
            (10, 6), (16, 6), (24, 6),
            (11, 7), (15, 7),
            (12, 8), (13, 8),
        ],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    #[error("structure name cannot be empty")]
    EmptyName,
    #[error("structure {0:?} already exists")]
    DuplicateName(String),
    #[error("no structure named {0:?}")]
    UnknownName(String),
    #[error("the board has no live cells to capture")]
    EmptyBoard,
}

/// Session-local list of structures: the built-ins plus anything captured
/// from the board. Nothing is written to disk.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    patterns: Vec<Pattern>,
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self {
            patterns: PATTERNS.to_vec(),
        }
    }
}

impl PatternLibrary {
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn get(&self, index: usize) -> Option<&Pattern> {
        self.patterns.get(index)
    }

    /// Adds the live cells of `engine` under `name` and returns its index.
    pub fn capture(&mut self, name: &str, engine: &dyn Stepper) -> std::result::Result<usize, LibraryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::EmptyName);
        }
        if self.patterns.iter().any(|p| p.name == name) {
            return Err(LibraryError::DuplicateName(name.to_string()));
        }
        let pattern = Pattern::from_board(name, engine).ok_or(LibraryError::EmptyBoard)?;
        info!("added structure {} ({} cells)", name, pattern.cells.len());
        self.patterns.push(pattern);
        Ok(self.patterns.len() - 1)
    }

    pub fn remove(&mut self, name: &str) -> std::result::Result<Pattern, LibraryError> {
        let index = self
            .patterns
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| LibraryError::UnknownName(name.to_string()))?;
        info!("removed structure {}", name);
        Ok(self.patterns.remove(index))
    }
}

/// Clears the grid and toggles `pattern` in around the centre.
///
/// Cells that land outside a grid too small for the pattern are dropped.
/// Returns how many cells were placed.
pub fn place_centered(engine: &mut dyn Stepper, pattern: &Pattern) -> Result<usize> {
    engine.clear()?;

    let (w, h) = pattern.dimensions();
    let x_offset = engine.width() as i64 / 2 - w / 2;
    let y_offset = engine.height() as i64 / 2 - h / 2;

    let mut placed = 0;
    for &(dx, dy) in pattern.cells.iter() {
        let (x, y) = (dx + x_offset, dy + y_offset);
        if x < 0 || y < 0 || x >= engine.width() as i64 || y >= engine.height() as i64 {
            debug!("{}: ({}, {}) falls outside the grid", pattern.name, x, y);
            continue;
        }
        engine.toggle_cell(x, y)?;
        placed += 1;
    }
    info!(
        "placed {} ({}/{} cells) at offset ({}, {})",
        pattern.name,
        placed,
        pattern.cells.len(),
        x_offset,
        y_offset
    );
    Ok(placed)
}

/// Clears the grid and fills roughly a third of it from `seed_value`.
pub fn apply_random_pattern(engine: &mut dyn Stepper, seed_value: u32) -> Result<()> {
    engine.clear()?;

    // Simple pseudo-random generator
    let mut hasher = DefaultHasher::new();
    seed_value.hash(&mut hasher);
    let mut seed = hasher.finish();

    for y in 0..engine.height() as i64 {
        for x in 0..engine.width() as i64 {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            if seed % 3 == 0 {
                engine.toggle_cell(x, y)?;
            }
        }
    }
    info!("random fill from seed {}: {} live", seed_value, engine.live_count());
    Ok(())
}
