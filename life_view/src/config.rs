// config.rs - Viewer configuration

use std::time::Duration;

use egui::Color32;
use life_core::Algorithm;
use log::warn;

// Compile-time defaults
pub const DEFAULT_WIDTH: i64 = 50; // Grid width in cells
pub const DEFAULT_HEIGHT: i64 = 30; // Grid height in cells
pub const CELL_LENGTH: f32 = 15.0; // Pixels per cell side
pub const CANVAS_PADDING: f32 = 5.0; // Pixels between canvas edge and grid
pub const DEFAULT_TICK_MS: u64 = 500;
pub const MIN_TICK_MS: u64 = 10;
pub const MAX_TICK_MS: u64 = 1000;
pub const CYCLE_HISTORY: usize = 10; // Grid hashes remembered for cycle detection

// Environment overrides
pub const ENV_WIDTH: &str = "LIFE_WIDTH";
pub const ENV_HEIGHT: &str = "LIFE_HEIGHT";
pub const ENV_ALGORITHM: &str = "LIFE_ALGORITHM";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub dead: Color32,
    pub grid: Color32,
    pub live: Color32,
}

/// Colour scheme for the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    #[default]
    Light,
    Dark,
    NoGrid,
}

impl Style {
    pub const ALL: [Style; 3] = [Style::Light, Style::Dark, Style::NoGrid];

    pub fn name(self) -> &'static str {
        match self {
            Style::Light => "Light",
            Style::Dark => "Dark",
            Style::NoGrid => "No Grid",
        }
    }

    pub fn palette(self) -> Palette {
        let grey = Color32::from_gray(190);
        match self {
            Style::Light => Palette {
                dead: Color32::WHITE,
                grid: grey,
                live: Color32::from_rgb(238, 173, 14), // DarkGoldenrod2
            },
            Style::Dark => Palette {
                dead: Color32::BLACK,
                grid: grey,
                live: Color32::from_rgb(255, 192, 203), // pink
            },
            Style::NoGrid => Palette {
                dead: Color32::WHITE,
                grid: Color32::WHITE,
                live: Color32::BLACK,
            },
        }
    }
}

/// Startup settings for one simulation session.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub width: i64,
    pub height: i64,
    pub algorithm: Algorithm,
    pub tick: Duration,
    pub style: Style,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            algorithm: Algorithm::default(),
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            style: Style::default(),
        }
    }
}

impl ViewConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with any valid overrides from `lookup` applied.
    /// Unparseable or non-positive values are reported and skipped.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let dimension = |key: &str| -> Option<i64> {
            let raw = lookup(key)?;
            match raw.trim().parse::<i64>() {
                Ok(value) if value > 0 => Some(value),
                _ => {
                    warn!("ignoring {}={:?}: expected a positive integer", key, raw);
                    None
                }
            }
        };
        if let Some(width) = dimension(ENV_WIDTH) {
            config.width = width;
        }
        if let Some(height) = dimension(ENV_HEIGHT) {
            config.height = height;
        }

        if let Some(raw) = lookup(ENV_ALGORITHM) {
            match Algorithm::from_name(&raw) {
                Some(algorithm) => config.algorithm = algorithm,
                None => warn!("ignoring {}={:?}: expected naive or sparse", ENV_ALGORITHM, raw),
            }
        }
        config
    }

    /// Outer window size that fits the board plus the control rows.
    pub fn window_size(&self) -> [f32; 2] {
        let board_w = self.width as f32 * CELL_LENGTH + 2.0 * CANVAS_PADDING;
        let board_h = self.height as f32 * CELL_LENGTH + 2.0 * CANVAS_PADDING;
        [board_w.max(720.0) + 20.0, board_h + 200.0]
    }
}

/// Maps a pointer position relative to the canvas origin to a grid cell.
/// Positions in the padding or past the last row/column give `None`.
pub fn pixel_to_cell(px: f32, py: f32, width: usize, height: usize) -> Option<(i64, i64)> {
    let x = ((px - CANVAS_PADDING) / CELL_LENGTH).floor();
    let y = ((py - CANVAS_PADDING) / CELL_LENGTH).floor();
    if x < 0.0 || y < 0.0 || x >= width as f32 || y >= height as f32 {
        return None;
    }
    Some((x as i64, y as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        assert_eq!(ViewConfig::from_lookup(lookup(&[])), ViewConfig::default());
        let config = ViewConfig::default();
        assert_eq!((config.width, config.height), (50, 30));
        assert_eq!(config.tick, Duration::from_millis(500));
    }

    #[test]
    fn valid_overrides_apply() {
        let config = ViewConfig::from_lookup(lookup(&[
            (ENV_WIDTH, "80"),
            (ENV_HEIGHT, " 40 "),
            (ENV_ALGORITHM, "NAIVE"),
        ]));
        assert_eq!((config.width, config.height), (80, 40));
        assert_eq!(config.algorithm, Algorithm::Naive);
    }

    #[test]
    fn invalid_overrides_are_ignored() {
        let config = ViewConfig::from_lookup(lookup(&[
            (ENV_WIDTH, "0"),
            (ENV_HEIGHT, "tall"),
            (ENV_ALGORITHM, "quantum"),
        ]));
        assert_eq!(config, ViewConfig::default());
    }

    #[test]
    fn pixels_map_to_cells() {
        assert_eq!(pixel_to_cell(5.0, 5.0, 10, 10), Some((0, 0)));
        assert_eq!(pixel_to_cell(19.9, 20.0, 10, 10), Some((0, 1)));
        assert_eq!(pixel_to_cell(5.0 + 15.0 * 9.5, 5.0, 10, 10), Some((9, 0)));
    }

    #[test]
    fn pixels_outside_the_board_are_discarded() {
        assert_eq!(pixel_to_cell(2.0, 50.0, 10, 10), None);
        assert_eq!(pixel_to_cell(50.0, 4.9, 10, 10), None);
        assert_eq!(pixel_to_cell(5.0 + 150.0, 50.0, 10, 10), None);
        assert_eq!(pixel_to_cell(50.0, 5.0 + 150.0, 10, 10), None);
    }

    #[test]
    fn styles_have_distinct_live_colours() {
        let lives: Vec<Color32> = Style::ALL.iter().map(|s| s.palette().live).collect();
        assert_ne!(lives[0], lives[1]);
        assert_ne!(lives[1], lives[2]);
        assert_eq!(Style::NoGrid.palette().grid, Style::NoGrid.palette().dead);
    }
}
