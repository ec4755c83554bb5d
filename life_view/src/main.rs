// main.rs - Conway's Game of Life viewer driving a life_core engine
//
// The app owns exactly one engine. Rendering reads snapshots from it, every
// edit goes through toggle_cell, and the play loop calls update_state once
// per tick.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant};

use eframe::egui;
use life_core::{Algorithm, Result, Stepper};
use log::{error, info};

mod config; // Defaults, colour styles, pixel mapping
mod patterns; // Built-in and captured structures
mod ui; // eframe::App impl

use config::{pixel_to_cell, Style, ViewConfig, CYCLE_HISTORY};
use patterns::PatternLibrary;

fn main() -> std::result::Result<(), eframe::Error> {
    env_logger::init();

    let config = ViewConfig::from_env();
    let app = match GameOfLife::new(&config) {
        Ok(app) => app,
        Err(err) => {
            error!("cannot start simulation: {}", err);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(config.window_size()),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
}

/// One simulation session: the engine plus play/pause and display state.
pub struct GameOfLife {
    engine: Box<dyn Stepper>,

    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub style: Style,
    pub selected_pattern: usize,
    pub selected_algorithm: Algorithm,
    pub stopped_on_cycle: bool,
    pub library: PatternLibrary,
    pub structure_name: String,
    pub exit_requested: bool,

    random_seed: u32,
    grid_history: [u64; CYCLE_HISTORY],
    history_count: usize,
}

impl GameOfLife {
    pub fn new(config: &ViewConfig) -> Result<Self> {
        let engine = config.algorithm.build(config.width, config.height)?;
        info!(
            "{}x{} grid, {} stepper, {:?} tick",
            config.width,
            config.height,
            config.algorithm.name(),
            config.tick
        );
        Ok(Self {
            engine,
            is_running: false,
            last_update: Instant::now(),
            update_interval: config.tick,
            style: config.style,
            selected_pattern: 0,
            selected_algorithm: config.algorithm,
            stopped_on_cycle: false,
            library: PatternLibrary::default(),
            structure_name: String::new(),
            exit_requested: false,
            random_seed: 0,
            grid_history: [0; CYCLE_HISTORY],
            history_count: 0,
        })
    }

    pub fn engine(&self) -> &dyn Stepper {
        self.engine.as_ref()
    }

    fn forget_history(&mut self) {
        self.grid_history = [0; CYCLE_HISTORY];
        self.history_count = 0;
        self.stopped_on_cycle = false;
    }

    /// Stops the play loop and reports engine errors instead of panicking.
    fn report(&mut self, what: &str, result: Result<()>) {
        if let Err(err) = result {
            error!("{} failed: {}", what, err);
            self.is_running = false;
        }
    }
}

/// Actions the UI can request from the session.
pub trait Controller {
    fn advance(&mut self);
    fn toggle_play(&mut self);
    fn reset(&mut self);
    fn toggle_cell_clicked(&mut self, px: f32, py: f32);
    fn apply_selected_pattern(&mut self);
    fn apply_random_pattern(&mut self);
    fn add_structure(&mut self);
    fn remove_selected_structure(&mut self);
    fn exit(&mut self);
    fn switch_algorithm(&mut self, algorithm: Algorithm);
    fn hash_grid(&self) -> u64;
    fn check_for_cycle(&mut self) -> bool;
}

impl Controller for GameOfLife {
    fn advance(&mut self) {
        let result = self.engine.update_state();
        self.report("update_state", result);
        if self.check_for_cycle() && self.is_running {
            info!("grid repeats at generation {}; pausing", self.engine.generation());
            self.is_running = false;
            self.stopped_on_cycle = true;
        }
    }

    fn toggle_play(&mut self) {
        self.is_running = !self.is_running;
        if self.is_running {
            self.stopped_on_cycle = false;
            self.last_update = Instant::now();
        }
    }

    fn reset(&mut self) {
        self.is_running = false;
        let result = self.engine.clear();
        self.report("clear", result);
        self.forget_history();
    }

    fn toggle_cell_clicked(&mut self, px: f32, py: f32) {
        // Clicks in the padding or beyond the board never reach the engine.
        let Some((x, y)) = pixel_to_cell(px, py, self.engine.width(), self.engine.height()) else {
            return;
        };
        let result = self.engine.toggle_cell(x, y);
        self.report("toggle_cell", result);
        self.forget_history();
    }

    fn apply_selected_pattern(&mut self) {
        self.is_running = false;
        if let Some(pattern) = self.library.get(self.selected_pattern) {
            let result = patterns::place_centered(self.engine.as_mut(), pattern).map(|_| ());
            self.report("place pattern", result);
        }
        self.forget_history();
    }

    fn apply_random_pattern(&mut self) {
        self.is_running = false;
        self.random_seed = self.random_seed.wrapping_add(1);
        let result = patterns::apply_random_pattern(self.engine.as_mut(), self.random_seed);
        self.report("random fill", result);
        self.forget_history();
    }

    fn add_structure(&mut self) {
        match self.library.capture(&self.structure_name, self.engine.as_ref()) {
            Ok(index) => {
                self.selected_pattern = index;
                self.structure_name.clear();
            }
            Err(err) => error!("cannot add structure: {}", err),
        }
    }

    fn remove_selected_structure(&mut self) {
        let Some(name) = self.library.get(self.selected_pattern).map(|p| p.name.to_string()) else {
            return;
        };
        if let Err(err) = self.library.remove(&name) {
            error!("cannot remove structure: {}", err);
        }
        self.selected_pattern = self
            .selected_pattern
            .min(self.library.patterns().len().saturating_sub(1));
    }

    fn exit(&mut self) {
        info!("exiting at generation {}", self.engine.generation());
        self.is_running = false;
        self.exit_requested = true;
    }

    fn switch_algorithm(&mut self, algorithm: Algorithm) {
        if algorithm == self.engine.algorithm() {
            return;
        }
        match algorithm.rebuild(self.engine.as_ref()) {
            Ok(engine) => {
                info!("switched to {} stepper", algorithm.name());
                self.engine = engine;
                self.selected_algorithm = algorithm;
            }
            Err(err) => {
                error!("cannot switch to {}: {}", algorithm.name(), err);
                self.selected_algorithm = self.engine.algorithm();
            }
        }
    }

    fn hash_grid(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.engine.grid().hash(&mut hasher);
        hasher.finish()
    }

    fn check_for_cycle(&mut self) -> bool {
        let current_hash = self.hash_grid();
        let seen = self.history_count.min(CYCLE_HISTORY);
        if self.grid_history[..seen].contains(&current_hash) {
            return true;
        }
        self.grid_history[self.history_count % CYCLE_HISTORY] = current_hash;
        self.history_count += 1;
        false
    }
}
