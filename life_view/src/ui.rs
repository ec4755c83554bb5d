// ui.rs - Board rendering and controls

use eframe::egui;
use egui::{Rect, Stroke, Vec2};
use std::time::{Duration, Instant};

use crate::config::{Style, CANVAS_PADDING, CELL_LENGTH, MAX_TICK_MS, MIN_TICK_MS};
use crate::{Controller, GameOfLife};
use life_core::Algorithm;

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // One generation per elapsed tick while playing
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.advance();
            self.last_update = Instant::now();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            // Controls
            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.toggle_play();
                }

                if ui.add_enabled(!self.is_running, egui::Button::new("⏭ Next")).clicked() {
                    self.advance();
                }

                if ui.button("⏹ Reset").clicked() {
                    self.reset();
                }

                if ui.button("🎲 Random").clicked() {
                    self.apply_random_pattern();
                }

                ui.separator();

                // Pattern dropdown
                ui.label("Generate:");
                let selected = self
                    .library
                    .get(self.selected_pattern)
                    .map(|p| p.name.to_string())
                    .unwrap_or_default();
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in self.library.patterns().iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name.as_ref());
                        }
                    });

                if ui.button("Place").clicked() {
                    self.apply_selected_pattern();
                }

                if ui.button("Remove").clicked() {
                    self.remove_selected_structure();
                }

                ui.separator();

                if ui.button("Exit").clicked() {
                    self.exit();
                }
            });

            ui.horizontal(|ui| {
                ui.label("Save board as:");
                ui.text_edit_singleline(&mut self.structure_name);
                if ui.button("Add Structure").clicked() {
                    self.add_structure();
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Delay:");
                let mut delay = self.update_interval.as_millis() as u64;
                if ui
                    .add(egui::Slider::new(&mut delay, MIN_TICK_MS..=MAX_TICK_MS).suffix(" ms"))
                    .changed()
                {
                    self.update_interval = Duration::from_millis(delay);
                }

                ui.separator();

                ui.label("Style:");
                egui::ComboBox::from_id_source("style_selector")
                    .selected_text(self.style.name())
                    .show_ui(ui, |ui| {
                        for style in Style::ALL {
                            ui.selectable_value(&mut self.style, style, style.name());
                        }
                    });

                ui.separator();

                ui.label("Stepper:");
                let mut algorithm = self.selected_algorithm;
                egui::ComboBox::from_id_source("algorithm_selector")
                    .selected_text(algorithm.name())
                    .show_ui(ui, |ui| {
                        for option in Algorithm::ALL {
                            ui.selectable_value(&mut algorithm, option, option.name());
                        }
                    });
                if algorithm != self.selected_algorithm {
                    self.switch_algorithm(algorithm);
                }
            });

            ui.separator();

            self.draw_board(ui);

            ui.separator();

            // Statistics
            let engine = self.engine();
            let total = engine.width() * engine.height();
            let live_cells = engine.live_count();
            ui.horizontal(|ui| {
                ui.label(format!("Generation: {}", engine.generation()));
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!(
                    "Population: {:.1}%",
                    live_cells as f32 / total as f32 * 100.0
                ));
                if self.stopped_on_cycle {
                    ui.label("Stopped: pattern repeats");
                }
            });
        });

        if self.exit_requested {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        // Keep ticking while playing
        if self.is_running {
            ctx.request_repaint_after(self.update_interval);
        }
    }
}

impl GameOfLife {
    fn draw_board(&mut self, ui: &mut egui::Ui) {
        let palette = self.style.palette();
        let grid = self.engine().grid();
        let (width, height) = (self.engine().width(), self.engine().height());

        let total_size = Vec2::new(
            width as f32 * CELL_LENGTH + 2.0 * CANVAS_PADDING,
            height as f32 * CELL_LENGTH + 2.0 * CANVAS_PADDING,
        );
        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, 0.0, palette.dead);

        for (y, row) in grid.iter().enumerate() {
            for (x, &alive) in row.iter().enumerate() {
                let rect = Rect::from_min_size(
                    egui::pos2(
                        origin.x + CANVAS_PADDING + x as f32 * CELL_LENGTH,
                        origin.y + CANVAS_PADDING + y as f32 * CELL_LENGTH,
                    ),
                    Vec2::splat(CELL_LENGTH),
                );

                if alive {
                    painter.rect_filled(rect, 0.0, palette.live);
                }
                painter.rect_stroke(rect, 0.0, Stroke::new(0.5, palette.grid));
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let offset = pos - origin;
                self.toggle_cell_clicked(offset.x, offset.y);
            }
        }
    }
}
