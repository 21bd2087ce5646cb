// ui.rs - egui front end; draws whatever the render callback last delivered

use eframe::egui;
use egui::{Color32, Rect, Stroke, Vec2};
use std::time::{Duration, Instant};
use crate::{GameOfLife, GameOfLifeInterface, patterns};

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // The repaint loop is the pacing source for the engine here
        if self.is_running && self.last_update.elapsed() >= self.update_interval {
            self.update_generation();
            self.last_update = Instant::now();
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Lifeforce (push-based Game of Life)");

            ui.horizontal(|ui| {
                let button_text = if self.is_running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.set_running(!self.is_running);
                }

                if ui.button("⏹ Clear").clicked() {
                    self.set_running(false);
                    self.clear_grid();
                }

                if ui.button("🎲 Random").clicked() {
                    self.set_running(false);
                    self.apply_random_pattern();
                }

                ui.separator();

                ui.label("Pattern:");
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(patterns::PATTERNS[self.selected_pattern].name)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in patterns::PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.button("Apply Pattern").clicked() {
                    self.set_running(false);
                    self.apply_selected_pattern();
                }

                ui.separator();

                ui.label(format!("Generation: {}", self.snapshot().generation));
                match self.fps() {
                    Some(fps) => ui.label(format!("fps: {fps:.1}")),
                    None => ui.label("fps: --"),
                };
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut speed = 1000.0 / self.update_interval.as_millis().max(1) as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=90.0).suffix(" gen/sec")).changed() {
                    self.update_interval = Duration::from_millis((1000.0 / speed) as u64);
                }

                ui.separator();

                ui.label("Live:");
                ui.color_edit_button_srgba(&mut self.live_color);
                ui.label("Dead:");
                ui.color_edit_button_srgba(&mut self.dead_color);
            });

            ui.separator();

            ui.label("Only cells next to live cells are re-evaluated each generation.");
            ui.label("Click cells to toggle them while paused. Use Start/Pause to run the simulation.");

            ui.separator();

            let (width, height) = {
                let view = self.snapshot();
                (view.frame.width(), view.frame.height())
            };
            let spacing = 0.5;
            let box_size = (750.0 / width.max(height) as f32 - spacing).clamp(2.0, 15.0);
            let pitch = box_size + spacing;

            let start_pos = ui.cursor().min;
            let total_size = Vec2::new(pitch * width as f32 - spacing, pitch * height as f32 - spacing);

            let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

            painter.rect_filled(
                Rect::from_min_size(start_pos, total_size),
                0.0,
                Color32::BLACK,
            );

            let mut clicked_cell = None;
            {
                let view = self.snapshot();
                for (y, row) in view.frame.rows().enumerate() {
                    for (x, &cell) in row.iter().enumerate() {
                        let rect = Rect::from_min_size(
                            egui::pos2(start_pos.x + x as f32 * pitch, start_pos.y + y as f32 * pitch),
                            Vec2::splat(box_size),
                        );

                        let cell_color = if cell == 1 { self.live_color } else { self.dead_color };
                        painter.rect_filled(rect, 1.0, cell_color);
                        painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));

                        if !self.is_running && response.clicked() {
                            if let Some(pos) = response.interact_pointer_pos() {
                                if rect.contains(pos) {
                                    clicked_cell = Some((x, y));
                                }
                            }
                        }
                    }
                }
            }
            if let Some((x, y)) = clicked_cell {
                self.toggle_cell(x, y);
            }

            ui.separator();

            let (live_cells, total) = {
                let view = self.snapshot();
                (view.frame.population(), view.frame.width() * view.frame.height())
            };

            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", total - live_cells));
                ui.label(format!("Population: {:.1}%", (live_cells as f32 / total as f32) * 100.0));
            });
        });

        if self.is_running {
            ctx.request_repaint();
        }
    }
}
