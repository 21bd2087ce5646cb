// main.rs - Desktop viewer for the push-based Game of Life engine
// The engine hands every committed frame to a render callback; the egui app only draws it.

use eframe::egui;
use egui::Color32;
use lifeforce::{Frame, LifeConfig, RenderError, Simulation};
use lifeforce_view::{config_from_args, init_tracing, patterns};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::{error, info};

mod ui;

/// Frames kept for repeat detection.
const HISTORY_LEN: usize = 10;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = config_from_args(LifeConfig {
        alive_probability: 0.33,
        ..LifeConfig::default()
    })?;
    let app = GameOfLife::new(config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Lifeforce",
        options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|err| anyhow::anyhow!("viewer failed: {err}"))
}

/// Latest frame handed over by the render callback.
pub struct Snapshot {
    pub frame: Frame,
    pub generation: u64,
}

pub struct GameOfLife {
    simulation: Simulation,
    snapshot: Rc<RefCell<Snapshot>>,

    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub selected_pattern: usize,

    fps_since: Instant,
    fps_generation: u64,

    grid_history: [u64; HISTORY_LEN],
    history_count: usize,
}

impl GameOfLife {
    fn new(config: LifeConfig) -> anyhow::Result<Self> {
        let update_interval = config.tick_interval();
        let mut simulation = Simulation::new(config)?;

        let snapshot = Rc::new(RefCell::new(Snapshot {
            frame: simulation.frame().clone(),
            generation: simulation.generation(),
        }));
        let sink = Rc::clone(&snapshot);
        simulation.set_renderer(move |frame: &Frame, generation: u64, _: Duration| -> Result<(), RenderError> {
            let mut view = sink.borrow_mut();
            view.frame.clone_from(frame);
            view.generation = generation;
            Ok(())
        });

        Ok(Self {
            simulation,
            snapshot,
            is_running: false,
            last_update: Instant::now(),
            update_interval,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
            fps_since: Instant::now(),
            fps_generation: 0,
            grid_history: [0; HISTORY_LEN],
            history_count: 0,
        })
    }

    pub fn snapshot(&self) -> std::cell::Ref<'_, Snapshot> {
        self.snapshot.borrow()
    }

    pub fn set_running(&mut self, running: bool) {
        self.is_running = running;
        if running {
            self.last_update = Instant::now();
            self.fps_since = Instant::now();
            self.fps_generation = self.simulation.generation();
        }
    }

    /// Generations per second since the run was last started.
    pub fn fps(&self) -> Option<f32> {
        let elapsed = self.fps_since.elapsed().as_secs_f32();
        (self.is_running && elapsed >= 1.0)
            .then(|| (self.simulation.generation() - self.fps_generation) as f32 / elapsed)
    }

    fn reseeded(&mut self) {
        self.grid_history = [0; HISTORY_LEN];
        self.history_count = 0;
        if let Err(err) = self.simulation.render() {
            error!(%err, "failed to refresh view");
        }
    }
}

pub trait GameOfLifeInterface {
    fn update_generation(&mut self);
    fn check_for_cycle(&mut self) -> bool;
    fn clear_grid(&mut self);
    fn apply_selected_pattern(&mut self);
    fn apply_random_pattern(&mut self);
    fn toggle_cell(&mut self, x: usize, y: usize);
}

impl GameOfLifeInterface for GameOfLife {
    fn update_generation(&mut self) {
        if let Err(err) = self.simulation.tick() {
            error!(%err, "tick failed; pausing");
            self.is_running = false;
            return;
        }
        if self.check_for_cycle() {
            info!(generation = self.simulation.generation(), "frame repeats; pausing");
            self.is_running = false;
        }
    }

    fn check_for_cycle(&mut self) -> bool {
        let current_hash = self.simulation.frame().fingerprint();
        if self.grid_history.contains(&current_hash) { return true; }
        self.grid_history[self.history_count % HISTORY_LEN] = current_hash;
        self.history_count += 1;
        false
    }

    fn clear_grid(&mut self) {
        let frame = self.simulation.frame();
        match Frame::new(frame.width(), frame.height()) {
            Ok(empty) => self.simulation.reseed(empty),
            Err(err) => error!(%err, "cannot clear grid"),
        }
        self.reseeded();
    }

    fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = patterns::PATTERNS.get(self.selected_pattern) {
            let frame = self.simulation.frame();
            match pattern.frame(frame.width(), frame.height()) {
                Ok(seed) => self.simulation.reseed(seed),
                Err(err) => error!(%err, pattern = pattern.name, "cannot place pattern"),
            }
            self.reseeded();
        }
    }

    fn apply_random_pattern(&mut self) {
        if let Err(err) = self.simulation.reseed_random() {
            error!(%err, "cannot randomize grid");
        }
        self.reseeded();
    }

    fn toggle_cell(&mut self, x: usize, y: usize) {
        let edited = self.simulation.frame().toggled(x, y);
        self.simulation.reseed(edited);
        self.reseeded();
    }
}
