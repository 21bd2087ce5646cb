// driver.rs - Simulation driver: owns the grid, drains the queues, paces the run

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use crate::cell::Cell;
use crate::config::{LifeConfig, Mode};
use crate::error::{ConfigurationError, LifeError, RenderError};
use crate::grid::{Coord, Frame};
use crate::payload;
use crate::queue::TickQueue;

/// Receives the authoritative frame once at start and once per tick.
pub trait Renderer {
    fn render(&mut self, frame: &Frame, generation: u64, timestamp: Duration) -> Result<(), RenderError>;
}

impl<F> Renderer for F
where
    F: FnMut(&Frame, u64, Duration) -> Result<(), RenderError>,
{
    fn render(&mut self, frame: &Frame, generation: u64, timestamp: Duration) -> Result<(), RenderError> {
        self(frame, generation, timestamp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Stopped,
}

/// Asks a running simulation to stop scheduling ticks. Cheap to clone.
#[derive(Debug, Clone)]
pub struct StopHandle {
    signal: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.signal.send_replace(true);
    }

    pub fn is_stop_requested(&self) -> bool {
        *self.signal.borrow()
    }
}

pub struct Simulation {
    config: LifeConfig,
    mode: Mode,
    frame: Frame,
    cells: Vec<Cell>,
    duty_cycle: TickQueue,
    frame_register: TickQueue,
    generation: u64,
    rng: SmallRng,
    renderer: Option<Box<dyn Renderer>>,
    state: RunState,
    stop: Arc<watch::Sender<bool>>,
    epoch: Instant,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("mode", &self.mode)
            .field("width", &self.frame.width())
            .field("height", &self.frame.height())
            .field("generation", &self.generation)
            .field("population", &self.frame.population())
            .field("state", &self.state)
            .field("has_renderer", &self.renderer.is_some())
            .finish()
    }
}

impl Simulation {
    /// Builds the grid and every cell, and queues the initially-alive cells for the first tick.
    pub fn new(config: LifeConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;

        let rng_seed = config.rng_seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = SmallRng::seed_from_u64(rng_seed);
        let (width, height) = config.dimensions();
        let frame = match &config.seed_frame {
            Some(rows) => Frame::from_rows(rows)?,
            None if config.randomize => Frame::random(width, height, config.alive_probability, &mut rng)?,
            None => Frame::new(width, height)?,
        };

        let (stop, _) = watch::channel(false);
        let mut simulation = Self {
            mode: config.mode(),
            config,
            frame,
            cells: Vec::new(),
            duty_cycle: TickQueue::new(),
            frame_register: TickQueue::new(),
            generation: 0,
            rng,
            renderer: None,
            state: RunState::NotStarted,
            stop: Arc::new(stop),
            epoch: Instant::now(),
        };
        simulation.populate();

        info!(
            width,
            height,
            mode = ?simulation.mode,
            population = simulation.frame.population(),
            rng_seed,
            "simulation built"
        );
        Ok(simulation)
    }

    /// Shorthand for a classic simulation seeded from explicit rows.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self, ConfigurationError> {
        Self::new(LifeConfig::with_seed(rows))
    }

    /// Replaces the whole state with a new seed frame and restarts the generation count.
    pub fn reseed(&mut self, frame: Frame) {
        self.frame = frame;
        self.generation = 0;
        self.populate();
        debug!(population = self.frame.population(), "simulation reseeded");
    }

    /// Reseeds with a random frame of the same size, using the configured alive probability.
    pub fn reseed_random(&mut self) -> Result<(), ConfigurationError> {
        let frame = Frame::random(
            self.frame.width(),
            self.frame.height(),
            self.config.alive_probability,
            &mut self.rng,
        )?;
        self.reseed(frame);
        Ok(())
    }

    fn populate(&mut self) {
        let mode = self.mode;
        let frame = &self.frame;
        let rng = &mut self.rng;
        let cells: Vec<Cell> = (0..frame.width() * frame.height())
            .map(|index| {
                let coord = frame.coord_of(index);
                Cell::new(coord, frame.is_alive(coord.x, coord.y), mode, &mut *rng)
            })
            .collect();
        self.cells = cells;

        self.duty_cycle.clear();
        self.frame_register.clear();
        for (index, cell) in self.cells.iter().enumerate() {
            if cell.is_alive() {
                self.duty_cycle.enqueue(index);
            }
        }
    }

    pub fn set_renderer<R: Renderer + 'static>(&mut self, renderer: R) {
        self.renderer = Some(Box::new(renderer));
    }

    pub fn config(&self) -> &LifeConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.frame
            .contains(x, y)
            .then(|| &self.cells[self.frame.index_of(Coord::new(x, y))])
    }

    pub fn duty_cycle(&self) -> &TickQueue {
        &self.duty_cycle
    }

    pub fn frame_register(&self) -> &TickQueue {
        &self.frame_register
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            signal: Arc::clone(&self.stop),
        }
    }

    /// Advances one generation and hands the result to the renderer.
    ///
    /// A render failure is returned after the new generation has been committed.
    pub fn tick(&mut self) -> Result<(), LifeError> {
        let broadcast = self.drain_duty_cycle();
        let evaluated = self.drain_frame_register();
        self.generation += 1;
        debug!(
            generation = self.generation,
            broadcast,
            evaluated,
            population = self.frame.population(),
            "tick"
        );
        self.render()
    }

    /// First half of a tick: every queued live cell pushes influence to its neighbors.
    pub fn drain_duty_cycle(&mut self) -> usize {
        let pass = self.duty_cycle.take_pass();
        for &index in &pass {
            self.distribute_influence(index);
        }
        trace!(cells = pass.len(), registered = self.frame_register.len(), "duty cycle drained");
        pass.len()
    }

    /// Second half of a tick: every registered cell commits its next state.
    pub fn drain_frame_register(&mut self) -> usize {
        let pass = self.frame_register.take_pass();
        for &index in &pass {
            let (coord, alive) = self.cells[index].apply_rules();
            if alive {
                self.duty_cycle.enqueue(index);
            }
            self.frame.set(coord, alive);
        }
        trace!(cells = pass.len(), queued = self.duty_cycle.len(), "frame register drained");
        pass.len()
    }

    fn distribute_influence(&mut self, index: usize) {
        let neighborhood = self.cells[index].neighborhood(self.frame.width(), self.frame.height());

        let mut alive_neighbors = 0;
        for coord in neighborhood.iter() {
            let target = self.frame.index_of(coord);
            let neighbor_alive = self.cells[target].is_alive();
            if neighbor_alive {
                alive_neighbors += 1;
            }
            let payload = match self.mode {
                Mode::Classic => None,
                Mode::Generative if neighbor_alive => Some(payload::art(&mut self.rng)),
                Mode::Generative => Some(payload::base_pair(&mut self.rng)),
            };
            self.deliver(target, payload);
        }

        // Nobody will push to an isolated cell, so it has to register itself to die.
        if alive_neighbors == 0 {
            match self.mode {
                Mode::Generative => {
                    let art = payload::art(&mut self.rng);
                    self.deliver(index, Some(art));
                }
                Mode::Classic => {
                    if self.cells[index].subscribe() {
                        self.frame_register.enqueue(index);
                    }
                }
            }
        }
    }

    fn deliver(&mut self, target: usize, payload: Option<String>) {
        if self.cells[target].receive_influence(payload) {
            self.frame_register.enqueue(target);
        }
    }

    /// Invokes the renderer with the current frame, if one is attached.
    pub fn render(&mut self) -> Result<(), LifeError> {
        let timestamp = self.epoch.elapsed();
        if let Some(renderer) = self.renderer.as_mut() {
            renderer
                .render(&self.frame, self.generation, timestamp)
                .map_err(LifeError::Render)?;
        }
        Ok(())
    }

    /// Renders once, then ticks every `interval` until `tick_limit` ticks have run
    /// (0 = unbounded) or a [`StopHandle`] asks it to stop. Returns the number of ticks run.
    pub async fn run(&mut self, interval: Duration, tick_limit: u64) -> Result<u64, LifeError> {
        if interval.is_zero() {
            return Err(ConfigurationError::ZeroInterval.into());
        }

        // A stop left over from an earlier run does not carry into this one.
        self.stop.send_replace(false);
        let mut stop = self.stop.subscribe();

        self.state = RunState::Running;
        info!(?interval, tick_limit, generation = self.generation, "simulation running");
        let outcome = self.run_loop(interval, tick_limit, &mut stop).await;
        self.state = RunState::Stopped;

        match &outcome {
            Ok(ticks) => info!(ticks, generation = self.generation, "simulation stopped"),
            Err(err) => warn!(%err, generation = self.generation, "simulation halted"),
        }
        outcome
    }

    async fn run_loop(
        &mut self,
        interval: Duration,
        tick_limit: u64,
        stop: &mut watch::Receiver<bool>,
    ) -> Result<u64, LifeError> {
        self.render()?;

        let mut ticker = time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the first generation waits a full interval.
        ticker.tick().await;

        let mut ticks = 0;
        while tick_limit == 0 || ticks < tick_limit {
            tokio::select! {
                biased;
                _ = stop.wait_for(|stopped| *stopped) => break,
                _ = ticker.tick() => {}
            }
            self.tick()?;
            ticks += 1;
        }
        Ok(ticks)
    }

    /// Runs on a private current-thread runtime, for callers that are not async.
    pub fn run_blocking(&mut self, interval: Duration, tick_limit: u64) -> Result<u64, LifeError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        runtime.block_on(self.run(interval, tick_limit))
    }
}
