//! Push-based Game of Life engine.
//!
//! Live cells push influence to their neighbors through the duty cycle; only
//! cells that received influence are queued on the frame register and
//! re-evaluated. The committed [`Frame`] is handed to an external renderer
//! after every tick.

pub mod cell;
pub mod config;
pub mod driver;
pub mod error;
pub mod grid;
pub mod payload;
pub mod queue;
pub mod rules;

pub use cell::{Cell, Genome, Neighborhood};
pub use config::{LifeConfig, Mode};
pub use driver::{Renderer, RunState, Simulation, StopHandle};
pub use error::{ConfigurationError, LifeError, RenderError};
pub use grid::{Coord, Frame};
pub use queue::TickQueue;
