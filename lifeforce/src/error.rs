// error.rs - Error types for the lifeforce engine

use thiserror::Error;

/// Boxed error produced by a render callback.
pub type RenderError = Box<dyn std::error::Error + Send + Sync>;

/// Problems detected while building a simulation. Nothing is constructed when one of these is returned.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("seed frame has no rows")]
    EmptySeed,
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    ZeroDimensions { width: usize, height: usize },
    #[error("grid of {width}x{height} cells is too large")]
    TooLarge { width: usize, height: usize },
    #[error("seed frame is not rectangular: row {row} has {found} cells, expected {expected}")]
    RaggedSeed {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("seed frame value at ({x}, {y}) is {value}, expected 0 or 1")]
    NonBinaryValue { x: usize, y: usize, value: u8 },
    #[error("alive probability must lie in [0, 1] (got {0})")]
    AliveProbability(f64),
    #[error("tick interval must be at least 1ms")]
    ZeroInterval,
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors surfaced while a simulation is ticking.
#[derive(Debug, Error)]
pub enum LifeError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
    /// The tick that preceded the render has already been committed.
    #[error("render callback failed: {0}")]
    Render(#[source] RenderError),
    #[error("failed to build runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
