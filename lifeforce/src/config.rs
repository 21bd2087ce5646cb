// config.rs - Construction parameters for a simulation

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigurationError;
use crate::grid::{self, DEFAULT_HEIGHT, DEFAULT_WIDTH, Frame};

/// Alive probability used when a random seed frame is requested.
pub const DEFAULT_ALIVE_PROBABILITY: f64 = 0.064;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// What influence carries between cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// A bare count.
    #[default]
    Classic,
    /// Generated base pairs and art strings.
    Generative,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    pub width: usize,
    pub height: usize,
    pub generative: bool,
    /// Fill the grid randomly when no seed frame is given.
    pub randomize: bool,
    pub alive_probability: f64,
    /// Fixes random seeding and payload generation. Drawn fresh when absent.
    pub rng_seed: Option<u64>,
    /// Explicit initial state. Overrides `randomize`, `width` and `height`.
    pub seed_frame: Option<Vec<Vec<u8>>>,
    pub tick_interval_ms: u64,
    /// Number of ticks `run` performs, 0 for unbounded.
    pub tick_limit: u64,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            generative: false,
            randomize: false,
            alive_probability: DEFAULT_ALIVE_PROBABILITY,
            rng_seed: None,
            seed_frame: None,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            tick_limit: 0,
        }
    }
}

impl LifeConfig {
    /// Classic config seeded from explicit rows.
    pub fn with_seed(rows: Vec<Vec<u8>>) -> Self {
        Self {
            seed_frame: Some(rows),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn mode(&self) -> Mode {
        if self.generative {
            Mode::Generative
        } else {
            Mode::Classic
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Effective `(width, height)`, taken from the seed frame when there is one.
    pub fn dimensions(&self) -> (usize, usize) {
        match self.seed_frame.as_deref() {
            Some(rows) => (rows.first().map_or(0, Vec::len), rows.len()),
            None => (self.width, self.height),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(0.0..=1.0).contains(&self.alive_probability) {
            return Err(ConfigurationError::AliveProbability(self.alive_probability));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigurationError::ZeroInterval);
        }
        match &self.seed_frame {
            Some(rows) => Frame::from_rows(rows).map(drop),
            None => grid::cell_count(self.width, self.height).map(drop),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = LifeConfig::default();
        assert_eq!(config.dimensions(), (50, 50));
        assert_eq!(config.mode(), Mode::Classic);
        assert_eq!(config.tick_interval(), Duration::from_millis(200));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn seed_frame_overrides_dimensions() {
        let config = LifeConfig {
            width: 10,
            height: 10,
            ..LifeConfig::with_seed(vec![vec![0, 1, 0], vec![0, 1, 0]])
        };
        assert_eq!(config.dimensions(), (3, 2));
    }

    #[test]
    fn parses_partial_json() {
        let config = LifeConfig::from_json_str(
            r#"{ "width": 12, "generative": true, "randomize": true, "rng_seed": 9 }"#,
        )
        .expect("valid config");
        assert_eq!(config.dimensions(), (12, 50));
        assert_eq!(config.mode(), Mode::Generative);
        assert_eq!(config.rng_seed, Some(9));
        assert_eq!(config.alive_probability, DEFAULT_ALIVE_PROBABILITY);
    }

    #[test]
    fn oversized_grids_fail_before_allocation() {
        let huge = LifeConfig {
            width: 1 << 32,
            height: 1 << 32,
            ..LifeConfig::default()
        };
        assert!(matches!(
            huge.validate(),
            Err(ConfigurationError::TooLarge { width, height }) if width == 1 << 32 && height == 1 << 32
        ));
        assert!(matches!(
            LifeConfig::from_json_str(r#"{ "width": 4294967296, "height": 4294967296 }"#),
            Err(ConfigurationError::TooLarge { .. })
        ));
        assert!(matches!(
            crate::Simulation::new(huge),
            Err(ConfigurationError::TooLarge { .. })
        ));
    }

    #[test]
    fn rejects_invalid_values() {
        let bad_probability = LifeConfig {
            alive_probability: -0.1,
            ..LifeConfig::default()
        };
        assert!(matches!(
            bad_probability.validate(),
            Err(ConfigurationError::AliveProbability(_))
        ));

        let zero_interval = LifeConfig {
            tick_interval_ms: 0,
            ..LifeConfig::default()
        };
        assert!(matches!(zero_interval.validate(), Err(ConfigurationError::ZeroInterval)));

        let zero_width = LifeConfig {
            width: 0,
            ..LifeConfig::default()
        };
        assert!(matches!(
            zero_width.validate(),
            Err(ConfigurationError::ZeroDimensions { width: 0, height: 50 })
        ));

        let ragged = LifeConfig::with_seed(vec![vec![1, 0], vec![1]]);
        assert!(matches!(ragged.validate(), Err(ConfigurationError::RaggedSeed { .. })));

        assert!(matches!(
            LifeConfig::from_json_str("{ \"width\": \"wide\" }"),
            Err(ConfigurationError::Parse(_))
        ));
    }
}
