//! Render collaborators for the lifeforce engine: seed patterns, config loading
//! and tracing setup shared by the desktop and terminal viewers.

use anyhow::Context;
use lifeforce::LifeConfig;
use std::path::Path;

pub mod patterns;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Reads a JSON config from the first command-line argument, if one was given.
pub fn config_from_args(fallback: LifeConfig) -> anyhow::Result<LifeConfig> {
    match std::env::args_os().nth(1) {
        Some(path) => config_from_path(Path::new(&path)),
        None => Ok(fallback),
    }
}

/// Loads and validates a JSON config file.
pub fn config_from_path(path: &Path) -> anyhow::Result<LifeConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    LifeConfig::from_json_str(&json).with_context(|| format!("parsing {}", path.display()))
}
