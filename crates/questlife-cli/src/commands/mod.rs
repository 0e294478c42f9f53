pub mod catalog;
pub mod config;
pub mod demo;
pub mod play;
mod render;

use std::path::Path;

use questlife_core::{ConfigError, EngineConfig};

/// Load the engine config, letting `--seed` override the file.
pub(crate) fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<EngineConfig, ConfigError> {
    let mut config = EngineConfig::load_or_default(path)?;
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}
