use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Subcommand;
use questlife_core::EngineConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective config as TOML
    Show,
    /// Print a single value by dotted key (e.g. "rewards.hard.xp")
    Get {
        key: String,
    },
    /// Print the conventional config file location
    Path,
    /// Validate a config file
    Check {
        file: PathBuf,
    },
}

pub fn run(action: ConfigAction, config_path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    match action {
        ConfigAction::Show => {
            let config = super::load_config(config_path, None)?;
            print!("{}", config.to_toml_string()?);
        }
        ConfigAction::Get { key } => {
            let config = super::load_config(config_path, None)?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        ConfigAction::Path => {
            println!("{}", EngineConfig::default_path().display());
        }
        ConfigAction::Check { file } => {
            EngineConfig::load(&file)?;
            println!("ok: {}", file.display());
        }
    }
    Ok(())
}
