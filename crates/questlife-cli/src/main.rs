use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "questlife-cli", version, about = "QuestLife CLI")]
struct Cli {
    /// Engine config file (TOML)
    #[arg(long, global = true, env = "QUESTLIFE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive or scripted session
    Play(commands::play::PlayArgs),
    /// Play a short scripted session over the starter quests
    Demo(commands::demo::DemoArgs),
    /// List moods, companions, achievements or rewards
    Catalog {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Configuration inspection
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();
    let result = match cli.command {
        Commands::Play(args) => commands::play::run(args, config_path),
        Commands::Demo(args) => commands::demo::run(args, config_path),
        Commands::Catalog { action } => commands::catalog::run(action, config_path),
        Commands::Config { action } => commands::config::run(action, config_path),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
