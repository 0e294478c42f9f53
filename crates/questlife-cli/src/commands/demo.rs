use std::error::Error;
use std::path::Path;

use clap::Args;
use questlife_core::ProgressionEngine;

use super::play::Runner;

/// Scripted session over the starter board.
const DEMO_SCRIPT: &str = "\
companion cat
mood motivated
quests
timer start #2 10
tick 120
complete #2
complete #1
complete #4
add medium social Call an old friend
nudge
dismiss
nudge
status
";

#[derive(Args)]
pub struct DemoArgs {
    /// Seed for companion messages and compliments
    #[arg(long)]
    pub seed: Option<u64>,
    /// Print events and results as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: DemoArgs, config_path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let config = super::load_config(config_path, args.seed)?;
    let engine = ProgressionEngine::with_starter_quests(config)?;
    Runner::new(engine, args.json).run_lines(DEMO_SCRIPT.as_bytes())
}
