use std::error::Error;
use std::path::Path;

use clap::Subcommand;
use questlife_core::progression::AchievementId;
use questlife_core::{Companion, Difficulty, Mood};

#[derive(Subcommand)]
pub enum CatalogAction {
    /// Moods and their activity suggestions
    Moods,
    /// Companion personas
    Companions,
    /// Achievements and how to unlock them
    Achievements,
    /// XP and gold per difficulty (from the active config)
    Rewards,
}

pub fn run(action: CatalogAction, config_path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    match action {
        CatalogAction::Moods => {
            for mood in Mood::ALL {
                println!("{} {}", mood.emoji(), mood);
                for suggestion in mood.suggestions() {
                    println!("    - {suggestion}");
                }
            }
        }
        CatalogAction::Companions => {
            for companion in Companion::ALL {
                println!(
                    "{} {:<8} {:<17} {}: {}",
                    companion.emoji(),
                    companion.as_str(),
                    companion.display_name(),
                    companion.style(),
                    companion.description()
                );
            }
        }
        CatalogAction::Achievements => {
            for id in AchievementId::ALL {
                println!(
                    "{} {:<15} {:<15} {}",
                    id.icon(),
                    id.as_str(),
                    id.title(),
                    id.description()
                );
            }
        }
        CatalogAction::Rewards => {
            let config = super::load_config(config_path, None)?;
            for difficulty in Difficulty::ALL {
                let reward = config.rewards.for_difficulty(difficulty);
                let stat = config.life_stats.for_difficulty(difficulty);
                println!(
                    "{:<6} {:>3} XP {:>3} gold  +{stat} stat",
                    difficulty.as_str(),
                    reward.xp,
                    reward.gold
                );
            }
        }
    }
    Ok(())
}
