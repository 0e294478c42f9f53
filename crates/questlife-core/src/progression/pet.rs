//! Pet companion that is fed by completed quests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MAX_HAPPINESS: u8 = 100;

/// Tuning for pet happiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetSettings {
    #[serde(default = "default_initial_happiness")]
    pub initial_happiness: u8,
    #[serde(default = "default_happiness_per_quest")]
    pub happiness_per_quest: u8,
}

fn default_initial_happiness() -> u8 {
    50
}
fn default_happiness_per_quest() -> u8 {
    10
}

impl Default for PetSettings {
    fn default() -> Self {
        Self {
            initial_happiness: default_initial_happiness(),
            happiness_per_quest: default_happiness_per_quest(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetState {
    pub happiness: u8,
    pub level: u32,
    #[serde(default)]
    pub last_fed: Option<DateTime<Utc>>,
}

impl PetState {
    pub fn new(settings: &PetSettings) -> Self {
        Self {
            happiness: settings.initial_happiness.min(MAX_HAPPINESS),
            level: 1,
            last_fed: None,
        }
    }

    /// Feed the pet after a completion. The pet grows with the player.
    pub fn feed(&self, now: DateTime<Utc>, player_level: u32, settings: &PetSettings) -> PetState {
        PetState {
            happiness: self
                .happiness
                .saturating_add(settings.happiness_per_quest)
                .min(MAX_HAPPINESS),
            level: player_level.max(self.level),
            last_fed: Some(now),
        }
    }

    pub fn mood(&self, quests_completed_today: usize) -> PetMood {
        if quests_completed_today > 0 {
            PetMood::Excited
        } else if self.happiness >= 80 {
            PetMood::Happy
        } else if self.happiness >= 50 {
            PetMood::Neutral
        } else {
            PetMood::Sad
        }
    }

    pub fn emoji(&self) -> &'static str {
        const PETS: [&str; 5] = ["🐱", "🐶", "🐰", "🦊", "🐼"];
        PETS[self.level as usize % PETS.len()]
    }
}

impl Default for PetState {
    fn default() -> Self {
        Self::new(&PetSettings::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetMood {
    Excited,
    Happy,
    Neutral,
    Sad,
}

impl PetMood {
    pub fn message(&self) -> &'static str {
        match self {
            PetMood::Excited => "Great job on that quest! I'm so proud!",
            PetMood::Happy => "You're doing amazing! Keep it up!",
            PetMood::Neutral => "Ready for our next adventure?",
            PetMood::Sad => "I believe in you... let's tackle a quest together?",
        }
    }
}
